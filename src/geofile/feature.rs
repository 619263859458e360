use std::{collections::HashMap, fmt};

/// Attribute value of a feature. Missing attributes read as `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Null,
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Numeric value, if any. NaN counts as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(value) if !value.is_nan() => Some(*value),
            _ => None,
        }
    }

    /// Display string, or `None` for `Null`.
    pub fn display(&self) -> Option<String> {
        match self {
            AttributeValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => Ok(()),
            // Identifiers are often stored as floats by GIS tools, print 42.0 as "42".
            AttributeValue::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            AttributeValue::Number(value) => write!(f, "{}", value),
            AttributeValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<&serde_json::Value> for AttributeValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => AttributeValue::Null,
            Value::Number(number) => number
                .as_f64()
                .map(AttributeValue::Number)
                .unwrap_or(AttributeValue::Null),
            Value::String(text) => AttributeValue::Text(text.to_owned()),
            Value::Bool(flag) => AttributeValue::Text(flag.to_string()),
            nested => AttributeValue::Text(nested.to_string()),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

pub type FeatureMap = HashMap<String, AttributeValue>;

static NULL_ATTRIBUTE: AttributeValue = AttributeValue::Null;

#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: geo::Geometry,
    pub attributes: FeatureMap,
}

impl Feature {
    pub fn new(geometry: geo::Geometry, attributes: FeatureMap) -> Self {
        Self {
            geometry,
            attributes,
        }
    }

    /// Attribute by name. Absent attributes are `Null`.
    pub fn attribute(&self, name: &str) -> &AttributeValue {
        self.attributes.get(name).unwrap_or(&NULL_ATTRIBUTE)
    }
}

impl From<geo::Geometry> for Feature {
    fn from(value: geo::Geometry) -> Self {
        Self {
            geometry: value,
            attributes: HashMap::new(),
        }
    }
}

/// The part a dataset plays in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetRole {
    MetricGrid,
    PointsOfInterest,
    Boundary,
}

impl DatasetRole {
    pub fn name(&self) -> &'static str {
        match self {
            DatasetRole::MetricGrid => "metric grid",
            DatasetRole::PointsOfInterest => "points of interest",
            DatasetRole::Boundary => "boundary",
        }
    }
}

/// Ordered features of one role. Attribute sets need not be uniform.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub role: DatasetRole,
    pub features: Vec<Feature>,
}

impl Dataset {
    pub fn new(role: DatasetRole, features: Vec<Feature>) -> Self {
        Self { role, features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// All non-NaN values of a numeric attribute, in feature order.
    pub fn numeric_values<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = f64> + 'a {
        self.features
            .iter()
            .filter_map(move |feature| feature.attribute(attribute).as_f64())
    }
}
