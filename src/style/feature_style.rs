use serde::Serialize;

use super::{
    color::{Paint, Rgb},
    color_scale::ValueColorScale,
};

const HIGHLIGHT_COLOR: Rgb = Rgb::new(0x00, 0xe5, 0xff);
const NEUTRAL_COLOR: Rgb = Rgb::new(0x9e, 0x9e, 0x9e);
const PARK_COLOR: Rgb = Rgb::new(0x00, 0x00, 0xff);
const BOUNDARY_COLOR: Rgb = Rgb::new(0x33, 0x33, 0x33);

/// Visual style of one rendered feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub fill_color: Paint,
    #[serde(rename = "color")]
    pub stroke_color: Paint,
    #[serde(rename = "weight")]
    pub stroke_weight: f64,
    pub fill_opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
    /// Circle marker radius in pixels, only set for point features.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl FeatureStyle {
    /// Same style with the fill replaced by the highlight color. Used while the pointer is
    /// over the feature.
    pub fn highlighted(&self) -> FeatureStyle {
        FeatureStyle {
            fill_color: HIGHLIGHT_COLOR.into(),
            ..self.clone()
        }
    }

    /// Style for grid cells without a usable metric value.
    pub fn neutral() -> FeatureStyle {
        FeatureStyle {
            fill_color: NEUTRAL_COLOR.into(),
            stroke_color: NEUTRAL_COLOR.into(),
            stroke_weight: 1.0,
            fill_opacity: 0.3,
            dash_array: Some("4 4".to_string()),
            radius: None,
        }
    }

    pub fn boundary() -> FeatureStyle {
        FeatureStyle {
            fill_color: Paint::Transparent,
            stroke_color: BOUNDARY_COLOR.into(),
            stroke_weight: 3.0,
            fill_opacity: 0.0,
            dash_array: None,
            radius: None,
        }
    }

    /// Park outline, or a circle marker when the park is a point.
    pub fn park(geometry: &geo::Geometry) -> FeatureStyle {
        match geometry {
            geo::Geometry::Point(_) | geo::Geometry::MultiPoint(_) => FeatureStyle {
                fill_color: PARK_COLOR.into(),
                stroke_color: PARK_COLOR.into(),
                stroke_weight: 1.0,
                fill_opacity: 0.6,
                dash_array: None,
                radius: Some(4.0),
            },
            _ => FeatureStyle {
                fill_color: Paint::Transparent,
                stroke_color: PARK_COLOR.into(),
                stroke_weight: 2.0,
                fill_opacity: 0.0,
                dash_array: None,
                radius: None,
            },
        }
    }
}

/// Choropleth style for the walking time grid.
pub struct MetricStyle<'a> {
    scale: &'a ValueColorScale,
}

impl<'a> MetricStyle<'a> {
    pub fn new(scale: &'a ValueColorScale) -> Self {
        Self { scale }
    }

    /// Fill and stroke share the interpolated color. Missing or negative values never reach
    /// the color scale and get the neutral style instead.
    pub fn style_for(&self, value: Option<f64>) -> FeatureStyle {
        match value {
            Some(value) if value >= 0.0 => {
                let color = self.scale.color_at(value);
                FeatureStyle {
                    fill_color: color.into(),
                    stroke_color: color.into(),
                    stroke_weight: 2.0,
                    fill_opacity: 0.7,
                    dash_array: None,
                    radius: None,
                }
            }
            _ => FeatureStyle::neutral(),
        }
    }
}
