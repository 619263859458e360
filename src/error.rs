use thiserror::Error;

/// Structural errors. Any of these aborts construction of the map document.
#[derive(Error, Debug, PartialEq)]
pub enum MapError {
    #[error("Invalid color scale domain [{min}, {max}]: {reason}")]
    InvalidDomain { min: f64, max: f64, reason: String },

    #[error("Invalid color '{0}', expected '#rrggbb'")]
    InvalidColor(String),

    #[error("Dataset '{0}' has no renderable features")]
    EmptyDataset(String),

    #[error("At least one basemap is required")]
    NoBasemap,

    #[error("Layer name '{0}' is used more than once")]
    DuplicateLayerName(String),
}

/// Per-feature data anomalies. These are recovered where they occur and only logged.
#[derive(Error, Debug, PartialEq)]
pub enum FeatureAnomaly {
    #[error("Feature {index} has no usable geometry, dropping it")]
    MissingGeometry { index: usize },

    #[error("Feature {index} is missing attribute '{attribute}'")]
    MissingAttribute { index: usize, attribute: String },

    #[error("Feature {index} has a negative or missing duration")]
    NegativeOrMissingDuration { index: usize },
}
