use rayon::prelude::*;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::{geofile::feature::Feature, style::feature_style::FeatureStyle};

use super::tooltip::Tooltip;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerOptions {
    /// Whether the layer is shown when the map first loads.
    pub default_visible: bool,
    /// Attach a highlight style shown while hovering a feature.
    pub highlight: bool,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            default_visible: true,
            highlight: false,
        }
    }
}

/// A feature with the style and tooltip that were computed for it alone.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledFeature {
    pub geometry: geo::Geometry,
    pub style: FeatureStyle,
    pub highlight: Option<FeatureStyle>,
    pub tooltip: Tooltip,
}

impl Serialize for StyledFeature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let geometry = geojson::Geometry::new(geojson::Value::from(&self.geometry));
        let mut state = serializer.serialize_struct("StyledFeature", 5)?;
        state.serialize_field("geometry", &geometry)?;
        state.serialize_field("style", &self.style)?;
        state.serialize_field("highlight", &self.highlight)?;
        state.serialize_field("tooltip", &self.tooltip)?;
        state.serialize_field("tooltipHtml", &self.tooltip.to_html())?;
        state.end()
    }
}

/// Named, independently toggleable group of styled features.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub name: String,
    pub default_visible: bool,
    pub features: Vec<StyledFeature>,
}

/// Build a layer, calling `style_fn` and `tooltip_fn` once per feature.
///
/// Every feature gets its own style value, nothing is shared between features. Feature order
/// is kept, so later features draw on top of earlier ones.
pub fn build_layer<S, T>(
    name: &str,
    features: &[Feature],
    style_fn: S,
    tooltip_fn: T,
    options: LayerOptions,
) -> Layer
where
    S: Fn(&Feature) -> FeatureStyle + Sync,
    T: Fn(&Feature) -> Tooltip + Sync,
{
    let features: Vec<StyledFeature> = features
        .par_iter()
        .map(|feature| {
            let style = style_fn(feature);
            let highlight = options.highlight.then(|| style.highlighted());
            StyledFeature {
                geometry: feature.geometry.clone(),
                style,
                highlight,
                tooltip: tooltip_fn(feature),
            }
        })
        .collect();
    log::debug!("Built layer '{}' with {} features", name, features.len());
    Layer {
        name: name.to_string(),
        default_visible: options.default_visible,
        features,
    }
}
