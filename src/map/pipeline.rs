use serde::Deserialize;

use crate::{
    error::{FeatureAnomaly, MapError},
    geofile::feature::{Dataset, Feature},
    style::{
        color::parse_colors,
        color_scale::ValueColorScale,
        feature_style::{FeatureStyle, MetricStyle},
        label::{format_walking_time, resolve_label, PLACEHOLDER},
    },
};

use super::{
    compose::{compose, default_basemaps, Basemap, Controls, LatLon, Legend, MapDocument, Viewport},
    layer::{build_layer, LayerOptions},
    tooltip::Tooltip,
};

pub const WALKING_TIME_LABEL: &str = "Temps à pieds";
pub const NEAREST_PARK_LABEL: &str = "Parc le plus proche";
pub const PARK_LABEL: &str = "Parc";

/// Extra numeric attribute of grid cells shown in tooltips, e.g. household counts.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AuxiliaryAttribute {
    pub attribute: String,
    pub label: String,
}

/// Attribute names of the walking time grid.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridSchema {
    pub time_attribute: String,
    pub id_attribute: String,
    pub name_attribute: String,
    pub auxiliary: Vec<AuxiliaryAttribute>,
}

impl Default for GridSchema {
    fn default() -> Self {
        Self {
            time_attribute: "walking_time".to_string(),
            id_attribute: "nearest_resource_id".to_string(),
            name_attribute: "nearest_resource_name".to_string(),
            auxiliary: vec![],
        }
    }
}

/// Attribute names of the park dataset.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PoiSchema {
    pub id_attribute: String,
    pub name_attribute: String,
}

impl Default for PoiSchema {
    fn default() -> Self {
        Self {
            id_attribute: "id".to_string(),
            name_attribute: "name".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MapSettings {
    pub grid: GridSchema,
    pub parks: PoiSchema,
    pub control_colors: Vec<String>,
    pub legend_caption: String,
    pub grid_layer_name: String,
    pub parks_layer_name: String,
    pub boundary_layer_name: String,
    pub parks_visible: bool,
    pub highlight: bool,
    pub basemaps: Vec<Basemap>,
    pub controls: Controls,
    pub zoom: u8,
    pub center: Option<LatLon>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            grid: GridSchema::default(),
            parks: PoiSchema::default(),
            control_colors: ["#ffffd4", "#fed98e", "#fe9929", "#d95f0e", "#993404"]
                .iter()
                .map(|color| color.to_string())
                .collect(),
            legend_caption: "Temps à pieds (secondes)".to_string(),
            grid_layer_name: "Temps à pieds".to_string(),
            parks_layer_name: "Parcs".to_string(),
            boundary_layer_name: "Limite communale".to_string(),
            parks_visible: false,
            highlight: true,
            basemaps: default_basemaps(),
            controls: Controls::default(),
            zoom: 12,
            center: None,
        }
    }
}

/// Datasets the map is built from, already loaded.
pub struct MapInputs {
    pub grid: Dataset,
    pub parks: Dataset,
    pub boundary: Option<Dataset>,
}

fn walking_time(feature: &Feature, schema: &GridSchema) -> Option<f64> {
    feature.attribute(&schema.time_attribute).as_f64()
}

fn grid_tooltip(feature: &Feature, schema: &GridSchema) -> Tooltip {
    let duration = format_walking_time(walking_time(feature, schema))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let nearest_park = resolve_label(
        feature.attribute(&schema.name_attribute),
        feature.attribute(&schema.id_attribute),
    );
    schema.auxiliary.iter().fold(
        Tooltip::new()
            .with_entry(WALKING_TIME_LABEL, duration)
            .with_entry(NEAREST_PARK_LABEL, nearest_park),
        |tooltip, auxiliary| {
            let value = feature
                .attribute(&auxiliary.attribute)
                .display()
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            tooltip.with_entry(&auxiliary.label, value)
        },
    )
}

fn park_tooltip(feature: &Feature, schema: &PoiSchema) -> Tooltip {
    Tooltip::new().with_entry(
        PARK_LABEL,
        resolve_label(
            feature.attribute(&schema.name_attribute),
            feature.attribute(&schema.id_attribute),
        ),
    )
}

fn has_label(feature: &Feature, name_attribute: &str, id_attribute: &str) -> bool {
    resolve_label(
        feature.attribute(name_attribute),
        feature.attribute(id_attribute),
    ) != PLACEHOLDER
}

fn log_grid_anomalies(grid: &Dataset, schema: &GridSchema) {
    let mut missing_durations = 0;
    let mut missing_parks = 0;
    for (index, feature) in grid.features.iter().enumerate() {
        if !matches!(walking_time(feature, schema), Some(value) if value >= 0.0) {
            log::warn!("{}", FeatureAnomaly::NegativeOrMissingDuration { index });
            missing_durations += 1;
        }
        if !has_label(feature, &schema.name_attribute, &schema.id_attribute) {
            log::warn!(
                "{}",
                FeatureAnomaly::MissingAttribute {
                    index,
                    attribute: schema.id_attribute.clone(),
                }
            );
            missing_parks += 1;
        }
    }
    if 0 < missing_durations {
        log::warn!(
            "{} of {} grid cells have no usable walking time and are drawn neutral",
            missing_durations,
            grid.len()
        );
    }
    if 0 < missing_parks {
        log::warn!(
            "{} of {} grid cells have no nearest park identifier",
            missing_parks,
            grid.len()
        );
    }
}

fn log_park_anomalies(parks: &Dataset, schema: &PoiSchema) {
    let mut unlabelled = 0;
    for (index, feature) in parks.features.iter().enumerate() {
        if !has_label(feature, &schema.name_attribute, &schema.id_attribute) {
            log::warn!(
                "{}",
                FeatureAnomaly::MissingAttribute {
                    index,
                    attribute: schema.id_attribute.clone(),
                }
            );
            unlabelled += 1;
        }
    }
    if 0 < unlabelled {
        log::warn!(
            "{} of {} parks have neither a name nor an identifier",
            unlabelled,
            parks.len()
        );
    }
}

/// Build the walking time map: fit the scale, style and label every feature, build the layers
/// and compose them with basemaps, legend and controls. Any structural error aborts the build.
pub fn build_walking_time_map(
    inputs: &MapInputs,
    settings: &MapSettings,
) -> Result<MapDocument, MapError> {
    if inputs.grid.is_empty() {
        return Err(MapError::EmptyDataset(inputs.grid.role.name().to_string()));
    }
    let schema = &settings.grid;

    let scale = ValueColorScale::fit(
        inputs
            .grid
            .numeric_values(&schema.time_attribute)
            .filter(|value| *value >= 0.0),
        parse_colors(&settings.control_colors)?,
    )?;
    log::info!(
        "Fitted color scale to walking times in [{}, {}]",
        scale.min(),
        scale.max()
    );
    log_grid_anomalies(&inputs.grid, schema);
    log_park_anomalies(&inputs.parks, &settings.parks);

    let metric_style = MetricStyle::new(&scale);
    let mut layers = vec![build_layer(
        &settings.grid_layer_name,
        &inputs.grid.features,
        |feature| metric_style.style_for(walking_time(feature, schema)),
        |feature| grid_tooltip(feature, schema),
        LayerOptions {
            default_visible: true,
            highlight: settings.highlight,
        },
    )];
    layers.push(build_layer(
        &settings.parks_layer_name,
        &inputs.parks.features,
        |feature| FeatureStyle::park(&feature.geometry),
        |feature| park_tooltip(feature, &settings.parks),
        LayerOptions {
            default_visible: settings.parks_visible,
            highlight: false,
        },
    ));
    if let Some(boundary) = &inputs.boundary {
        layers.push(build_layer(
            &settings.boundary_layer_name,
            &boundary.features,
            |_| FeatureStyle::boundary(),
            |_| Tooltip::new(),
            LayerOptions::default(),
        ));
    }
    log::info!("Built {} layers", layers.len());

    let viewport = match settings.center {
        Some(center) => Viewport::fixed(center, settings.zoom),
        None => Viewport::fitted_to(&inputs.grid, settings.zoom)?,
    };

    compose(
        &settings.basemaps,
        layers,
        Legend::from_scale(&scale, &settings.legend_caption),
        settings.controls,
        viewport,
    )
}
