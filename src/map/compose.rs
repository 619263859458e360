use std::collections::HashSet;

use geo::Centroid;
use serde::{Deserialize, Serialize};

use crate::{
    error::MapError,
    geofile::feature::Dataset,
    style::{color::Rgb, color_scale::ValueColorScale},
};

use super::layer::Layer;

/// A tile basemap the user can switch to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basemap {
    pub name: String,
    pub tiles_url: String,
    pub attribution: String,
}

impl Basemap {
    pub fn new(name: &str, tiles_url: &str, attribution: &str) -> Self {
        Self {
            name: name.to_string(),
            tiles_url: tiles_url.to_string(),
            attribution: attribution.to_string(),
        }
    }
}

pub fn default_basemaps() -> Vec<Basemap> {
    vec![
        Basemap::new(
            "OpenStreetMap",
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            "&copy; OpenStreetMap contributors",
        ),
        Basemap::new(
            "CartoDB Positron",
            "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
            "&copy; OpenStreetMap contributors &copy; CARTO",
        ),
        Basemap::new(
            "CartoDB Dark Matter",
            "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
            "&copy; OpenStreetMap contributors &copy; CARTO",
        ),
    ]
}

/// Color legend of the choropleth, bound to a fitted scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub caption: String,
    pub min: i64,
    pub max: i64,
    pub colors: Vec<Rgb>,
}

impl Legend {
    pub fn from_scale(scale: &ValueColorScale, caption: &str) -> Self {
        Self {
            caption: caption.to_string(),
            min: scale.min().round() as i64,
            max: scale.max().round() as i64,
            colors: scale.colors().to_vec(),
        }
    }
}

/// Interactive widgets. Each is independent of the others and of layer styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub search: bool,
    pub fullscreen: bool,
    pub layer_switch: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            search: true,
            fullscreen: true,
            layer_switch: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLon,
    pub zoom: u8,
}

impl Viewport {
    pub fn fixed(center: LatLon, zoom: u8) -> Self {
        Self { center, zoom }
    }

    /// Center on the mean of the feature centroids of `dataset`.
    pub fn fitted_to(dataset: &Dataset, zoom: u8) -> Result<Self, MapError> {
        let centroids: Vec<geo::Point> = dataset
            .features
            .iter()
            .filter_map(|feature| feature.geometry.centroid())
            .collect();
        if centroids.is_empty() {
            return Err(MapError::EmptyDataset(dataset.role.name().to_string()));
        }
        let count = centroids.len() as f64;
        let (sum_x, sum_y) = centroids
            .iter()
            .fold((0.0, 0.0), |(x, y), point| (x + point.x(), y + point.y()));
        Ok(Self {
            center: LatLon {
                lat: sum_y / count,
                lon: sum_x / count,
            },
            zoom,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasemapEntry {
    #[serde(flatten)]
    pub basemap: Basemap,
    pub active: bool,
}

/// Render-ready map. Nothing mutates it after `compose` returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    basemaps: Vec<BasemapEntry>,
    layers: Vec<Layer>,
    legend: Legend,
    controls: Controls,
    viewport: Viewport,
}

impl MapDocument {
    pub fn basemaps(&self) -> &[BasemapEntry] {
        &self.basemaps
    }

    pub fn active_basemap(&self) -> &Basemap {
        // compose guarantees exactly one active entry.
        &self.basemaps[0].basemap
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

/// Assemble the map document. The first basemap is active, the rest are switchable.
/// Layers keep their order, bottom to top.
pub fn compose(
    basemaps: &[Basemap],
    layers: Vec<Layer>,
    legend: Legend,
    controls: Controls,
    viewport: Viewport,
) -> Result<MapDocument, MapError> {
    if basemaps.is_empty() {
        return Err(MapError::NoBasemap);
    }
    let mut names = HashSet::new();
    for layer in &layers {
        if !names.insert(layer.name.as_str()) {
            return Err(MapError::DuplicateLayerName(layer.name.clone()));
        }
    }
    let basemaps = basemaps
        .iter()
        .enumerate()
        .map(|(index, basemap)| BasemapEntry {
            basemap: basemap.clone(),
            active: index == 0,
        })
        .collect();
    Ok(MapDocument {
        basemaps,
        layers,
        legend,
        controls,
        viewport,
    })
}
