use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use indicatif::ProgressBar;

use crate::{error::FeatureAnomaly, map::compose::MapDocument};

use super::feature::{AttributeValue, Dataset, DatasetRole, Feature, FeatureMap};

fn convert_feature(feature: geojson::Feature) -> Option<Feature> {
    let geometry: geo::Geometry = feature.geometry?.try_into().ok()?;
    let attributes: FeatureMap = feature
        .properties
        .map(|properties| {
            properties
                .iter()
                .map(|(key, value)| (key.to_owned(), AttributeValue::from(value)))
                .collect()
        })
        .unwrap_or_default();
    Some(Feature::new(geometry, attributes))
}

/// Read all features of a GeoJSON file into a dataset.
///
/// Features whose geometry is null or cannot be converted are dropped with a warning, the rest
/// keep their order.
pub fn read_dataset_from_geojson(filepath: &Path, role: DatasetRole) -> anyhow::Result<Dataset> {
    let contents = fs::read_to_string(filepath)
        .with_context(|| format!("Reading {} from {:?}", role.name(), filepath))?;
    let geojson: geojson::GeoJson = contents
        .parse()
        .with_context(|| format!("Parsing GeoJSON in {:?}", filepath))?;
    let geojson_features = match geojson {
        geojson::GeoJson::FeatureCollection(collection) => collection.features,
        geojson::GeoJson::Feature(feature) => vec![feature],
        geojson::GeoJson::Geometry(_) => {
            return Err(anyhow!(
                "Expected a Feature or FeatureCollection in {:?}, found a bare geometry",
                filepath
            ))
        }
    };

    let num_features = geojson_features.len();
    let bar = ProgressBar::new(num_features as u64);
    let mut features = Vec::with_capacity(num_features);
    for (index, geojson_feature) in geojson_features.into_iter().enumerate() {
        match convert_feature(geojson_feature) {
            Some(feature) => features.push(feature),
            None => log::warn!("{}", FeatureAnomaly::MissingGeometry { index }),
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    if features.len() != num_features {
        log::warn!(
            "Out of {} features read from {:?}, only {} had a usable geometry.",
            num_features,
            filepath,
            features.len()
        )
    }
    log::info!("Read {} {} features", features.len(), role.name());
    Ok(Dataset::new(role, features))
}

pub fn write_map_document(document: &MapDocument, output_filepath: &Path) -> anyhow::Result<()> {
    let contents = serde_json::to_string_pretty(document)?;
    fs::write(output_filepath, contents)
        .with_context(|| format!("Writing map document to {:?}", output_filepath))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use testdir::testdir;

    use crate::{
        geofile::feature::{AttributeValue, DatasetRole},
        map::pipeline::{build_walking_time_map, MapInputs, MapSettings},
    };

    use super::{read_dataset_from_geojson, write_map_document};

    const GRID: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[1.40, 43.60], [1.41, 43.60], [1.41, 43.61], [1.40, 43.61], [1.40, 43.60]]]},
                "properties": {"walking_time": 125.0, "nearest_resource_id": 42, "nearest_resource_name": null}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"walking_time": 300.0, "nearest_resource_id": 7}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[1.42, 43.60], [1.43, 43.60], [1.43, 43.61], [1.42, 43.61], [1.42, 43.60]]]},
                "properties": {"walking_time": 600.0, "nearest_resource_id": "P9", "nearest_resource_name": "Jardin Royal"}
            }
        ]
    }"#;

    const PARKS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.44, 43.60]}, "properties": {"id": "P9"}}
        ]
    }"#;

    #[rstest]
    fn test_read_drops_null_geometry() {
        let dir = testdir!();
        let filepath = dir.join("grid.geojson");
        fs::write(&filepath, GRID).unwrap();

        let dataset = read_dataset_from_geojson(&filepath, DatasetRole::MetricGrid).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.features[0].attribute("nearest_resource_id"),
            &AttributeValue::Number(42.0)
        );
        assert!(dataset.features[0].attribute("nearest_resource_name").is_null());
        assert_eq!(
            dataset.features[1].attribute("nearest_resource_name"),
            &AttributeValue::from("Jardin Royal")
        );
    }

    #[rstest]
    fn test_read_rejects_bare_geometry() {
        let dir = testdir!();
        let filepath = dir.join("point.geojson");
        fs::write(&filepath, r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#).unwrap();
        assert!(read_dataset_from_geojson(&filepath, DatasetRole::Boundary).is_err());
    }

    #[rstest]
    fn test_read_missing_file_fails() {
        let dir = testdir!();
        let filepath = dir.join("nope.geojson");
        assert!(read_dataset_from_geojson(&filepath, DatasetRole::Boundary).is_err());
    }

    #[rstest]
    fn test_write_map_document() {
        let dir = testdir!();
        let grid_filepath = dir.join("grid.geojson");
        let parks_filepath = dir.join("parks.geojson");
        fs::write(&grid_filepath, GRID).unwrap();
        fs::write(&parks_filepath, PARKS).unwrap();

        let inputs = MapInputs {
            grid: read_dataset_from_geojson(&grid_filepath, DatasetRole::MetricGrid).unwrap(),
            parks: read_dataset_from_geojson(&parks_filepath, DatasetRole::PointsOfInterest)
                .unwrap(),
            boundary: None,
        };
        let document = build_walking_time_map(&inputs, &MapSettings::default()).unwrap();
        let output_filepath = dir.join("map.json");
        write_map_document(&document, &output_filepath).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output_filepath).unwrap()).unwrap();
        assert_eq!(json["legend"]["min"], 125);
        assert_eq!(json["legend"]["max"], 600);
        assert_eq!(json["layers"][0]["features"][0]["geometry"]["type"], "Polygon");
        assert_eq!(
            json["layers"][0]["features"][0]["tooltipHtml"],
            "Temps à pieds : 2 minutes 5 secondes<br>Parc le plus proche : 42"
        );
        assert_eq!(json["layers"][1]["defaultVisible"], false);
        assert_eq!(json["basemaps"][0]["active"], true);
        assert_eq!(json["viewport"]["zoom"], 12);
    }
}
