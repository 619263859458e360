extern crate log;
pub mod error;
pub mod geofile;
pub mod map;
pub mod style;
use crate::geofile::feature::DatasetRole;
use crate::geofile::geojson::{read_dataset_from_geojson, write_map_document};
use crate::map::pipeline::{build_walking_time_map, MapInputs, MapSettings};
use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

/// Render the walking time to the nearest park as an interactive map document.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

#[derive(Deserialize, Debug)]
struct Config {
    grid_path: PathBuf,
    parks_path: PathBuf,
    boundary_path: Option<PathBuf>,
    output_path: PathBuf,
    #[serde(default)]
    map: MapSettings,
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    if !Path::new(&args.config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", &args.config_filepath));
    }
    let config_contents = read_to_string(args.config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;

    let inputs = MapInputs {
        grid: read_dataset_from_geojson(&config.grid_path, DatasetRole::MetricGrid)?,
        parks: read_dataset_from_geojson(&config.parks_path, DatasetRole::PointsOfInterest)?,
        boundary: config
            .boundary_path
            .as_ref()
            .map(|path| read_dataset_from_geojson(path, DatasetRole::Boundary))
            .transpose()?,
    };

    let document = build_walking_time_map(&inputs, &config.map)?;
    log::info!("Writing map document to {:?}", &config.output_path);
    write_map_document(&document, &config.output_path)?;
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
