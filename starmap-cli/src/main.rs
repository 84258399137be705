mod raster;

use starmap_core::{
    AreaReport, Boundary, ColorMap, RenderConfig, create_map, load_records,
    sample_protected_areas, write_csv,
};

use std::{
    fs::{File, create_dir_all as create_output_dir},
    io::BufWriter,
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use svg::save as save_as_svg;
use tracing::{Level, info};

const MAP_FILE_STEM: &str = "vietnam_protected_areas_xmas_tree";
const DATA_FILE_NAME: &str = "vietnam_protected_areas_data.csv";

#[derive(Parser, Debug)]
#[command(version, about = "Draws protected areas as glowing stars over a country outline", long_about = None)]
struct Args {
    /// GeoJSON file with the country boundary (GADM level 0)
    #[arg(short, long, default_value = "gadm41_VNM_0.json")]
    boundary: PathBuf,

    /// JSON array of {name, area_km2, lat, lon}; the built-in sample is used otherwise
    #[arg(short, long)]
    areas: Option<PathBuf>,

    /// Directory the map and the data export are written to
    #[arg(short, long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Marker area of the smallest protected area
    #[arg(long, default_value_t = 80.0)]
    min_size: f64,

    /// Marker area of the largest protected area
    #[arg(long, default_value_t = 1000.0)]
    max_size: f64,

    /// Boundary simplification tolerance, in degrees
    #[arg(long, default_value_t = 0.03)]
    tolerance: f64,

    /// Seed of the decorative background
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of largest areas to label
    #[arg(long, default_value_t = 10)]
    labels: usize,

    #[arg(short, long, default_value_t, value_enum)]
    colormap: ColorMap,

    /// Raster scale of the PNG relative to the SVG canvas
    #[arg(long, default_value_t = 2.0)]
    scale: f32,

    /// Title drawn above the map
    #[arg(long)]
    title: Option<String>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig {
            min_size: self.min_size,
            max_size: self.max_size,
            seed: self.seed,
            simplify_tolerance: self.tolerance,
            label_count: self.labels,
            color_map: self.colormap,
            ..Default::default()
        };

        if let Some(title) = &self.title {
            config.title = title.clone();
        }

        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let config = args.render_config();
    config.validate()?;

    let boundary = Boundary::load(&args.boundary, config.simplify_tolerance)
        .with_context(|| format!("Failed to load boundary {}", args.boundary.display()))?;

    let records = match &args.areas {
        Some(path) => load_records(path)
            .with_context(|| format!("Failed to load protected areas {}", path.display()))?,
        None => sample_protected_areas(),
    };

    if let Some(report) = AreaReport::from_records(&records, config.label_count) {
        println!("{}", report);
    }

    let map = create_map(&boundary, &records, &config)?;

    create_output_dir(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let svg_path = args.output_dir.join(format!("{}.svg", MAP_FILE_STEM));
    info!("Saving map as SVG to: {}", svg_path.display());
    save_as_svg(&svg_path, &map)
        .with_context(|| format!("Failed to save SVG file {}", svg_path.display()))?;

    let png_path = args.output_dir.join(format!("{}.png", MAP_FILE_STEM));
    info!("Saving map as PNG to: {}", png_path.display());
    raster::save_png(&map, args.scale, &png_path)?;

    let csv_path = args.output_dir.join(DATA_FILE_NAME);
    info!("Saving data to: {}", csv_path.display());
    let csv_file = File::create(&csv_path)
        .with_context(|| format!("Failed to create {}", csv_path.display()))?;
    write_csv(&records, BufWriter::new(csv_file))
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;

    println!("Done! Merry Christmas!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_the_reference_map() {
        let args = Args::parse_from(["starmap"]);
        let config = args.render_config();

        assert_eq!(args.boundary, PathBuf::from("gadm41_VNM_0.json"));
        assert_eq!(args.output_dir, PathBuf::from("outputs"));
        assert!(args.areas.is_none());
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn args_override_config() {
        let args = Args::parse_from([
            "starmap",
            "--min-size",
            "10",
            "--max-size",
            "500",
            "--seed",
            "7",
            "--labels",
            "3",
            "--colormap",
            "reds",
            "--title",
            "Stars",
        ]);
        let config = args.render_config();

        assert_eq!(config.min_size, 10.0);
        assert_eq!(config.max_size, 500.0);
        assert_eq!(config.seed, 7);
        assert_eq!(config.label_count, 3);
        assert_eq!(config.color_map, ColorMap::Reds);
        assert_eq!(config.title, "Stars");
    }
}
