use std::path::Path;

use anyhow::{Context, Result, anyhow};
use svg::Document;
use tiny_skia::{Pixmap, Transform};
use tracing::debug;

/// Rasterises `map` at `scale` times its canvas size.
pub(crate) fn render(map: &Document, scale: f32) -> Result<Pixmap> {
    if !(scale > 0.0 && scale.is_finite()) {
        return Err(anyhow!("raster scale must be positive, got {}", scale));
    }

    let opt = {
        let mut opt = usvg::Options::default();

        opt.fontdb_mut().load_system_fonts();

        opt
    };

    let tree = usvg::Tree::from_str(&map.to_string(), &opt).context("Failed to parse the SVG")?;

    let size = tree.size().to_int_size();
    let width = (size.width() as f32 * scale).ceil() as u32;
    let height = (size.height() as f32 * scale).ceil() as u32;

    debug!("Rendering {}x{} pixmap", width, height);

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| anyhow!("Couldn't create a {}x{} pixmap", width, height))?;

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap)
}

pub(crate) fn save_png(map: &Document, scale: f32, path: &Path) -> Result<()> {
    let pixmap = render(map, scale)?;

    pixmap
        .save_png(path)
        .with_context(|| format!("Failed to save PNG file {}", path.display()))
}
