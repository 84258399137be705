use crate::{
    algos::ColorMap,
    constants::{
        DEFAULT_CANVAS_WIDTH, DEFAULT_LABEL_COUNT, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE,
        DEFAULT_SEED, DEFAULT_SIMPLIFY_TOLERANCE, DEFAULT_TITLE,
    },
    error::{Error, Result},
};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    // Marker area, in square pixels, of the smallest protected area
    pub min_size: f64,
    // Marker area, in square pixels, of the largest protected area
    pub max_size: f64,
    // Seed of the decorative background, glyphs don't depend on it
    pub seed: u64,
    // Boundary simplification tolerance, in degrees (0.03 is about 3 km)
    pub simplify_tolerance: f64,
    // How many of the largest areas get a text label
    pub label_count: usize,
    pub color_map: ColorMap,
    // Width of the SVG canvas in pixels, the height follows the boundary
    pub canvas_width: f64,
    pub title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            seed: DEFAULT_SEED,
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
            label_count: DEFAULT_LABEL_COUNT,
            color_map: ColorMap::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            title: DEFAULT_TITLE.to_owned(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.min_size >= 0.0 && self.min_size < self.max_size) {
            return Err(Error::invalid_input(format!(
                "marker sizes must satisfy 0 <= min ({}) < max ({})",
                self.min_size, self.max_size
            )));
        }

        if !(self.canvas_width > 0.0 && self.canvas_width.is_finite()) {
            return Err(Error::invalid_input(format!(
                "canvas width {} must be positive",
                self.canvas_width
            )));
        }

        if !(self.simplify_tolerance >= 0.0) {
            return Err(Error::invalid_input(format!(
                "simplification tolerance {} must not be negative",
                self.simplify_tolerance
            )));
        }

        Ok(())
    }
}
