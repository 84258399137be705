mod area_scaler;
mod colormap;
mod glyph_renderer;
mod simplify;
mod tree_painter;

pub use area_scaler::AreaScaler;
pub use colormap::{ColorMap, normalize};
pub use glyph_renderer::{GLYPH_LAYER_COUNT, StarGlyphRenderer};
pub(crate) use simplify::Simplifier;
pub use tree_painter::{TreeLayers, TreePainter};

use rand::{SeedableRng, rngs::StdRng};

pub(crate) struct RngHandler;

impl RngHandler {
    // Decoration only: the data-driven glyphs never draw from this
    pub fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }
}
