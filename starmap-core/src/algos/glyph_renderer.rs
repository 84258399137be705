use crate::{
    constants::{GLYPH_OUTLINE, STAR_POINTS},
    types::{DrawPrimitive, GlyphSpec, Marker, MarkerShape, Outline, Rgba, Vector2},
};

use std::f64::consts::{FRAC_PI_2, PI};

use rayon::prelude::*;

// (size multiplier, opacity, white fill) for the glow layers, outermost first
const GLOW_LAYERS: [(f64, f64, bool); 3] = [
    (2.5, 0.15, false),
    (1.8, 0.25, false),
    (1.3, 0.35, true),
];

const FOREGROUND_OPACITY: f64 = 0.95;
const FOREGROUND_OUTLINE_WIDTH: f64 = 1.2;

const SPARKLE_SIZE_FACTOR: f64 = 0.08;
const SPARKLE_OPACITY: f64 = 0.7;
const SPARKLE_RADIUS_FACTOR: f64 = 0.6;

/// Number of primitives in every glyph: the glow layers, the foreground star
/// and one sparkle per star tip.
pub const GLYPH_LAYER_COUNT: usize = GLOW_LAYERS.len() + 1 + STAR_POINTS;

pub struct StarGlyphRenderer;

impl StarGlyphRenderer {
    /// Builds the primitives of one glyph, back to front.
    pub fn render_glyph(center: Vector2, base_size: f64, color: Rgba) -> Vec<DrawPrimitive> {
        let mut primitives = Vec::with_capacity(GLYPH_LAYER_COUNT);

        for (factor, opacity, white) in GLOW_LAYERS {
            primitives.push(DrawPrimitive::Marker(Marker {
                shape: MarkerShape::Star,
                center,
                size: base_size * factor,
                fill: if white { Rgba::WHITE } else { color },
                opacity,
                outline: None,
            }));
        }

        primitives.push(DrawPrimitive::Marker(Marker {
            shape: MarkerShape::Star,
            center,
            size: base_size,
            fill: color,
            opacity: FOREGROUND_OPACITY,
            outline: Some(Outline {
                color: GLYPH_OUTLINE,
                width: FOREGROUND_OUTLINE_WIDTH,
            }),
        }));

        primitives.extend(Self::tip_positions(center, base_size).into_iter().map(|tip| {
            DrawPrimitive::Marker(Marker {
                shape: MarkerShape::Circle,
                center: tip,
                size: base_size * SPARKLE_SIZE_FACTOR,
                fill: Rgba::WHITE,
                opacity: SPARKLE_OPACITY,
                outline: None,
            })
        }));

        primitives
    }

    pub fn render_spec(spec: &GlyphSpec) -> Vec<DrawPrimitive> {
        Self::render_glyph(spec.center, spec.base_size, spec.color)
    }

    /// Renders every glyph. Glyphs are independent so they are built in
    /// parallel, the output keeps the order of `specs`.
    pub fn render_all(specs: &[GlyphSpec]) -> Vec<Vec<DrawPrimitive>> {
        specs.par_iter().map(Self::render_spec).collect()
    }

    /// Flattens glyphs layer by layer: every outer glow first, then every
    /// mid glow, and so on, so no glow is drawn over another glyph's star.
    pub fn stack_layers(glyphs: Vec<Vec<DrawPrimitive>>) -> Vec<DrawPrimitive> {
        let mut layers: Vec<Vec<DrawPrimitive>> =
            vec![Vec::with_capacity(glyphs.len()); GLYPH_LAYER_COUNT];

        for glyph in glyphs {
            for (layer, primitive) in glyph.into_iter().enumerate() {
                layers[layer].push(primitive);
            }
        }

        layers.into_iter().flatten().collect()
    }

    pub fn tip_positions(center: Vector2, base_size: f64) -> [Vector2; STAR_POINTS] {
        let tip_radius = (base_size / PI).sqrt() * SPARKLE_RADIUS_FACTOR;

        std::array::from_fn(|i| {
            let angle = i as f64 * 2.0 * PI / STAR_POINTS as f64 + FRAC_PI_2;
            center.polar_offset(tip_radius, angle)
        })
    }
}
