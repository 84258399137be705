use super::RngHandler;
use crate::{
    constants::{DARK_GREENS, ORNAMENT_COLORS, PINE_GREENS, TOP_STAR_COLOR, TRUNK_BROWNS},
    types::{Bounds, DrawPrimitive, Rgba, Vector2},
};

use rand::Rng;
use tracing::{Level, span};

const TRUNK_WIDTH: f64 = 0.05;
const TRUNK_HEIGHT: f64 = 0.12;

// The tree overshoots the bounds by this share of the height at both ends
const TREE_OVERSHOOT: f64 = 0.05;
const TREE_BASE_WIDTH: f64 = 1.1;
const TREE_TAPER: f64 = 0.75;

const SEGMENT_COUNT: usize = 15;
const SEGMENT_OVERLAP: f64 = 1.4;
const EDGE_POINTS: usize = 15;
const CAP_POINTS: usize = 5;
const EDGE_JITTER_X: f64 = 0.015;
const EDGE_JITTER_Y: f64 = 0.008;

const NEEDLE_CLUSTERS: usize = 60;
const ORNAMENTS: usize = 22;
const TOP_STAR_LAYERS: usize = 3;

/// Primitives of the decorative tree, in data units. The background sits
/// under the boundary outline. Baubles, highlights and the top star are
/// interleaved with the glyph layers.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayers {
    pub background: Vec<DrawPrimitive>,
    pub baubles: Vec<DrawPrimitive>,
    pub highlights: Vec<DrawPrimitive>,
    pub top_star: Vec<DrawPrimitive>,
}

#[derive(Debug, Clone, Copy)]
struct TreeFrame {
    center_x: f64,
    width: f64,
    height: f64,
    base_y: f64,
    branch_base_y: f64,
    top_y: f64,
    trunk_width: f64,
    trunk_height: f64,
    base_width: f64,
}

impl TreeFrame {
    fn new(bounds: &Bounds) -> Self {
        let width = bounds.width();
        let height = bounds.height();

        let base_y = bounds.min_y - TREE_OVERSHOOT * height;
        let top_y = bounds.max_y + TREE_OVERSHOOT * height;
        let trunk_height = height * TRUNK_HEIGHT;

        TreeFrame {
            center_x: bounds.center().x,
            width,
            height,
            base_y,
            branch_base_y: base_y + trunk_height,
            top_y,
            trunk_width: width * TRUNK_WIDTH,
            trunk_height,
            base_width: width * TREE_BASE_WIDTH,
        }
    }

    fn tree_height(&self) -> f64 {
        self.top_y - self.base_y
    }

    // Height along the branches for a tier position in [0, 1]
    fn tier_y(&self, tier: f64) -> f64 {
        self.branch_base_y + tier * (self.top_y - self.branch_base_y)
    }

    fn width_at(&self, tier: f64) -> f64 {
        self.base_width * (1.0 - tier * TREE_TAPER)
    }
}

// One overlapping trapezoid of the tree body
struct Segment {
    center_x: f64,
    y_bottom: f64,
    height: f64,
    width_bottom: f64,
    width_top: f64,
    jitter_x: f64,
    jitter_y: f64,
}

impl Segment {
    fn edge_point(&self, i: usize, side: f64, rng: &mut impl Rng) -> Vector2 {
        let t = i as f64 / (EDGE_POINTS - 1) as f64;
        let w = self.width_bottom + t * (self.width_top - self.width_bottom);

        Vector2::new(
            self.center_x + side * w / 2.0 + jitter(rng, self.jitter_x),
            self.y_bottom + t * self.height + jitter(rng, self.jitter_y),
        )
    }

    fn cap_point(&self, i: usize, width: f64, y: f64, rng: &mut impl Rng) -> Vector2 {
        let t = i as f64 / (CAP_POINTS - 1) as f64;

        Vector2::new(
            self.center_x - width / 2.0 + t * width,
            y + jitter(rng, self.jitter_y),
        )
    }

    // Left edge up, top edge right, right edge down, bottom edge left
    fn outline(&self, rng: &mut impl Rng) -> Vec<Vector2> {
        let mut points = Vec::with_capacity(2 * EDGE_POINTS + 2 * CAP_POINTS);

        for i in 0..EDGE_POINTS {
            points.push(self.edge_point(i, -1.0, rng));
        }

        let y_top = self.y_bottom + self.height;
        for i in 0..CAP_POINTS {
            points.push(self.cap_point(i, self.width_top, y_top, rng));
        }

        for i in (0..EDGE_POINTS).rev() {
            points.push(self.edge_point(i, 1.0, rng));
        }

        for i in (1..=CAP_POINTS).rev() {
            points.push(self.cap_point(i, self.width_bottom, self.y_bottom, rng));
        }

        points
    }
}

pub struct TreePainter;

impl TreePainter {
    /// Paints a watercolour Christmas tree covering `bounds`. The same seed
    /// always yields the same tree.
    pub fn paint(bounds: &Bounds, seed: u64) -> TreeLayers {
        let span = span!(Level::DEBUG, "paint_tree");
        let _guard = span.enter();

        let mut rng = RngHandler::seeded(seed);
        let frame = TreeFrame::new(bounds);

        let mut background = Self::trunk(&frame);
        background.extend(Self::segments(&frame, &mut rng));
        background.extend(Self::needles(&frame, &mut rng));

        let (baubles, highlights) = Self::baubles(&frame, &mut rng);

        TreeLayers {
            background,
            baubles,
            highlights,
            top_star: Self::top_star(&frame),
        }
    }

    fn trunk(frame: &TreeFrame) -> Vec<DrawPrimitive> {
        TRUNK_BROWNS
            .iter()
            .enumerate()
            .map(|(i, color)| {
                let inset = i as f64 * frame.trunk_width * 0.08;

                DrawPrimitive::Rect {
                    origin: Vector2::new(
                        frame.center_x - frame.trunk_width / 2.0 + inset,
                        frame.base_y,
                    ),
                    width: frame.trunk_width - inset * 2.0,
                    height: frame.trunk_height,
                    fill: *color,
                    opacity: 0.25 - i as f64 * 0.05,
                }
            })
            .collect()
    }

    fn segments(frame: &TreeFrame, rng: &mut impl Rng) -> Vec<DrawPrimitive> {
        let height = frame.tree_height() / SEGMENT_COUNT as f64 * SEGMENT_OVERLAP;

        (0..SEGMENT_COUNT)
            .map(|seg| {
                let seg_t = seg as f64 / SEGMENT_COUNT as f64;

                let segment = Segment {
                    center_x: frame.center_x,
                    y_bottom: frame.tier_y(seg_t),
                    height,
                    width_bottom: frame.width_at(seg_t),
                    width_top: frame.width_at((seg_t + 1.0 / SEGMENT_COUNT as f64).min(1.0)),
                    jitter_x: frame.width * EDGE_JITTER_X,
                    jitter_y: frame.height * EDGE_JITTER_Y,
                };

                let points = segment.outline(rng);

                let (fill, opacity) = if seg % 2 == 0 {
                    (pick(rng, &DARK_GREENS), 0.14)
                } else {
                    (pick(rng, &PINE_GREENS), 0.12)
                };

                DrawPrimitive::Polygon {
                    points,
                    fill,
                    opacity,
                }
            })
            .collect()
    }

    fn needles(frame: &TreeFrame, rng: &mut impl Rng) -> Vec<DrawPrimitive> {
        (0..NEEDLE_CLUSTERS)
            .map(|_| {
                let tier = rng.random_range(0.05..=0.95);
                let half = frame.width_at(tier) / 2.0 * 0.8;

                let center = Vector2::new(frame.center_x + jitter(rng, half), frame.tier_y(tier));
                let radius = frame.width * rng.random_range(0.01..=0.02);

                DrawPrimitive::Circle {
                    center,
                    radius,
                    fill: pick(rng, &PINE_GREENS),
                    opacity: rng.random_range(0.08..=0.14),
                }
            })
            .collect()
    }

    // Returns the baubles and their highlights
    fn baubles(
        frame: &TreeFrame,
        rng: &mut impl Rng,
    ) -> (Vec<DrawPrimitive>, Vec<DrawPrimitive>) {
        let mut baubles = Vec::with_capacity(ORNAMENTS);
        let mut highlights = Vec::with_capacity(ORNAMENTS);

        for _ in 0..ORNAMENTS {
            let tier = rng.random_range(0.15..=0.88);
            let half = frame.width_at(tier) / 2.0 * 0.65;

            let center = Vector2::new(frame.center_x + jitter(rng, half), frame.tier_y(tier));
            let radius = frame.width * rng.random_range(0.013..=0.027);

            baubles.push(DrawPrimitive::Circle {
                center,
                radius,
                fill: pick(rng, &ORNAMENT_COLORS),
                opacity: 0.38,
            });

            // Up and to the left
            highlights.push(DrawPrimitive::Circle {
                center: center.offset_by(-radius * 0.3, radius * 0.3),
                radius: radius * 0.28,
                fill: Rgba::WHITE,
                opacity: 0.28,
            });
        }

        (baubles, highlights)
    }

    fn top_star(frame: &TreeFrame) -> Vec<DrawPrimitive> {
        let center = Vector2::new(frame.center_x, frame.top_y + frame.height * 0.015);
        let radius = frame.width * 0.065;

        (0..TOP_STAR_LAYERS)
            .map(|i| DrawPrimitive::Star {
                center,
                radius: radius * (1.0 - i as f64 * 0.18),
                fill: TOP_STAR_COLOR,
                opacity: 0.38 - i as f64 * 0.08,
            })
            .collect()
    }
}

fn pick(rng: &mut impl Rng, palette: &[Rgba]) -> Rgba {
    palette[rng.random_range(0..palette.len())]
}

fn jitter(rng: &mut impl Rng, amount: f64) -> f64 {
    rng.random_range(-amount..=amount)
}
