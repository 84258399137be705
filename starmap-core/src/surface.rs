use crate::{
    constants::{
        AXES_BACKGROUND, CANVAS_MARGIN, FIGURE_BACKGROUND, STAR_INNER_RATIO, STAR_POINTS,
        TITLE_BAND_HEIGHT, TITLE_COLOR, TITLE_FONT_SIZE,
    },
    types::{Bounds, DrawPrimitive, Marker, MarkerShape, Rgba, Vector2},
};

use std::f64::consts::{FRAC_PI_2, PI};

use svg::{
    Document, Node,
    node::element::{
        Circle, ClipPath, Definitions, Group, Path, Polygon, Rectangle, Text, path::Data,
    },
};

const PLOT_CLIP_ID: &str = "plot-area";
const FONT_FAMILY: &str = "DejaVu Sans, sans-serif";
// Rough advance of one glyph relative to the font size, for label boxes
const CHAR_WIDTH_RATIO: f64 = 0.6;
const LABEL_PADDING: f64 = 3.0;

/// Explicit drawing context the map is composed on. Primitives arrive in
/// plot space: pixels, origin at the bottom-left corner, y pointing up.
pub trait DrawSurface {
    fn draw(&mut self, primitive: &DrawPrimitive);

    fn draw_all<'a>(&mut self, primitives: impl IntoIterator<Item = &'a DrawPrimitive>)
    where
        Self: Sized,
    {
        for primitive in primitives {
            self.draw(primitive);
        }
    }
}

/// Keeps the primitives in draw order, useful to inspect a composition.
impl DrawSurface for Vec<DrawPrimitive> {
    fn draw(&mut self, primitive: &DrawPrimitive) {
        self.push(primitive.clone());
    }
}

/// Placement of the plot area on the canvas, in SVG pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub width: f64,
    pub height: f64,
    pub plot_origin: Vector2,
    pub plot_width: f64,
    pub plot_height: f64,
}

impl CanvasLayout {
    /// Lays out a canvas `width` pixels wide showing `limits` with equal
    /// aspect under a title band.
    pub fn fit(limits: &Bounds, width: f64) -> CanvasLayout {
        let plot_width = (width - 2.0 * CANVAS_MARGIN).max(1.0);
        let plot_height = limits.height() * plot_width / limits.width();

        CanvasLayout {
            width,
            height: TITLE_BAND_HEIGHT + plot_height + CANVAS_MARGIN,
            plot_origin: Vector2::new(CANVAS_MARGIN, TITLE_BAND_HEIGHT),
            plot_width,
            plot_height,
        }
    }

    // Plot space (y up) to SVG space (y down)
    fn to_canvas(&self, point: &Vector2) -> (f64, f64) {
        (
            self.plot_origin.x + point.x,
            self.plot_origin.y + self.plot_height - point.y,
        )
    }
}

pub struct SvgSurface {
    layout: CanvasLayout,
    document: Document,
    plot: Group,
}

impl SvgSurface {
    pub fn new(layout: CanvasLayout, title: &str) -> Self {
        let clip = ClipPath::new().set("id", PLOT_CLIP_ID).add(
            Rectangle::new()
                .set("x", layout.plot_origin.x)
                .set("y", layout.plot_origin.y)
                .set("width", layout.plot_width)
                .set("height", layout.plot_height),
        );

        let document = Document::new()
            .set("width", layout.width)
            .set("height", layout.height)
            .set("viewBox", (0.0, 0.0, layout.width, layout.height))
            .add(Definitions::new().add(clip))
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", FIGURE_BACKGROUND.to_hex()),
            )
            .add(
                Text::new(title)
                    .set("x", layout.width / 2.0)
                    .set("y", TITLE_BAND_HEIGHT / 2.0 + TITLE_FONT_SIZE / 3.0)
                    .set("text-anchor", "middle")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", TITLE_FONT_SIZE)
                    .set("font-weight", "bold")
                    .set("fill", TITLE_COLOR.to_hex()),
            );

        let plot = Group::new()
            .set("clip-path", format!("url(#{})", PLOT_CLIP_ID))
            .add(
                Rectangle::new()
                    .set("x", layout.plot_origin.x)
                    .set("y", layout.plot_origin.y)
                    .set("width", layout.plot_width)
                    .set("height", layout.plot_height)
                    .set("fill", AXES_BACKGROUND.to_hex()),
            );

        SvgSurface {
            layout,
            document,
            plot,
        }
    }

    pub fn layout(&self) -> &CanvasLayout {
        &self.layout
    }

    pub fn finish(self) -> Document {
        self.document.add(self.plot)
    }

    fn points_attr(&self, points: impl IntoIterator<Item = Vector2>) -> String {
        points
            .into_iter()
            .map(|p| {
                let (x, y) = self.layout.to_canvas(&p);
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn draw_marker(&mut self, marker: &Marker) {
        let radius = marker.radius();
        let opacity = marker.opacity * marker.fill.alpha();

        match marker.shape {
            MarkerShape::Star => {
                let polygon = Polygon::new()
                    .set(
                        "points",
                        self.points_attr(star_vertices(marker.center, radius)),
                    )
                    .set("fill", marker.fill.to_hex())
                    .set("opacity", opacity);
                self.plot.append(with_outline(polygon, marker));
            }
            MarkerShape::Circle => {
                let (cx, cy) = self.layout.to_canvas(&marker.center);
                let circle = Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", radius)
                    .set("fill", marker.fill.to_hex())
                    .set("opacity", opacity);
                self.plot.append(with_outline(circle, marker));
            }
        }
    }

    fn draw_label(&mut self, text: &str, anchor: &Vector2, offset: &Vector2, style: LabelStyle) {
        let (x, y) = self.layout.to_canvas(&anchor.offset_by(offset.x, offset.y));

        let text_width = text.chars().count() as f64 * style.font_size * CHAR_WIDTH_RATIO;

        self.plot.append(
            Rectangle::new()
                .set("x", x - LABEL_PADDING)
                .set("y", y - style.font_size - LABEL_PADDING / 2.0)
                .set("width", text_width + 2.0 * LABEL_PADDING)
                .set("height", style.font_size + 2.0 * LABEL_PADDING)
                .set("rx", LABEL_PADDING)
                .set("fill", Rgba::WHITE.to_hex())
                .set("fill-opacity", 0.85)
                .set("stroke", style.border.to_hex())
                .set("stroke-width", 0.8),
        );

        self.plot.append(
            Text::new(text)
                .set("x", x)
                .set("y", y)
                .set("font-family", FONT_FAMILY)
                .set("font-size", style.font_size)
                .set("fill", style.color.to_hex())
                .set("fill-opacity", 0.9),
        );
    }
}

fn with_outline<T: Node>(mut node: T, marker: &Marker) -> T {
    match marker.outline {
        Some(outline) => {
            node.assign("stroke", outline.color.to_hex());
            node.assign("stroke-width", outline.width);
            node.assign("stroke-linejoin", "round");
        }
        None => node.assign("stroke", "none"),
    }

    node
}

#[derive(Debug, Clone, Copy)]
struct LabelStyle {
    font_size: f64,
    color: Rgba,
    border: Rgba,
}

impl DrawSurface for SvgSurface {
    fn draw(&mut self, primitive: &DrawPrimitive) {
        match primitive {
            DrawPrimitive::Marker(marker) => self.draw_marker(marker),
            DrawPrimitive::Polygon {
                points,
                fill,
                opacity,
            } => {
                let polygon = Polygon::new()
                    .set("points", self.points_attr(points.iter().copied()))
                    .set("fill", fill.to_hex())
                    .set("stroke", "none")
                    .set("opacity", opacity * fill.alpha());
                self.plot.append(polygon);
            }
            DrawPrimitive::Rect {
                origin,
                width,
                height,
                fill,
                opacity,
            } => {
                // The top-left corner in SVG is the top of the rect in plot space
                let (x, y) = self.layout.to_canvas(&origin.offset_by(0.0, *height));
                let rect = Rectangle::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", *width)
                    .set("height", *height)
                    .set("fill", fill.to_hex())
                    .set("opacity", opacity * fill.alpha());
                self.plot.append(rect);
            }
            DrawPrimitive::Circle {
                center,
                radius,
                fill,
                opacity,
            } => {
                let (cx, cy) = self.layout.to_canvas(center);
                let circle = Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", *radius)
                    .set("fill", fill.to_hex())
                    .set("opacity", opacity * fill.alpha());
                self.plot.append(circle);
            }
            DrawPrimitive::Star {
                center,
                radius,
                fill,
                opacity,
            } => {
                let polygon = Polygon::new()
                    .set("points", self.points_attr(star_vertices(*center, *radius)))
                    .set("fill", fill.to_hex())
                    .set("stroke", "none")
                    .set("opacity", opacity * fill.alpha());
                self.plot.append(polygon);
            }
            DrawPrimitive::Outline {
                rings,
                stroke,
                opacity,
            } => {
                let mut data = Data::new();

                for ring in rings.iter().filter(|ring| !ring.is_empty()) {
                    for (i, point) in ring.iter().enumerate() {
                        let (x, y) = self.layout.to_canvas(point);
                        let xy = (x as f32, y as f32);
                        data = if i == 0 {
                            data.move_to(xy)
                        } else {
                            data.line_to(xy)
                        };
                    }
                    data = data.close();
                }

                let path = Path::new()
                    .set("fill", "none")
                    .set("stroke", stroke.color.to_hex())
                    .set("stroke-width", stroke.width)
                    .set("stroke-linejoin", "round")
                    .set("opacity", *opacity)
                    .set("d", data);
                self.plot.append(path);
            }
            DrawPrimitive::Label {
                text,
                anchor,
                offset,
                font_size,
                color,
                border,
            } => self.draw_label(
                text,
                anchor,
                offset,
                LabelStyle {
                    font_size: *font_size,
                    color: *color,
                    border: *border,
                },
            ),
        }
    }
}

/// Outline of an upright five-pointed star, alternating outer and inner
/// vertices starting at the top tip.
pub fn star_vertices(center: Vector2, radius: f64) -> Vec<Vector2> {
    (0..STAR_POINTS * 2)
        .map(|i| {
            let r = if i % 2 == 0 {
                radius
            } else {
                radius * STAR_INNER_RATIO
            };
            let angle = FRAC_PI_2 + i as f64 * PI / STAR_POINTS as f64;
            center.polar_offset(r, angle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outline;

    fn layout() -> CanvasLayout {
        CanvasLayout::fit(
            &Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 10.0,
                max_y: 20.0,
            },
            248.0,
        )
    }

    #[test]
    fn layout_keeps_aspect_ratio() {
        let layout = layout();

        assert_eq!(layout.plot_width, 200.0);
        assert_eq!(layout.plot_height, 400.0);
        assert_eq!(layout.height, TITLE_BAND_HEIGHT + 400.0 + CANVAS_MARGIN);
    }

    #[test]
    fn plot_space_is_flipped() {
        let layout = layout();

        assert_eq!(
            layout.to_canvas(&Vector2::ZERO),
            (CANVAS_MARGIN, TITLE_BAND_HEIGHT + 400.0)
        );
        assert_eq!(
            layout.to_canvas(&Vector2::new(200.0, 400.0)),
            (CANVAS_MARGIN + 200.0, TITLE_BAND_HEIGHT)
        );
    }

    #[test]
    fn star_vertices_start_at_the_top() {
        let vertices = star_vertices(Vector2::new(5.0, 5.0), 2.0);

        assert_eq!(vertices.len(), 10);
        assert!((vertices[0].x - 5.0).abs() < 1e-9);
        assert!((vertices[0].y - 7.0).abs() < 1e-9);
        let inner = vertices[1].distance(&Vector2::new(5.0, 5.0));
        assert!((inner - 2.0 * STAR_INNER_RATIO).abs() < 1e-9);
    }

    #[test]
    fn svg_surface_emits_every_primitive() {
        let mut surface = SvgSurface::new(layout(), "Protected areas");

        surface.draw_all(&[
            DrawPrimitive::Polygon {
                points: vec![Vector2::ZERO, Vector2::new(10.0, 0.0), Vector2::new(5.0, 5.0)],
                fill: Rgba::rgb(0x7a, 0xa6, 0x7a),
                opacity: 0.14,
            },
            DrawPrimitive::Outline {
                rings: vec![vec![Vector2::ZERO, Vector2::new(10.0, 10.0), Vector2::ZERO]],
                stroke: Outline {
                    color: Rgba::rgb(0x5a, 0x7c, 0x65),
                    width: 2.0,
                },
                opacity: 0.65,
            },
            DrawPrimitive::Marker(Marker {
                shape: MarkerShape::Star,
                center: Vector2::new(50.0, 50.0),
                size: 400.0,
                fill: Rgba::rgb(0xfe, 0xb2, 0x4c),
                opacity: 0.95,
                outline: Some(Outline {
                    color: Rgba::rgb(0x34, 0x49, 0x5e),
                    width: 1.2,
                }),
            }),
            DrawPrimitive::Label {
                text: "VQG Yok Đôn".to_owned(),
                anchor: Vector2::new(50.0, 50.0),
                offset: Vector2::new(8.0, 8.0),
                font_size: 10.0,
                color: Rgba::rgb(0x2c, 0x3e, 0x50),
                border: Rgba::rgb(0x5a, 0x7c, 0x65),
            },
        ]);

        let svg = surface.finish().to_string();

        assert!(svg.contains("Protected areas"));
        assert!(svg.contains("VQG Yok Đôn"));
        assert!(svg.contains("#7aa67a"));
        assert!(svg.contains("#34495e"));
        assert!(svg.contains("url(#plot-area)"));
        assert!(svg.contains("<path"));
        assert!(svg.contains("#d4e4f7"));
    }

    #[test]
    fn recording_surface_keeps_order() {
        let first = DrawPrimitive::Circle {
            center: Vector2::ZERO,
            radius: 1.0,
            fill: Rgba::WHITE,
            opacity: 1.0,
        };
        let second = DrawPrimitive::Star {
            center: Vector2::ZERO,
            radius: 1.0,
            fill: Rgba::WHITE,
            opacity: 1.0,
        };

        let mut recorded: Vec<DrawPrimitive> = Vec::new();
        recorded.draw_all([&first, &second]);

        assert_eq!(recorded, vec![first, second]);
    }
}
