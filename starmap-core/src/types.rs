use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    // Computes the euclidean distance between two vectors
    pub fn distance(&self, other: &Vector2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn offset_by(&self, dx: f64, dy: f64) -> Vector2 {
        Vector2::new(self.x + dx, self.y + dy)
    }

    // Point at `radius` from `self` in the direction of `angle` (radians,
    // counter-clockwise from the positive x axis, y pointing up).
    pub fn polar_offset(&self, radius: f64, angle: f64) -> Vector2 {
        Vector2::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }
}

impl Display for Vector2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 0xff }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha channel as a fraction in `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    pub fn lerp(&self, other: &Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;

        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vector2>) -> Option<Bounds> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds {
                    min_x: p.x,
                    min_y: p.y,
                    max_x: p.x,
                    max_y: p.y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(p.x),
                    min_y: b.min_y.min(p.y),
                    max_x: b.max_x.max(p.x),
                    max_y: b.max_y.max(p.y),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Grows the bounds on every side by `factor` of the width and height.
    pub fn padded(&self, factor: f64) -> Bounds {
        let dx = self.width() * factor;
        let dy = self.height() * factor;

        Bounds {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.4}, {:.4}, {:.4}, {:.4}]",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// One protected area: its name, its magnitude (area in km²) and where it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRecord {
    #[serde(rename = "name")]
    pub identifier: String,
    #[serde(rename = "area_km2")]
    pub magnitude: f64,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl AreaRecord {
    pub fn new(identifier: &str, latitude: f64, longitude: f64, magnitude: f64) -> Self {
        AreaRecord {
            identifier: identifier.to_owned(),
            magnitude,
            latitude,
            longitude,
        }
    }

    pub fn location(&self) -> Vector2 {
        Vector2::new(self.longitude, self.latitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSpec {
    pub center: Vector2,
    pub base_size: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Star,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Rgba,
    pub width: f64,
}

/// A screen-sized marker. `size` is the marker area in square pixels, so a
/// marker keeps its size whatever the map projection is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub shape: MarkerShape,
    pub center: Vector2,
    pub size: f64,
    pub fill: Rgba,
    pub opacity: f64,
    pub outline: Option<Outline>,
}

impl Marker {
    // Circumradius of the drawn shape: the marker spans sqrt(size) pixels.
    pub fn radius(&self) -> f64 {
        self.size.max(0.0).sqrt() / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    Marker(Marker),
    Polygon {
        points: Vec<Vector2>,
        fill: Rgba,
        opacity: f64,
    },
    Rect {
        origin: Vector2,
        width: f64,
        height: f64,
        fill: Rgba,
        opacity: f64,
    },
    Circle {
        center: Vector2,
        radius: f64,
        fill: Rgba,
        opacity: f64,
    },
    Star {
        center: Vector2,
        radius: f64,
        fill: Rgba,
        opacity: f64,
    },
    Outline {
        rings: Vec<Vec<Vector2>>,
        stroke: Outline,
        opacity: f64,
    },
    Label {
        text: String,
        anchor: Vector2,
        // Offset of the text from the anchor, in pixels
        offset: Vector2,
        font_size: f64,
        color: Rgba,
        border: Rgba,
    },
}

impl DrawPrimitive {
    /// Maps the primitive from data space into plot space. Marker and label
    /// sizes are already in pixels, only their anchors move.
    pub fn projected(&self, projection: &Projection) -> DrawPrimitive {
        match self {
            DrawPrimitive::Marker(marker) => DrawPrimitive::Marker(Marker {
                center: projection.apply(&marker.center),
                ..*marker
            }),
            DrawPrimitive::Polygon {
                points,
                fill,
                opacity,
            } => DrawPrimitive::Polygon {
                points: points.iter().map(|p| projection.apply(p)).collect(),
                fill: *fill,
                opacity: *opacity,
            },
            DrawPrimitive::Rect {
                origin,
                width,
                height,
                fill,
                opacity,
            } => DrawPrimitive::Rect {
                origin: projection.apply(origin),
                width: width * projection.scale,
                height: height * projection.scale,
                fill: *fill,
                opacity: *opacity,
            },
            DrawPrimitive::Circle {
                center,
                radius,
                fill,
                opacity,
            } => DrawPrimitive::Circle {
                center: projection.apply(center),
                radius: radius * projection.scale,
                fill: *fill,
                opacity: *opacity,
            },
            DrawPrimitive::Star {
                center,
                radius,
                fill,
                opacity,
            } => DrawPrimitive::Star {
                center: projection.apply(center),
                radius: radius * projection.scale,
                fill: *fill,
                opacity: *opacity,
            },
            DrawPrimitive::Outline {
                rings,
                stroke,
                opacity,
            } => DrawPrimitive::Outline {
                rings: rings
                    .iter()
                    .map(|ring| ring.iter().map(|p| projection.apply(p)).collect())
                    .collect(),
                stroke: *stroke,
                opacity: *opacity,
            },
            DrawPrimitive::Label {
                text,
                anchor,
                offset,
                font_size,
                color,
                border,
            } => DrawPrimitive::Label {
                text: text.clone(),
                anchor: projection.apply(anchor),
                offset: *offset,
                font_size: *font_size,
                color: *color,
                border: *border,
            },
        }
    }
}

/// Linear map from data coordinates to plot coordinates with equal aspect.
/// Plot space has its origin at the bottom-left corner and y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub origin: Vector2,
    pub scale: f64,
}

impl Projection {
    pub fn fit(limits: &Bounds, plot_width: f64) -> Projection {
        Projection {
            origin: Vector2::new(limits.min_x, limits.min_y),
            scale: plot_width / limits.width(),
        }
    }

    pub fn apply(&self, point: &Vector2) -> Vector2 {
        Vector2::new(
            (point.x - self.origin.x) * self.scale,
            (point.y - self.origin.y) * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_to_hex() {
        assert_eq!(Rgba::rgb(0xd4, 0xe4, 0xf7).to_hex(), "#d4e4f7");
        assert_eq!(Rgba::WHITE.to_hex(), "#ffffff");
    }

    #[test]
    fn test_rgba_lerp_endpoints() {
        let from = Rgba::rgb(0, 100, 200);
        let to = Rgba::rgb(200, 100, 0);

        assert_eq!(from.lerp(&to, 0.0), from);
        assert_eq!(from.lerp(&to, 1.0), to);
        assert_eq!(from.lerp(&to, 0.5), Rgba::rgb(100, 100, 100));
    }

    #[test]
    fn test_bounds_from_points() {
        let points = [
            Vector2::new(102.1, 8.5),
            Vector2::new(109.5, 23.4),
            Vector2::new(105.0, 12.0),
        ];

        let bounds = Bounds::from_points(&points).unwrap();

        assert_eq!(bounds.min_x, 102.1);
        assert_eq!(bounds.min_y, 8.5);
        assert_eq!(bounds.max_x, 109.5);
        assert_eq!(bounds.max_y, 23.4);

        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_bounds_padded() {
        let bounds = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 10.0,
            max_y: 20.0,
        };

        let padded = bounds.padded(0.05);

        assert_eq!(padded.min_x, -0.5);
        assert_eq!(padded.max_x, 10.5);
        assert_eq!(padded.min_y, -1.0);
        assert_eq!(padded.max_y, 21.0);
    }

    #[test]
    fn test_projection_keeps_aspect() {
        let limits = Bounds {
            min_x: 100.0,
            min_y: 10.0,
            max_x: 110.0,
            max_y: 30.0,
        };

        let projection = Projection::fit(&limits, 500.0);

        assert_eq!(projection.apply(&Vector2::new(100.0, 10.0)), Vector2::ZERO);
        assert_eq!(
            projection.apply(&Vector2::new(110.0, 30.0)),
            Vector2::new(500.0, 1000.0)
        );
    }

    #[test]
    fn test_projected_marker_keeps_size() {
        let projection = Projection {
            origin: Vector2::new(1.0, 1.0),
            scale: 10.0,
        };

        let marker = DrawPrimitive::Marker(Marker {
            shape: MarkerShape::Star,
            center: Vector2::new(2.0, 3.0),
            size: 100.0,
            fill: Rgba::WHITE,
            opacity: 1.0,
            outline: None,
        });

        match marker.projected(&projection) {
            DrawPrimitive::Marker(m) => {
                assert_eq!(m.center, Vector2::new(10.0, 20.0));
                assert_eq!(m.size, 100.0);
            }
            other => panic!("unexpected primitive: {:?}", other),
        }

        let circle = DrawPrimitive::Circle {
            center: Vector2::new(1.0, 1.0),
            radius: 0.5,
            fill: Rgba::WHITE,
            opacity: 1.0,
        };

        match circle.projected(&projection) {
            DrawPrimitive::Circle { center, radius, .. } => {
                assert_eq!(center, Vector2::ZERO);
                assert_eq!(radius, 5.0);
            }
            other => panic!("unexpected primitive: {:?}", other),
        }
    }
}
