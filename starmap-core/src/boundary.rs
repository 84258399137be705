use crate::{
    algos::Simplifier,
    error::{Error, Result},
    types::{Bounds, Vector2},
};

use std::{fmt::Display, fs, path::Path};

use serde::Deserialize;
use tracing::{Level, event, span};

type Position = Vec<f64>;
type PolygonCoordinates = Vec<Vec<Position>>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJsonDocument {
    FeatureCollection { features: Vec<Feature> },
    Feature(Feature),
    Polygon { coordinates: PolygonCoordinates },
    MultiPolygon { coordinates: Vec<PolygonCoordinates> },
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: PolygonCoordinates,
    },
    MultiPolygon {
        coordinates: Vec<PolygonCoordinates>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryKind::Polygon => write!(f, "Polygon"),
            GeometryKind::MultiPolygon => write!(f, "MultiPolygon"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoPolygon {
    pub exterior: Vec<Vector2>,
    pub interiors: Vec<Vec<Vector2>>,
}

impl GeoPolygon {
    pub fn rings(&self) -> impl Iterator<Item = &Vec<Vector2>> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}

/// Country outline: every polygon of the first geometry of the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub kind: GeometryKind,
    pub polygons: Vec<GeoPolygon>,
}

impl Boundary {
    /// Reads a GeoJSON file and simplifies it with `tolerance` (in degrees).
    pub fn load(path: impl AsRef<Path>, tolerance: f64) -> Result<Boundary> {
        let path = path.as_ref();

        let span = span!(Level::DEBUG, "load_boundary");
        let _guard = span.enter();

        if !path.try_exists()? {
            return Err(Error::MissingBoundaryData {
                path: path.to_path_buf(),
            });
        }

        event!(Level::INFO, "Loading boundary from {}", path.display());

        let raw = fs::read_to_string(path)?;
        let boundary = Boundary::from_geojson_str(&raw).map_err(|err| match err {
            Error::MissingBoundaryData { .. } => Error::MissingBoundaryData {
                path: path.to_path_buf(),
            },
            other => other,
        })?;

        let original_count = boundary.coordinate_count();
        event!(
            Level::INFO,
            "Loaded boundary ({}+ original coordinates)",
            original_count
        );

        let simplified = boundary.simplified(tolerance);
        let simplified_count = simplified.coordinate_count();
        let reduction = (1.0 - simplified_count as f64 / original_count as f64) * 100.0;

        event!(
            Level::INFO,
            "Simplified to {} coordinates ({:.1}% fewer)",
            simplified_count,
            reduction
        );
        event!(Level::INFO, "Geometry kind: {}", simplified.kind);
        if let Some(bounds) = simplified.bounds() {
            event!(Level::INFO, "Bounds: {}", bounds);
        }

        Ok(simplified)
    }

    /// Parses a GeoJSON document. Only the first feature is used.
    pub fn from_geojson_str(raw: &str) -> Result<Boundary> {
        let document: GeoJsonDocument =
            serde_json::from_str(raw).map_err(|err| Error::BoundaryFormat(err.to_string()))?;

        let geometry = match document {
            GeoJsonDocument::FeatureCollection { features } => {
                if features.len() > 1 {
                    event!(
                        Level::WARN,
                        "Boundary has {} features, only the first one is drawn",
                        features.len()
                    );
                }
                features.into_iter().next().and_then(|f| f.geometry)
            }
            GeoJsonDocument::Feature(feature) => feature.geometry,
            GeoJsonDocument::Polygon { coordinates } => Some(Geometry::Polygon { coordinates }),
            GeoJsonDocument::MultiPolygon { coordinates } => {
                Some(Geometry::MultiPolygon { coordinates })
            }
        };

        let (kind, polygons) = match geometry {
            Some(Geometry::Polygon { coordinates }) => {
                (GeometryKind::Polygon, vec![to_polygon(coordinates)?])
            }
            Some(Geometry::MultiPolygon { coordinates }) => (
                GeometryKind::MultiPolygon,
                coordinates
                    .into_iter()
                    .map(to_polygon)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Some(Geometry::Unsupported) | None => {
                return Err(Error::MissingBoundaryData {
                    path: Default::default(),
                });
            }
        };

        let polygons = polygons
            .into_iter()
            .filter(|polygon| !polygon.exterior.is_empty())
            .collect::<Vec<_>>();

        if polygons.is_empty() {
            return Err(Error::MissingBoundaryData {
                path: Default::default(),
            });
        }

        Ok(Boundary { kind, polygons })
    }

    /// Number of exterior ring coordinates over every polygon.
    pub fn coordinate_count(&self) -> usize {
        self.polygons.iter().map(|p| p.exterior.len()).sum()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.polygons.iter().flat_map(|p| p.exterior.iter()))
    }

    pub fn simplified(&self, tolerance: f64) -> Boundary {
        let polygons = self
            .polygons
            .iter()
            .map(|polygon| GeoPolygon {
                exterior: Simplifier::simplify_ring(&polygon.exterior, tolerance),
                interiors: polygon
                    .interiors
                    .iter()
                    .map(|ring| Simplifier::simplify_ring(ring, tolerance))
                    .collect(),
            })
            .collect();

        Boundary {
            kind: self.kind,
            polygons,
        }
    }

    /// Every ring of every polygon, exteriors and holes alike.
    pub fn rings(&self) -> Vec<Vec<Vector2>> {
        self.polygons
            .iter()
            .flat_map(|polygon| polygon.rings().cloned())
            .collect()
    }
}

fn to_polygon(rings: PolygonCoordinates) -> Result<GeoPolygon> {
    let mut rings = rings
        .into_iter()
        .map(|ring| ring.iter().map(|p| to_vector(p)).collect::<Result<Vec<_>>>());

    let exterior = rings.next().transpose()?.unwrap_or_default();
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(GeoPolygon {
        exterior,
        interiors,
    })
}

// Positions may carry an altitude, only longitude and latitude are kept
fn to_vector(position: &[f64]) -> Result<Vector2> {
    match position {
        [x, y, ..] => Ok(Vector2::new(*x, *y)),
        _ => Err(Error::BoundaryFormat(format!(
            "position {:?} has fewer than two ordinates",
            position
        ))),
    }
}
