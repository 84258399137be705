mod algos;
mod boundary;
mod config;
mod constants;
mod dataset;
mod error;
mod report;
mod surface;
mod types;

use constants::{
    AXIS_PADDING, BOUNDARY_COLOR, BOUNDARY_OPACITY, BOUNDARY_WIDTH, LABEL_COLOR, LABEL_FONT_SIZE,
    LABEL_OFFSET,
};

use tracing::{Level, event, span};

pub use algos::{
    AreaScaler, ColorMap, GLYPH_LAYER_COUNT, StarGlyphRenderer, TreeLayers, TreePainter,
    normalize,
};
pub use boundary::{Boundary, GeoPolygon, GeometryKind};
pub use config::RenderConfig;
pub use dataset::{load_records, sample_protected_areas};
pub use error::{Error, Result};
pub use report::{AreaReport, largest_first, write_csv};
pub use surface::{CanvasLayout, DrawSurface, SvgSurface, star_vertices};
pub use types::{
    AreaRecord, Bounds, DrawPrimitive, GlyphSpec, Marker, MarkerShape, Outline, Projection, Rgba,
    Vector2,
};

/// Where the boundary lands on the canvas: the axis limits, their projection
/// into plot space and the canvas layout around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    pub bounds: Bounds,
    pub projection: Projection,
    pub layout: CanvasLayout,
}

impl MapFrame {
    pub fn for_boundary(boundary: &Boundary, canvas_width: f64) -> Result<MapFrame> {
        let bounds = boundary.bounds().ok_or(Error::MissingBoundaryData {
            path: Default::default(),
        })?;

        if !(bounds.width() > 0.0 && bounds.height() > 0.0) {
            return Err(Error::InvalidInput(format!(
                "boundary has no extent: {}",
                bounds
            )));
        }

        let limits = bounds.padded(AXIS_PADDING);
        let layout = CanvasLayout::fit(&limits, canvas_width);
        let projection = Projection::fit(&limits, layout.plot_width);

        Ok(MapFrame {
            bounds,
            projection,
            layout,
        })
    }
}

/// Renders the protected areas over the boundary as an SVG document.
pub fn create_map(
    boundary: &Boundary,
    records: &[AreaRecord],
    config: &RenderConfig,
) -> Result<svg::Document> {
    let span = span!(Level::DEBUG, "create_map");
    let _guard = span.enter();

    config.validate()?;

    let frame = MapFrame::for_boundary(boundary, config.canvas_width)?;

    event!(
        Level::DEBUG,
        "Canvas is {:.0}x{:.0} px",
        frame.layout.width,
        frame.layout.height
    );

    let mut surface = SvgSurface::new(frame.layout, &config.title);
    draw_map(&mut surface, &frame, boundary, records, config)?;

    Ok(surface.finish())
}

/// Composes the map on `surface`, back to front: tree body, boundary, the
/// coloured glows, baubles, white glows, bauble highlights, foreground stars,
/// labels, the tree's top star, then the sparkles.
pub fn draw_map<S: DrawSurface>(
    surface: &mut S,
    frame: &MapFrame,
    boundary: &Boundary,
    records: &[AreaRecord],
    config: &RenderConfig,
) -> Result<()> {
    let projection = &frame.projection;

    let magnitudes = records.iter().map(|r| r.magnitude).collect::<Vec<_>>();
    let sizes = AreaScaler::scale(&magnitudes, config.min_size, config.max_size)?;
    let colors = config.color_map.colors_for(&magnitudes);

    let tree = TreePainter::paint(&frame.bounds, config.seed);

    draw_tree_layer(surface, &tree.background, projection);

    surface.draw(
        &DrawPrimitive::Outline {
            rings: boundary.rings(),
            stroke: Outline {
                color: BOUNDARY_COLOR,
                width: BOUNDARY_WIDTH,
            },
            opacity: BOUNDARY_OPACITY,
        }
        .projected(projection),
    );

    let specs = records
        .iter()
        .zip(sizes.iter().zip(colors))
        .map(|(record, (size, color))| GlyphSpec {
            center: projection.apply(&record.location()),
            base_size: *size,
            color,
        })
        .collect::<Vec<_>>();

    let count = specs.len();
    let stacked = StarGlyphRenderer::stack_layers(StarGlyphRenderer::render_all(&specs));
    let (glows, rest) = stacked.split_at(2 * count);
    let (white_glows, rest) = rest.split_at(count);
    let (stars, sparkles) = rest.split_at(count);

    surface.draw_all(glows);
    draw_tree_layer(surface, &tree.baubles, projection);
    surface.draw_all(white_glows);
    draw_tree_layer(surface, &tree.highlights, projection);
    surface.draw_all(stars);

    for record in largest_first(records).iter().take(config.label_count) {
        let label = DrawPrimitive::Label {
            text: record.identifier.clone(),
            anchor: record.location(),
            offset: Vector2::new(LABEL_OFFSET, LABEL_OFFSET),
            font_size: LABEL_FONT_SIZE,
            color: LABEL_COLOR,
            border: BOUNDARY_COLOR,
        };
        surface.draw(&label.projected(projection));
    }

    draw_tree_layer(surface, &tree.top_star, projection);
    surface.draw_all(sparkles);

    event!(
        Level::INFO,
        "Drew {} protected areas, {} labelled",
        records.len(),
        records.len().min(config.label_count)
    );

    Ok(())
}

fn draw_tree_layer<S: DrawSurface>(
    surface: &mut S,
    primitives: &[DrawPrimitive],
    projection: &Projection,
) {
    for primitive in primitives {
        surface.draw(&primitive.projected(projection));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STAR_POINTS;

    const SQUARE: &str = r#"{
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[102.0, 8.0], [110.0, 8.0], [110.0, 24.0], [102.0, 24.0], [102.0, 8.0]]]
        }
    }"#;

    fn count_markers(primitives: &[DrawPrimitive], shape: MarkerShape) -> usize {
        primitives
            .iter()
            .filter(|p| matches!(p, DrawPrimitive::Marker(m) if m.shape == shape))
            .count()
    }

    #[test]
    fn draw_map_layers_in_order() {
        let boundary = Boundary::from_geojson_str(SQUARE).unwrap();
        let records = sample_protected_areas();
        let config = RenderConfig::default();
        let frame = MapFrame::for_boundary(&boundary, config.canvas_width).unwrap();

        let mut recorded: Vec<DrawPrimitive> = Vec::new();
        draw_map(&mut recorded, &frame, &boundary, &records, &config).unwrap();

        let tree = TreePainter::paint(&frame.bounds, config.seed);
        let n = records.len();

        let (background, rest) = recorded.split_at(tree.background.len());
        let (outline, rest) = rest.split_at(1);
        let (glows, rest) = rest.split_at(2 * n);
        let (baubles, rest) = rest.split_at(tree.baubles.len());
        let (white_glows, rest) = rest.split_at(n);
        let (highlights, rest) = rest.split_at(tree.highlights.len());
        let (stars, rest) = rest.split_at(n);
        let (labels, rest) = rest.split_at(config.label_count);
        let (top_star, sparkles) = rest.split_at(tree.top_star.len());

        let projected = |layer: &[DrawPrimitive]| {
            layer
                .iter()
                .map(|p| p.projected(&frame.projection))
                .collect::<Vec<_>>()
        };

        assert_eq!(background, projected(&tree.background).as_slice());
        assert!(matches!(outline[0], DrawPrimitive::Outline { .. }));
        assert_eq!(count_markers(glows, MarkerShape::Star), 2 * n);
        assert_eq!(baubles, projected(&tree.baubles).as_slice());
        assert!(white_glows.iter().all(|p| matches!(
            p,
            DrawPrimitive::Marker(m) if m.shape == MarkerShape::Star && m.fill == Rgba::WHITE
        )));
        assert_eq!(highlights, projected(&tree.highlights).as_slice());
        assert!(stars.iter().all(|p| matches!(
            p,
            DrawPrimitive::Marker(m) if m.shape == MarkerShape::Star && m.outline.is_some()
        )));
        assert!(labels.iter().all(|p| matches!(p, DrawPrimitive::Label { .. })));
        assert_eq!(top_star, projected(&tree.top_star).as_slice());
        assert_eq!(sparkles.len(), n * STAR_POINTS);
        assert_eq!(count_markers(sparkles, MarkerShape::Circle), n * STAR_POINTS);
    }

    #[test]
    fn glyphs_sit_on_projected_locations() {
        let boundary = Boundary::from_geojson_str(SQUARE).unwrap();
        let records = vec![
            AreaRecord::new("North", 22.0, 105.0, 100.0),
            AreaRecord::new("South", 10.0, 106.0, 400.0),
        ];
        let config = RenderConfig::default();
        let frame = MapFrame::for_boundary(&boundary, config.canvas_width).unwrap();

        let mut recorded: Vec<DrawPrimitive> = Vec::new();
        draw_map(&mut recorded, &frame, &boundary, &records, &config).unwrap();

        let foreground = recorded
            .iter()
            .filter_map(|p| match p {
                DrawPrimitive::Marker(m) if m.opacity == 0.95 => Some(*m),
                _ => None,
            })
            .collect::<Vec<_>>();

        assert_eq!(foreground.len(), 2);
        assert_eq!(
            foreground[0].center,
            frame.projection.apply(&Vector2::new(105.0, 22.0))
        );
        assert_eq!(foreground[0].size, config.min_size);
        assert_eq!(foreground[1].size, config.max_size);
    }

    #[test]
    fn create_map_is_deterministic() {
        let boundary = Boundary::from_geojson_str(SQUARE).unwrap();
        let records = sample_protected_areas();
        let config = RenderConfig::default();

        let first = create_map(&boundary, &records, &config).unwrap().to_string();
        let second = create_map(&boundary, &records, &config).unwrap().to_string();

        assert_eq!(first, second);
        assert!(first.contains("Các VQG lớn ở Việt Nam"));
        assert!(first.contains("VQG Yok Đôn"));
    }

    #[test]
    fn create_map_rejects_empty_records() {
        let boundary = Boundary::from_geojson_str(SQUARE).unwrap();

        assert!(matches!(
            create_map(&boundary, &[], &RenderConfig::default()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn frame_rejects_flat_boundary() {
        let raw = r#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [2, 0], [0, 0]]]}"#;
        let boundary = Boundary::from_geojson_str(raw).unwrap();

        assert!(matches!(
            MapFrame::for_boundary(&boundary, 1400.0),
            Err(Error::InvalidInput(_))
        ));
    }
}
