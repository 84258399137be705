use crate::types::Rgba;

pub(crate) const DEFAULT_MIN_SIZE: f64 = 80.0;
pub(crate) const DEFAULT_MAX_SIZE: f64 = 1000.0;
pub(crate) const DEFAULT_SEED: u64 = 42;
pub(crate) const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.03;
pub(crate) const DEFAULT_LABEL_COUNT: usize = 10;
pub(crate) const DEFAULT_CANVAS_WIDTH: f64 = 1400.0;
pub(crate) const DEFAULT_TITLE: &str = "Các VQG lớn ở Việt Nam";

// Axis limits are the boundary extent grown by this share on every side.
pub(crate) const AXIS_PADDING: f64 = 0.05;

pub(crate) const CANVAS_MARGIN: f64 = 24.0;
pub(crate) const TITLE_BAND_HEIGHT: f64 = 72.0;
pub(crate) const TITLE_FONT_SIZE: f64 = 32.0;
pub(crate) const LABEL_FONT_SIZE: f64 = 10.0;
pub(crate) const LABEL_OFFSET: f64 = 8.0;

// Ratio between the inner and outer radius of a five-pointed star
pub(crate) const STAR_INNER_RATIO: f64 = 0.381966;
pub(crate) const STAR_POINTS: usize = 5;

pub(crate) const FIGURE_BACKGROUND: Rgba = Rgba::rgb(0xd4, 0xe4, 0xf7);
pub(crate) const AXES_BACKGROUND: Rgba = Rgba::rgb(0xe8, 0xf1, 0xfa);
pub(crate) const TITLE_COLOR: Rgba = Rgba::rgb(0x1a, 0x47, 0x2a);
pub(crate) const BOUNDARY_COLOR: Rgba = Rgba::rgb(0x5a, 0x7c, 0x65);
pub(crate) const BOUNDARY_WIDTH: f64 = 2.0;
pub(crate) const BOUNDARY_OPACITY: f64 = 0.65;
pub(crate) const LABEL_COLOR: Rgba = Rgba::rgb(0x2c, 0x3e, 0x50);
pub(crate) const GLYPH_OUTLINE: Rgba = Rgba::rgb(0x34, 0x49, 0x5e);

pub(crate) const PINE_GREENS: [Rgba; 8] = [
    Rgba::rgb(0xa8, 0xc9, 0xa8),
    Rgba::rgb(0x9b, 0xc1, 0x9b),
    Rgba::rgb(0x8e, 0xb8, 0x8e),
    Rgba::rgb(0xb5, 0xd0, 0xb5),
    Rgba::rgb(0xa3, 0xc5, 0xa3),
    Rgba::rgb(0x96, 0xbd, 0x96),
    Rgba::rgb(0xba, 0xd4, 0xba),
    Rgba::rgb(0x9f, 0xc4, 0x9f),
];

pub(crate) const DARK_GREENS: [Rgba; 3] = [
    Rgba::rgb(0x7a, 0xa6, 0x7a),
    Rgba::rgb(0x6d, 0x9a, 0x6d),
    Rgba::rgb(0x87, 0xad, 0x87),
];

pub(crate) const TRUNK_BROWNS: [Rgba; 3] = [
    Rgba::rgb(0x8b, 0x73, 0x55),
    Rgba::rgb(0x9d, 0x84, 0x68),
    Rgba::rgb(0xa8, 0x91, 0x76),
];

pub(crate) const ORNAMENT_COLORS: [Rgba; 8] = [
    Rgba::rgb(0xe7, 0x4c, 0x3c),
    Rgba::rgb(0xf3, 0x9c, 0x12),
    Rgba::rgb(0x34, 0x98, 0xdb),
    Rgba::rgb(0x9b, 0x59, 0xb6),
    Rgba::rgb(0xe6, 0x7e, 0x22),
    Rgba::rgb(0xc0, 0x39, 0x2b),
    Rgba::rgb(0x29, 0x80, 0xb9),
    Rgba::rgb(0x8e, 0x44, 0xad),
];

pub(crate) const TOP_STAR_COLOR: Rgba = Rgba::rgb(0xf1, 0xc4, 0x0f);

// ColorBrewer sequential schemes, nine classes each
pub(crate) const YL_OR_RD: [Rgba; 9] = [
    Rgba::rgb(0xff, 0xff, 0xcc),
    Rgba::rgb(0xff, 0xed, 0xa0),
    Rgba::rgb(0xfe, 0xd9, 0x76),
    Rgba::rgb(0xfe, 0xb2, 0x4c),
    Rgba::rgb(0xfd, 0x8d, 0x3c),
    Rgba::rgb(0xfc, 0x4e, 0x2a),
    Rgba::rgb(0xe3, 0x1a, 0x1c),
    Rgba::rgb(0xbd, 0x00, 0x26),
    Rgba::rgb(0x80, 0x00, 0x26),
];

pub(crate) const OR_RD: [Rgba; 9] = [
    Rgba::rgb(0xff, 0xf7, 0xec),
    Rgba::rgb(0xfe, 0xe8, 0xc8),
    Rgba::rgb(0xfd, 0xd4, 0x9e),
    Rgba::rgb(0xfd, 0xbb, 0x84),
    Rgba::rgb(0xfc, 0x8d, 0x59),
    Rgba::rgb(0xef, 0x65, 0x48),
    Rgba::rgb(0xd7, 0x30, 0x1f),
    Rgba::rgb(0xb3, 0x00, 0x00),
    Rgba::rgb(0x7f, 0x00, 0x00),
];

pub(crate) const REDS: [Rgba; 9] = [
    Rgba::rgb(0xff, 0xf5, 0xf0),
    Rgba::rgb(0xfe, 0xe0, 0xd2),
    Rgba::rgb(0xfc, 0xbb, 0xa1),
    Rgba::rgb(0xfc, 0x92, 0x72),
    Rgba::rgb(0xfb, 0x6a, 0x4a),
    Rgba::rgb(0xef, 0x3b, 0x2c),
    Rgba::rgb(0xcb, 0x18, 0x1d),
    Rgba::rgb(0xa5, 0x0f, 0x15),
    Rgba::rgb(0x67, 0x00, 0x0d),
];
