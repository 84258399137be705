use crate::{
    constants::{OR_RD, REDS, YL_OR_RD},
    types::Rgba,
};

/// Sequential colour maps used to tint the glyphs by area.
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ColorMap {
    #[default]
    YlOrRd,
    OrRd,
    Reds,
}

impl ColorMap {
    fn stops(&self) -> &'static [Rgba] {
        match self {
            ColorMap::YlOrRd => &YL_OR_RD,
            ColorMap::OrRd => &OR_RD,
            ColorMap::Reds => &REDS,
        }
    }

    /// Colour at position `t` in `[0, 1]`; values outside are clamped.
    pub fn sample(&self, t: f64) -> Rgba {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let position = t * (stops.len() - 1) as f64;
        let lower = position.floor() as usize;

        if lower >= stops.len() - 1 {
            return stops[stops.len() - 1];
        }

        stops[lower].lerp(&stops[lower + 1], position - lower as f64)
    }

    /// Colours for `values`, normalised linearly over their own range.
    pub fn colors_for(&self, values: &[f64]) -> Vec<Rgba> {
        normalize(values)
            .into_iter()
            .map(|t| self.sample(t))
            .collect()
    }
}

/// Linear normalisation of `values` to `[0, 1]`. A degenerate range maps
/// every value to 0.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !(hi > lo) {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - lo) / (hi - lo)).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sample_endpoints_match_stops() {
        assert_eq!(ColorMap::YlOrRd.sample(0.0), YL_OR_RD[0]);
        assert_eq!(ColorMap::YlOrRd.sample(1.0), YL_OR_RD[8]);
        assert_eq!(ColorMap::Reds.sample(1.0), REDS[8]);
        assert_eq!(ColorMap::OrRd.sample(-3.0), OR_RD[0]);
        assert_eq!(ColorMap::OrRd.sample(7.0), OR_RD[8]);
    }

    #[test]
    fn sample_hits_inner_stops() {
        // Stop 4 of 0..=8 sits exactly at the middle
        assert_eq!(ColorMap::YlOrRd.sample(0.5), YL_OR_RD[4]);
    }

    #[test]
    fn normalize_spans_unit_range() {
        assert_eq!(normalize(&[71.0, 1156.0, 613.5]), vec![0.0, 1.0, 0.5]);
        assert_eq!(normalize(&[5.0, 5.0]), vec![0.0, 0.0]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn colors_for_tints_by_value() {
        let colors = ColorMap::YlOrRd.colors_for(&[100.0, 50.0]);
        assert_eq!(colors, vec![YL_OR_RD[8], YL_OR_RD[0]]);
    }
}
