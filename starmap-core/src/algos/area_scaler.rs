use crate::error::{Error, Result};

use tracing::{Level, event};

/// Maps area magnitudes to marker sizes.
///
/// Markers are scaled on the square root of the magnitude, so the drawn
/// marker grows with the linear extent of the area rather than its surface,
/// which is how readers judge symbol size.
pub struct AreaScaler;

impl AreaScaler {
    pub fn scale(magnitudes: &[f64], min_size: f64, max_size: f64) -> Result<Vec<f64>> {
        if magnitudes.is_empty() {
            return Err(Error::invalid_input("no magnitudes to scale"));
        }

        if !(min_size < max_size) {
            return Err(Error::invalid_input(format!(
                "minimum size {} must be smaller than maximum size {}",
                min_size, max_size
            )));
        }

        if let Some(bad) = magnitudes.iter().find(|m| !m.is_finite() || **m < 0.0) {
            return Err(Error::invalid_input(format!(
                "magnitude {} is not a finite non-negative number",
                bad
            )));
        }

        let roots = magnitudes.iter().map(|m| m.sqrt()).collect::<Vec<_>>();

        let lo = roots.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = roots.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if hi == lo {
            event!(
                Level::DEBUG,
                "All {} magnitudes are equal, using the minimum size",
                magnitudes.len()
            );
            return Ok(vec![min_size; magnitudes.len()]);
        }

        let span = max_size - min_size;

        let sizes = roots
            .into_iter()
            .map(|root| {
                // Pin the largest root so the top of the range is hit exactly
                if root == hi {
                    max_size
                } else {
                    min_size + (root - lo) / (hi - lo) * span
                }
            })
            .collect();

        Ok(sizes)
    }
}
