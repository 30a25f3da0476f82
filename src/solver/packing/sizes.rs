//! Candidate radius ladders.

use {
  super::Config,
  crate::{field::NoiseField, geometry::P2}
};

/// Ascending ladder of candidate radii at `p`.
///
/// The field value picks the upper radius within `[rmin, rmax]`; the
/// variability factor shrinks it into the lower bound. Rungs run from the
/// lower bound in `rincr` steps, capped at the upper. Never empty: a
/// degenerate interval yields the single lower bound.
pub fn ladder(field: &NoiseField, config: &Config, p: P2) -> Vec<f64> {
  let upper = (config.rmin + field.sample(p) * (config.rmax - config.rmin))
    .clamp(config.rmin, config.rmax);
  let lower = (upper * config.rvar).clamp(config.rmin, upper);
  if lower < upper {
    itertools::iterate(lower, |r| r + config.rincr)
      .take_while(|&r| r <= upper)
      .collect()
  } else {
    vec![lower]
  }
}
