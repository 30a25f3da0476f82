//! Frontier-driven packing engine.
//!
//! Growth is local: every step picks one accepted disc from the frontier,
//! draws one candidate radius from the size ladder attached to it, and tries
//! up to [`Config::max_tries`] random directions at the exact spacing
//! distance. Failure narrows the site's ladder to strictly smaller radii; a
//! site with nothing left to try retires. The run is over once the frontier
//! empties, and it always does.

use {
  crate::{
    color::ColorMode,
    field::NoiseField,
    geometry::{Disc, P2, WorldSpace}
  },
  anyhow::{Result, ensure},
  euclid::{Box2D, Size2D, Vector2D as V2},
  rand::prelude::*,
  rand_pcg::Pcg64,
  std::f64::consts::TAU
};

pub mod kdtree;
pub mod sizes;
#[cfg(test)] mod tests;

use kdtree::KdTree;

/// Parameters of a packing run.
///
/// Start from [`Config::default`] and override what you need; construction
/// validates everything once, stepping never fails.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
  /// canvas extent in world units
  pub width: u32,
  pub height: u32,
  /// smallest radius a disc may take
  pub rmin: f64,
  /// largest radius a disc may take; its diameter must fit the canvas
  pub rmax: f64,
  /// arithmetic step between candidate radii
  pub rincr: f64,
  /// size variability factor in `(0, 1]`; `1` collapses every ladder into a
  /// single radius
  pub rvar: f64,
  /// extra spacing every pair of discs must keep, `≥ 0`
  pub epsilon: f64,
  /// angle attempts per [`Packing::advance`] call
  pub max_tries: u32,
  /// per-axis noise frequency; `None` derives both from the seed
  pub noise_scale: Option<(f64, f64)>,
  pub seed: u64,
  pub color: ColorMode
}

impl Default for Config {
  fn default() -> Self {
    Self {
      width: 256,
      height: 256,
      rmin: 1.0,
      rmax: 16.0,
      rincr: 0.5,
      rvar: 0.5,
      epsilon: 0.0,
      max_tries: 16,
      noise_scale: None,
      seed: 0,
      color: ColorMode::default()
    }}}

impl Config {
  fn validate(&self) -> Result<()> {
    ensure!(self.width > 0 && self.height > 0, "canvas has no area");
    ensure!(self.rmin > 0.0, "rmin must be positive");
    ensure!(self.rmin <= self.rmax, "rmin exceeds rmax");
    ensure!(self.rincr > 0.0, "rincr must be positive");
    // an increment the float grid swallows at some rung would stall the ladder
    ensure!(self.rincr >= self.rmax * f64::EPSILON, "rincr is below float resolution");
    ensure!(self.rvar > 0.0 && self.rvar <= 1.0, "rvar must lie in (0, 1]");
    ensure!(self.epsilon >= 0.0, "epsilon is negative");
    ensure!(self.max_tries > 0, "max_tries must be positive");
    if let Some((sx, sy)) = self.noise_scale {
      ensure!(sx > 0.0 && sy > 0.0, "noise scale must be positive");
    }
    if let ColorMode::Random { cmin, cmax } = self.color {
      ensure!(cmin <= cmax, "random color range is inverted");
    }
    ensure!(
      2.0 * self.rmax <= self.width.min(self.height) as f64,
      "a disc of rmax diameter must fit the canvas"
    );
    Ok(())
  }
}

/// A frontier member: an accepted disc and the candidate radii still untried
/// around it. The ladder only ever shrinks.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
  pub xy: P2,
  pub r: f64,
  pub sizes: Vec<f64>
}

/// Outcome of a single [`Packing::advance`] call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Step {
  /// a new disc was accepted
  Placed(Disc),
  /// every attempt failed; the picked site's ladder shrank
  Narrowed,
  /// every attempt failed and no smaller candidates remain; site removed
  Retired,
  /// the frontier is empty, nothing will ever change again
  Done
}

/// The packing engine. See the [module](self) docs for the growth rule.
#[derive(Clone, Debug)]
pub struct Packing {
  config: Config,
  field: NoiseField,
  index: KdTree,
  frontier: Vec<Site>,
  rng: Pcg64
}

impl Packing {
  /// Validates `config` and seeds the first disc at a uniform random
  /// position, pulled inside the canvas if it overhangs.
  pub fn new(config: Config) -> Result<Self> {
    config.validate()?;
    let mut packing = Self {
      config,
      field: NoiseField::new(config.seed, config.noise_scale),
      index: KdTree::new(),
      frontier: vec![],
      rng: Pcg64::seed_from_u64(config.seed)
    };
    packing.seed();
    Ok(packing)
  }

  fn seed(&mut self) {
    let (w, h) = (self.config.width as f64, self.config.height as f64);
    let xy = P2::new(
      self.rng.gen_range(0.0..w),
      self.rng.gen_range(0.0..h)
    );
    let ladder = sizes::ladder(&self.field, &self.config, xy);
    let r = ladder[self.rng.gen_range(0..ladder.len())];
    // pull the center in so the disc fits the canvas
    let xy = P2::new(xy.x.clamp(r, w - r), xy.y.clamp(r, h - r));
    self.place(xy, r);
  }

  /// One unit of work.
  ///
  /// Draw order is part of the reproducibility contract: frontier pick,
  /// ladder pick, then one angle per attempt; a placement additionally
  /// consumes whatever [`ColorMode`] draws. [`Step::Done`] consumes nothing.
  pub fn advance(&mut self) -> Step {
    if self.frontier.is_empty() {
      return Step::Done
    }
    let site = self.rng.gen_range(0..self.frontier.len());
    let ladder_len = self.frontier[site].sizes.len();
    let r = self.frontier[site].sizes[self.rng.gen_range(0..ladder_len)];
    let (xy, site_r) = (self.frontier[site].xy, self.frontier[site].r);

    let dist = r + site_r + self.config.epsilon;
    // one spacing margin offsets the candidate, a second one pads the
    // collision test around it
    let pad = self.config.rmax + 2.0 * r + site_r + 2.0 * self.config.epsilon;
    let neighbors = self.index
      .range_query(Box2D::new(
        xy - V2::splat(pad),
        xy + V2::splat(pad)
      ))
      .copied()
      .collect::<Vec<_>>();

    for _ in 0..self.config.max_tries {
      let angle = self.rng.gen_range(0.0..TAU);
      let candidate = xy + V2::new(angle.cos(), angle.sin()) * dist;
      if self.in_bounds(candidate, r) && !collides(&neighbors, candidate, r, self.config.epsilon) {
        return Step::Placed(self.place(candidate, r))
      }
    }

    let ladder = &mut self.frontier[site].sizes;
    ladder.retain(|&candidate| candidate < r);
    if ladder.is_empty() {
      self.frontier.swap_remove(site);
      Step::Retired
    } else {
      Step::Narrowed
    }
  }

  /// Drives [`advance`](Self::advance) until done, yielding every disc
  /// accepted along the way.
  pub fn placements(&mut self) -> Placements<'_> {
    Placements(self)
  }

  /// accept a disc; it enters both the index and the frontier
  fn place(&mut self, xy: P2, r: f64) -> Disc {
    let disc = Disc {
      xy, r,
      color: self.config.color.choose(&mut self.rng, r, self.config.rmax),
      orientation: self.field.orientation(xy)
    };
    self.index.insert(disc);
    self.frontier.push(Site {
      xy, r,
      sizes: sizes::ladder(&self.field, &self.config, xy)
    });
    disc
  }

  fn in_bounds(&self, xy: P2, r: f64) -> bool {
    xy.x - r >= 0.0 && xy.y - r >= 0.0 &&
    xy.x + r <= self.config.width as f64 &&
    xy.y + r <= self.config.height as f64
  }

  /// every accepted disc, in acceptance order
  pub fn discs(&self) -> impl Iterator<Item = &Disc> + '_ {
    self.index.iter()
  }

  /// the spatial index, for viewport-limited consumers
  pub fn index(&self) -> &KdTree {
    &self.index
  }

  pub fn frontier(&self) -> &[Site] {
    &self.frontier
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn field(&self) -> &NoiseField {
    &self.field
  }

  pub fn canvas(&self) -> Size2D<f64, WorldSpace> {
    Size2D::new(self.config.width as f64, self.config.height as f64)
  }

  /// `true` once the frontier is empty; [`advance`](Self::advance) is a
  /// no-op from then on
  pub fn is_done(&self) -> bool {
    self.frontier.is_empty()
  }
}

/// `true` if `candidate` at radius `r` comes closer to any neighbor than the
/// spacing margin allows. The parent disc always sits at exactly
/// `r + parent.r + epsilon`, so the squared threshold carries a relative
/// slack; tangency must pass.
fn collides(neighbors: &[Disc], candidate: P2, r: f64, epsilon: f64) -> bool {
  const SLACK: f64 = 1e-9;
  neighbors.iter().any(|other| {
    let min_dist = r + other.r + epsilon;
    (candidate - other.xy).square_length() < min_dist * min_dist * (1.0 - SLACK)
  })
}

/// See [`Packing::placements`].
pub struct Placements<'a>(&'a mut Packing);

impl Iterator for Placements<'_> {
  type Item = Disc;

  fn next(&mut self) -> Option<Disc> {
    loop {
      match self.0.advance() {
        Step::Placed(disc) => return Some(disc),
        Step::Done => return None,
        Step::Narrowed | Step::Retired => ()
      }
    }
  }
}
