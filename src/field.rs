//! Scalar guidance field over the canvas.

#![allow(non_snake_case)]

use {
  crate::geometry::{P2, WorldSpace},
  euclid::Vector2D as V2,
  noise::{NoiseFn, Perlin},
  rand::prelude::*,
  std::fmt::{Debug, Formatter}
};

/// Smooth noise over the canvas, sampled in `[0, 1]`.
///
/// The same seed and scale always produce the same field. Axis scales are
/// frequencies: a scale of `2⁻⁸` stretches one noise period over about 256
/// world units.
#[derive(Clone)]
pub struct NoiseField {
  perlin: Perlin,
  scale: V2<f64, WorldSpace>
}

impl NoiseField {
  /// A `scale` of `None` draws both axis frequencies from the seed,
  /// log-uniformly over `[2⁻⁹, 2⁻⁶]`.
  pub fn new(seed: u64, scale: Option<(f64, f64)>) -> Self {
    let scale = match scale {
      Some((sx, sy)) => V2::new(sx, sy),
      None => {
        // separate stream; field shape must not depend on placement draws
        let mut rng = rand_pcg::Pcg64::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
        V2::new(
          (2f64).powf(rng.gen_range(-9.0..-6.0)),
          (2f64).powf(rng.gen_range(-9.0..-6.0))
        )
      }
    };
    Self {
      perlin: Perlin::new((seed ^ (seed >> 32)) as u32),
      scale
    }
  }

  /// field value at `p`, always within `[0, 1]`
  pub fn sample(&self, p: P2) -> f64 {
    let v = self.perlin.get([p.x * self.scale.x, p.y * self.scale.y]);
    (v * 0.5 + 0.5).clamp(0.0, 1.0)
  }

  /// forward difference gradient of [`sample`](Self::sample)
  pub fn gradient(&self, p: P2) -> V2<f64, WorldSpace> {
    let Δ = 1e-6;
    let fp = self.sample(p);
    V2::new(
      self.sample(p + V2::new(Δ, 0.0)) - fp,
      self.sample(p + V2::new(0.0, Δ)) - fp,
    ) / Δ
  }

  /// unit gradient, `None` where the field has no direction
  pub fn orientation(&self, p: P2) -> Option<V2<f64, WorldSpace>> {
    self.gradient(p).try_normalize()
  }
}

impl Debug for NoiseField {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NoiseField")
      .field("scale", &self.scale)
      .finish()
  }
}
