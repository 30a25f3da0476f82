//! Per-disc color assignment.

use {
  rand::Rng,
  std::f64::consts::TAU
};

/// Cosine gradient palette: `channel(t) = a + b·cos(2π·(c·t + d))`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
  pub a: [f64; 3],
  pub b: [f64; 3],
  pub c: [f64; 3],
  pub d: [f64; 3]
}

impl Default for Palette {
  /// the classic rainbow coefficients
  fn default() -> Self {
    Self {
      a: [0.5, 0.5, 0.5],
      b: [0.5, 0.5, 0.5],
      c: [1.0, 1.0, 1.0],
      d: [0.0, 0.33, 0.67]
    }}}

impl Palette {
  pub fn eval(&self, t: f64) -> [u8; 3] {
    let mut rgb = [0; 3];
    for i in 0..3 {
      let channel = self.a[i] + self.b[i] * (TAU * (self.c[i] * t + self.d[i])).cos();
      rgb[i] = (channel * 255.0).clamp(0.0, 255.0) as u8;
    }
    rgb
  }
}

/// How every accepted disc gets its color, chosen once per packing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ColorMode {
  /// channels drawn uniformly from `cmin..=cmax`, in r, g, b order
  Random { cmin: u8, cmax: u8 },
  /// radius-keyed cosine gradient, consumes no randomness
  Cosine(Palette)
}

impl Default for ColorMode {
  fn default() -> Self {
    ColorMode::Cosine(Palette::default())
  }
}

impl ColorMode {
  /// `Random` draws three channel values from `rng`; `Cosine` evaluates the
  /// palette at `t = 1.5·r/rmax`.
  pub fn choose(&self, rng: &mut impl Rng, r: f64, rmax: f64) -> [u8; 3] {
    match self {
      ColorMode::Random { cmin, cmax } => {
        let mut rgb = [0; 3];
        for channel in rgb.iter_mut() {
          *channel = rng.gen_range(*cmin..=*cmax);
        }
        rgb
      }
      ColorMode::Cosine(palette) => palette.eval(1.5 * r / rmax)
    }
  }
}
