//! .
//!
//! The origin of coordinate system is in top-left corner. The canvas occupies
//! `[0, width] × [0, height]` in world units; conversion to output pixels
//! happens only in the drawing module.

use {
  euclid::{Box2D, Point2D, Vector2D as V2},
  num_traits::NumCast
};

/// Pixel coordinate basis
#[derive(Debug, Copy, Clone)]
pub struct PixelSpace;
/// Canvas coordinate basis
#[derive(Debug, Copy, Clone)]
pub struct WorldSpace;

pub type P2<T = f64> = Point2D<T, WorldSpace>;

pub trait BoundingBox<T, S> {
  fn bounding_box(&self) -> Box2D<T, S>;
}

/// A disc accepted into a packing.
///
/// Position, radius, color and orientation never change after acceptance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Disc {
  pub xy: P2,
  pub r: f64,
  pub color: [u8; 3],
  /// unit gradient of the guiding field at `xy`, `None` on plateaus
  pub orientation: Option<V2<f64, WorldSpace>>
}

impl Disc {
  /// signed distance to the disc boundary, negative inside
  pub fn sdf(&self, pixel: P2) -> f64 {
    (pixel - self.xy).length() - self.r
  }
}

impl BoundingBox<f64, WorldSpace> for Disc {
  fn bounding_box(&self) -> Box2D<f64, WorldSpace> {
    Box2D::new(
      (self.xy.to_vector() - V2::splat(self.r)).to_point(),
      (self.xy.to_vector() + V2::splat(self.r)).to_point()
    )
  }
}

/// `Box2D::contains` treats `max` as exclusive; range queries are inclusive
/// on all four edges.
pub fn contains_inclusive<T: PartialOrd, S>(rect: &Box2D<T, S>, point: Point2D<T, S>) -> bool {
  rect.min.x <= point.x && point.x <= rect.max.x &&
  rect.min.y <= point.y && point.y <= rect.max.y
}

pub fn to_pixel_space<T: NumCast + Copy>(
  point: Point2D<T, WorldSpace>,
  offset: V2<f64, PixelSpace>,
  scale: f64
) -> Point2D<f64, PixelSpace> {
  (point.cast::<f64>().to_vector().cast_unit() * scale + offset).to_point()
}

pub fn to_world_space<T: NumCast + Copy>(
  pixel: Point2D<T, PixelSpace>,
  offset: V2<f64, PixelSpace>,
  scale: f64
) -> P2 {
  ((pixel.cast::<f64>() - offset).to_vector() / scale)
    .cast_unit().to_point()
}
