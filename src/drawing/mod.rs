#![allow(non_snake_case)]
use {
  crate::{
    geometry::{to_world_space, BoundingBox, Disc, PixelSpace, WorldSpace},
    solver::packing::Packing
  },
  euclid::{Box2D, Point2D, Size2D, Vector2D as V2},
  image::{Pixel, Rgba, RgbaImage},
  std::thread
};


pub trait Draw<Backend> {
  /// rasterize onto `image`; `canvas` is the world extent being shown
  fn draw(&self, image: &mut Backend, canvas: Size2D<f64, WorldSpace>);
}

// fit the canvas in the center of image, preserving aspect ratio
fn rescale_canvas(
  canvas: Size2D<f64, WorldSpace>,
  resolution: Size2D<u32, PixelSpace>
) -> (
  V2<f64, PixelSpace>, // offset
  f64 // pixels per world unit
) {
  let scale = (resolution.width as f64 / canvas.width)
    .min(resolution.height as f64 / canvas.height);
  let offset = (resolution.to_f64().to_vector()
    - canvas.to_vector().cast_unit() * scale) / 2.0;
  (offset, scale)
}

impl Draw<RgbaImage> for Disc {
  fn draw(&self, image: &mut RgbaImage, canvas: Size2D<f64, WorldSpace>) {
    let resolution: Size2D<_, PixelSpace> = image.dimensions().into();
    let (offset, scale) = rescale_canvas(canvas, resolution);
    let bounding_box = self.bounding_box()
      .scale(scale, scale).cast_unit()
      .translate(offset)
      .round_out()
      .intersection(&Box2D::from_size(resolution.to_f64()))
      .map(|x| x.to_u32());
    let bounding_box = match bounding_box {
      Some(x) => x,
      None => return // fully off-screen
    };
    let Δp = 1.0 / scale;
    let color = Rgba([self.color[0], self.color[1], self.color[2], 0xFF]);

    itertools::iproduct!(bounding_box.y_range(), bounding_box.x_range())
      .map(|(y, x)| Point2D::<_, PixelSpace>::from([x, y]))
      .for_each(|pixel| {
        let sdf = self.sdf(to_world_space(pixel, offset, scale));
        let pixel = image.get_pixel_mut(pixel.x, pixel.y);
        *pixel = sdf_overlay_aa(sdf, Δp, *pixel, color);
      });
  }
}

fn sdf_overlay_aa(sdf: f64, Δp: f64, mut col1: Rgba<u8>, mut col2: Rgba<u8>) -> Rgba<u8> {
  let Δf = (0.5 * Δp - sdf) // antialias
    .clamp(0.0, Δp);
  let alpha = Δf / Δp;
  // overlay blending with premultiplied alpha
  col2.0[3] = ((col2.0[3] as f64) * alpha) as u8;
  col1.blend(&col2);
  col1
}

/// Rasterize `discs` on a single thread, in the order given.
pub fn draw(
  discs: impl Iterator<Item = Disc>,
  canvas: Size2D<f64, WorldSpace>,
  resolution: Size2D<u32, PixelSpace>
) -> RgbaImage {
  let mut image = RgbaImage::new(resolution.width, resolution.height);
  discs.for_each(|disc| disc.draw(&mut image, canvas));
  image
}

/// Rasterize `discs`, parallel.
/// Will use up to `resolution.area * num_threads * 4` bytes of memory.
pub fn draw_parallel(
  discs: impl Iterator<Item = Disc>,
  canvas: Size2D<f64, WorldSpace>,
  resolution: Size2D<u32, PixelSpace>,
  num_threads: usize
) -> RgbaImage {
  use rand::prelude::*;

  let mut rng = rand_pcg::Pcg64::seed_from_u64(0);

  let mut draw_data = discs.collect::<Vec<_>>();
  if draw_data.is_empty() {
    return RgbaImage::new(resolution.width, resolution.height)
  }
  // will distribute the load between threads [statistically] evenly
  draw_data.shuffle(&mut rng);

  let num_threads = num_threads.clamp(1, draw_data.len());

  // ceil chunking may realize fewer chunks than requested; one worker per chunk
  let draw_data_chunks = draw_data
    .chunks((draw_data.len() as f64 / num_threads as f64).ceil() as usize)
    .map(|chunk| chunk.to_vec())
    .collect::<Vec<_>>();

  let partial_buffers = draw_data_chunks.into_iter().map(|chunk| {
    thread::spawn(move || {
      let mut framebuffer = RgbaImage::new(resolution.width, resolution.height);

      chunk.into_iter()
        .for_each(|disc| disc.draw(&mut framebuffer, canvas));

      framebuffer
    })
  }).collect::<Vec<_>>() // thread handles
    .into_iter()
    .map(|thread| thread.join().unwrap())
    .collect::<Vec<_>>();

  let mut final_buffer = partial_buffers[0].clone();

  // merge partial buffers
  partial_buffers
    .into_iter()
    .skip(1)
    .for_each(|buffer|
      image::imageops::overlay(&mut final_buffer, &buffer, 0, 0)
    );

  final_buffer
}

impl Packing {
  /// Render the current snapshot; the longer canvas side maps to
  /// `resolution` pixels.
  pub fn render(&self, resolution: u32) -> RgbaImage {
    let canvas = self.canvas();
    let aspect = canvas.width / canvas.height;
    let (width, height) = if aspect >= 1.0 {
      (resolution, (resolution as f64 / aspect).round() as u32)
    } else {
      ((resolution as f64 * aspect).round() as u32, resolution)
    };
    draw(
      self.discs().copied(),
      canvas,
      Size2D::new(width.max(1), height.max(1))
    )
  }
}
