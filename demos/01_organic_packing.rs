use {
  disc_packing::{
    drawing,
    solver::packing::{Config, Packing}
  },
  anyhow::Result,
  euclid::Size2D
};

// 0.7s, ≈6'500 discs, 512x512 canvas, 2048x2048 render
fn main() -> Result<()> {
  let path = "out.png";
  let mut packing = Packing::new(Config {
    width: 512,
    height: 512,
    rmin: 1.0,
    rmax: 32.0,
    seed: 10,
    ..Config::default()
  })?;

  let t0 = std::time::Instant::now();
  let count = packing.placements().count();
  println!("{} discs in {}ms", count, t0.elapsed().as_millis());
  println!("{:?}", packing.index());

  drawing::draw_parallel(
    packing.discs().copied(),
    packing.canvas(),
    Size2D::new(2048, 2048),
    8
  ).save(path)?;
  open::that(path)?;
  Ok(())
}
