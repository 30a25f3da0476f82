use {
  disc_packing::{
    color::ColorMode,
    drawing,
    solver::packing::{Config, Packing}
  },
  anyhow::Result,
  euclid::Size2D
};

// gravel: a slow field, near-uniform ladders, visible gaps between grains
fn main() -> Result<()> {
  let path = "out.png";
  let mut packing = Packing::new(Config {
    width: 384,
    height: 256,
    rmin: 1.5,
    rmax: 12.0,
    rincr: 0.25,
    rvar: 0.8,
    epsilon: 1.0,
    noise_scale: Some((1.0 / 48.0, 1.0 / 48.0)),
    seed: 30,
    color: ColorMode::Random { cmin: 0x60, cmax: 0xE0 },
    ..Config::default()
  })?;
  packing.placements().for_each(drop);

  drawing::draw(
    packing.discs().copied(),
    packing.canvas(),
    Size2D::new(1536, 1024)
  ).save(path)?;
  open::that(path)?;
  Ok(())
}
