use {
  disc_packing::solver::packing::{Config, Packing, Step},
  anyhow::Result
};

// one frame per 256 placements; join them with e.g.
// ffmpeg -framerate 25 -i anim/%03d.png anim.webm
fn main() -> Result<()> {
  std::fs::create_dir("anim").ok();
  let mut packing = Packing::new(Config {
    width: 256,
    height: 256,
    rmin: 1.0,
    rmax: 24.0,
    seed: 1,
    ..Config::default()
  })?;

  let (mut placed, mut frame) = (0u64, 0u64);
  loop {
    match packing.advance() {
      Step::Placed(_) => {
        placed += 1;
        if placed % 256 == 0 {
          packing.render(512).save(format!("anim/{:03}.png", frame))?;
          frame += 1;
          println!("#{} frame, {} discs, frontier {}", frame, placed, packing.frontier().len());
        }
      }
      Step::Done => break,
      Step::Narrowed | Step::Retired => ()
    }
  }
  packing.render(512).save(format!("anim/{:03}.png", frame))?;
  println!("{} discs total", placed);
  Ok(())
}
