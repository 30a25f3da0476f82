use {
  super::*,
  crate::{color::Palette, geometry::P2},
  anyhow::Result,
  itertools::Itertools
};

fn base_config() -> Config {
  Config {
    width: 128,
    height: 128,
    rmin: 2.0,
    rmax: 12.0,
    rincr: 0.5,
    rvar: 0.4,
    epsilon: 0.5,
    max_tries: 16,
    noise_scale: None,
    seed: 48,
    color: ColorMode::default()
  }
}

fn complete(config: Config) -> Result<Packing> {
  let mut packing = Packing::new(config)?;
  while packing.advance() != Step::Done {}
  Ok(packing)
}

#[test] fn starts_with_one_disc() -> Result<()> {
  let packing = Packing::new(base_config())?;
  assert_eq!(packing.discs().count(), 1);
  assert_eq!(packing.frontier().len(), 1);
  assert!(!packing.is_done());
  let seed = packing.discs().next().unwrap();
  assert!(seed.xy.x - seed.r >= 0.0 && seed.xy.x + seed.r <= 128.0);
  assert!(seed.xy.y - seed.r >= 0.0 && seed.xy.y + seed.r <= 128.0);
  Ok(())
}

#[test] fn rejects_invalid_configs() {
  let ok = base_config();
  let broken = [
    Config { width: 0, ..ok },
    Config { height: 0, ..ok },
    Config { rmin: 0.0, ..ok },
    Config { rmin: -1.0, ..ok },
    Config { rmin: 13.0, ..ok },                       // rmin > rmax
    Config { rincr: 0.0, ..ok },
    Config { rincr: 1e-300, ..ok },                    // below float resolution
    Config { rvar: 0.0, ..ok },
    Config { rvar: 1.5, ..ok },
    Config { epsilon: -0.1, ..ok },
    Config { max_tries: 0, ..ok },
    Config { noise_scale: Some((0.0, 0.01)), ..ok },
    Config { noise_scale: Some((0.01, -2.0)), ..ok },
    Config { color: ColorMode::Random { cmin: 9, cmax: 3 }, ..ok },
    Config { width: 20, ..ok },                        // 2·rmax > min side
    Config { rmin: f64::NAN, ..ok },
  ];
  for config in broken {
    assert!(Packing::new(config).is_err(), "accepted {:?}", config);
  }
  assert!(Packing::new(ok).is_ok());
}

#[test] fn subresolution_rincr_is_rejected() {
  // ulp grows with magnitude: an increment that advances rmin can still be
  // swallowed near rmax, so the guard keys on rmax
  let stalls = Config { rincr: 3.0 * f64::EPSILON, ..base_config() };
  assert!(Packing::new(stalls).is_err());
  let fine = Config {
    rincr: 16.0 * f64::EPSILON,
    rvar: 1.0,                  // keeps every ladder a singleton
    ..base_config()
  };
  assert!(Packing::new(fine).is_ok());
}

#[test] fn equal_radius_bounds_are_valid() -> Result<()> {
  let packing = complete(Config {
    rmin: 5.0, rmax: 5.0, rvar: 1.0,
    ..base_config()
  })?;
  assert!(packing.discs().all(|disc| disc.r == 5.0));
  Ok(())
}

#[test] fn no_overlap() -> Result<()> {
  let config = base_config();
  let packing = complete(config)?;
  let discs = packing.discs().copied().collect::<Vec<_>>();
  assert!(discs.len() > 1);
  discs.iter().tuple_combinations().for_each(|(a, b)| {
    let min_dist = a.r + b.r + config.epsilon;
    let dist = (a.xy - b.xy).length();
    assert!(
      dist >= min_dist * (1.0 - 1e-6),
      "{:?} and {:?} are {} apart, need {}", a.xy, b.xy, dist, min_dist
    );
  });
  Ok(())
}

// the padded query window must also hold when the spacing margin rivals the
// radii themselves
#[test] fn generous_epsilon_is_respected() -> Result<()> {
  let config = Config {
    width: 150, height: 150,
    rmin: 2.0, rmax: 8.0,
    epsilon: 6.0,
    seed: 7,
    ..base_config()
  };
  let packing = complete(config)?;
  let discs = packing.discs().copied().collect::<Vec<_>>();
  assert!(discs.len() > 1);
  discs.iter().tuple_combinations().for_each(|(a, b)| {
    let min_dist = a.r + b.r + 6.0;
    assert!((a.xy - b.xy).length() >= min_dist * (1.0 - 1e-6));
  });
  Ok(())
}

#[test] fn contained_in_canvas() -> Result<()> {
  let packing = complete(base_config())?;
  let canvas = packing.canvas();
  for disc in packing.discs() {
    assert!(disc.xy.x - disc.r >= 0.0 && disc.xy.x + disc.r <= canvas.width);
    assert!(disc.xy.y - disc.r >= 0.0 && disc.xy.y + disc.r <= canvas.height);
  }
  Ok(())
}

#[test] fn driving_styles_are_interchangeable() -> Result<()> {
  // style one: step manually, collect placements from the step reports
  let mut stepped = Packing::new(base_config())?;
  let mut placed = vec![];
  loop {
    match stepped.advance() {
      Step::Placed(disc) => placed.push(disc),
      Step::Done => break,
      Step::Narrowed | Step::Retired => ()
    }
  }

  // style two: drain the iterator
  let mut drained = Packing::new(base_config())?;
  let yielded = drained.placements().collect::<Vec<_>>();

  assert_eq!(placed, yielded);
  assert_eq!(
    stepped.discs().copied().collect::<Vec<_>>(),
    drained.discs().copied().collect::<Vec<_>>()
  );
  Ok(())
}

#[test] fn resumable_at_any_call_boundary() -> Result<()> {
  let reference = {
    let mut packing = Packing::new(base_config())?;
    packing.placements().for_each(drop);
    packing.discs().copied().collect::<Vec<_>>()
  };

  let mut paused = Packing::new(base_config())?;
  for _ in 0..37 {
    paused.advance();
  }
  let mut resumed = paused.clone();
  resumed.placements().for_each(drop);
  assert_eq!(resumed.discs().copied().collect::<Vec<_>>(), reference);
  Ok(())
}

#[test] fn done_is_absorbing() -> Result<()> {
  let mut packing = complete(base_config())?;
  let snapshot = packing.discs().copied().collect::<Vec<_>>();
  for _ in 0..5 {
    assert_eq!(packing.advance(), Step::Done);
  }
  assert!(packing.is_done());
  assert_eq!(packing.discs().copied().collect::<Vec<_>>(), snapshot);
  Ok(())
}

#[test] fn terminates_within_step_budget() -> Result<()> {
  let mut packing = Packing::new(base_config())?;
  let mut steps = 0u64;
  while packing.advance() != Step::Done {
    steps += 1;
    assert!(steps < 200_000, "run did not converge");
  }
  Ok(())
}

#[test] fn every_failure_shrinks_the_frontier_measure() -> Result<()> {
  let mut packing = Packing::new(base_config())?;
  let measure = |packing: &Packing| packing.frontier().iter()
    .map(|site| site.sizes.len())
    .sum::<usize>();

  let (mut placed, mut narrowed, mut retired) = (0u32, 0u32, 0u32);
  loop {
    let before = measure(&packing);
    let sites_before = packing.frontier().len();
    match packing.advance() {
      Step::Placed(_) => {
        placed += 1;
        assert_eq!(packing.frontier().len(), sites_before + 1);
      }
      Step::Narrowed => {
        narrowed += 1;
        assert!(measure(&packing) < before);
        assert_eq!(packing.frontier().len(), sites_before);
      }
      Step::Retired => {
        retired += 1;
        assert!(measure(&packing) < before);
        assert_eq!(packing.frontier().len(), sites_before - 1);
      }
      Step::Done => break
    }
  }

  // every accepted disc opens a site, and every site eventually retires
  assert_eq!(retired, placed + 1);
  assert_eq!(packing.discs().count() as u32, placed + 1);
  assert!(narrowed > 0);
  Ok(())
}

// the scenario from the packing density sanity check: fixed radius 5 on a
// 100x100 canvas can never exceed floor(10000 / 25π) = 127 discs
#[test] fn fixed_radius_density_bound() -> Result<()> {
  let config = Config {
    width: 100, height: 100,
    rmin: 5.0, rmax: 5.0,
    rincr: 1.0, rvar: 1.0,
    epsilon: 0.0,
    max_tries: 50,
    noise_scale: None,
    seed: 42,
    color: ColorMode::default()
  };
  let first = complete(config)?.discs().copied().collect::<Vec<_>>();
  assert!(first.len() <= 127, "{} discs exceed the area bound", first.len());
  assert!(first.len() >= 20, "implausibly sparse run: {} discs", first.len());

  let second = complete(config)?.discs().copied().collect::<Vec<_>>();
  assert_eq!(first, second);
  Ok(())
}

#[test] fn cosine_colors_follow_the_palette() -> Result<()> {
  let palette = Palette::default();
  let config = Config { color: ColorMode::Cosine(palette), ..base_config() };
  let packing = complete(config)?;
  for disc in packing.discs() {
    assert_eq!(disc.color, palette.eval(1.5 * disc.r / config.rmax));
  }
  Ok(())
}

#[test] fn random_colors_stay_in_range() -> Result<()> {
  let config = Config {
    color: ColorMode::Random { cmin: 0x30, cmax: 0xD0 },
    ..base_config()
  };
  let packing = complete(config)?;
  for disc in packing.discs() {
    for channel in disc.color {
      assert!((0x30..=0xD0).contains(&channel));
    }
  }
  Ok(())
}

#[test] fn orientations_are_unit_or_absent() -> Result<()> {
  let packing = complete(base_config())?;
  for disc in packing.discs() {
    if let Some(orientation) = disc.orientation {
      assert!((orientation.length() - 1.0).abs() < 1e-9);
    }
  }
  Ok(())
}

#[test] fn ladders_are_never_empty() -> Result<()> {
  let configs = [
    base_config(),
    Config { rmin: 5.0, rmax: 5.0, rvar: 1.0, ..base_config() },
    Config { rvar: 1.0, ..base_config() },
    Config { rincr: 100.0, ..base_config() },
  ];
  for config in configs {
    let packing = Packing::new(config)?;
    for (y, x) in itertools::iproduct!(0..16, 0..16) {
      let ladder = sizes::ladder(
        packing.field(), &config,
        P2::new(x as f64 * 8.0, y as f64 * 8.0)
      );
      assert!(!ladder.is_empty());
      assert!(ladder.iter().all(|&r| (config.rmin..=config.rmax).contains(&r)));
      assert!(ladder.windows(2).all(|pair| pair[0] < pair[1]), "not ascending");
    }
  }
  Ok(())
}

