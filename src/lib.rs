//! This is a library for noise-guided disc packing in ℝ².
//!
//! It is split into two main modules: [`solver`] for growing a distribution of
//! discs, and [`drawing`] for displaying it (requires `drawing` feature).
//! A packing starts from a single random disc and expands along its *frontier*:
//! the set of accepted discs that may still receive a neighbour. Disc sizes are
//! modulated by a smooth noise field over the canvas, so dense runs of small
//! discs and sparse runs of large ones form organic, pebble-like regions.
//!
//! # Basic usage
//! ```
//! use disc_packing::solver::packing::{Config, Packing};
//!
//! fn main() -> anyhow::Result<()> {
//!   let mut packing = Packing::new(Config {
//!     width: 96,
//!     height: 96,
//!     rmin: 2.0,
//!     rmax: 12.0,
//!     seed: 9,
//!     ..Config::default()
//!   })?;
//!
//!   // Drain the engine; every yielded disc is final.
//!   let discs = packing.placements().collect::<Vec<_>>();
//!
//!   assert!(!discs.is_empty());
//!   assert!(packing.is_done());
//!   Ok(())
//! }
//! ```
//! One placement at a time is also supported, see
//! [`Packing::advance`](solver::packing::Packing::advance); the two driving
//! styles are interchangeable and produce identical packings for the same
//! [`Config`](solver::packing::Config).
//!
//! # Determinism
//! A run is a pure function of its config. All randomness comes from a single
//! `Pcg64` seeded with [`Config::seed`](solver::packing::Config::seed), and the
//! engine never spawns threads, so identical configs reproduce identical
//! packings bit for bit, across runs and across driving styles.
//!
//! # Drawing
//! With the `drawing` feature, a snapshot renders to an `image::RgbaImage`:
//! ```ignore
//! let image = packing.render(2048);
//! image.save("out.png")?;
//! ```
//! See `demos/` for complete programs, including a parallel rasterizer.
//!
//! Have a good day, `nyaa~ =^_^=`

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod color;
pub mod field;
pub mod geometry;
pub mod solver;
#[cfg(feature = "drawing")]
#[cfg_attr(docsrs, doc(cfg(feature = "drawing")))]
pub mod drawing;
