pub mod packing;
pub use packing::Packing;
