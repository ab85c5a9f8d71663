// src/ports/mod.rs
pub mod http;
pub mod tiles;

pub use tiles::{NoteTile, TilePresenter};
