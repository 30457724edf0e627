//! Grid Model - Tabular input and page setup
//!
//! This crate holds the two inputs an export consumes: named grids of
//! string cells and the page-setup configuration (margins, paper kind,
//! orientation) expressed in hundredths of an inch.

mod error;
mod grid;
mod page_setup;
mod paper;

pub use error::*;
pub use grid::*;
pub use page_setup::*;
pub use paper::*;
