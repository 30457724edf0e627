//! Render Model - Drawing command log
//!
//! Layout records what to draw as a flat, page-tagged list of rectangles
//! and text runs. Each exporter consumes the same log; pages are a
//! projection over it by tag, never a materialised structure.

mod command;
mod error;
mod log;

pub use command::*;
pub use error::*;
pub use log::*;
