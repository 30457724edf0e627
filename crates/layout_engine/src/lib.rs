//! Layout Engine - Page geometry and grid pagination
//!
//! Converts page setup into point-space geometry and breaks grids into
//! pages, recording what each page draws into a
//! [`render_model::CommandLog`].

mod error;
mod geometry;
mod paginator;

pub use error::*;
pub use geometry::*;
pub use paginator::*;
