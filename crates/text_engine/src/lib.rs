//! Text Engine - Font metrics for layout and embedding
//!
//! Layout measures text and the PDF writer embeds font programs from the
//! same [`FontMetrics`] record, so both agree on every width.
//!
//! # Modules
//!
//! - `font`: Font identity (family + style) and resolved metrics
//! - `provider`: The metrics capability trait and the per-export cache
//! - `system`: Production provider backed by installed fonts (font-kit)
//! - `fixed`: Deterministic provider for tests
//! - `winansi`: The single-byte code page used by embedded fonts

mod error;
mod font;
mod provider;
pub mod fixed;
pub mod system;
pub mod winansi;

pub use error::*;
pub use font::*;
pub use provider::*;

pub use fixed::FixedMetricsProvider;
pub use system::SystemFontProvider;
