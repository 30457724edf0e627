//! Deterministic metrics provider
//!
//! Returns the same metrics on every machine so layout and serializer tests
//! never depend on installed fonts.

use crate::{FontKey, FontMetrics, FontMetricsProvider, Result, TextError, WIDTH_COUNT};
use std::cell::Cell;
use std::sync::Arc;

const PROGRAM_LEN: usize = 6000;

/// Provider with a 1000-unit em, one advance width for every code and
/// line height equal to the font size.
#[derive(Debug)]
pub struct FixedMetricsProvider {
    advance: u16,
    unavailable: Vec<String>,
    calls: Cell<usize>,
}

impl Default for FixedMetricsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedMetricsProvider {
    pub fn new() -> Self {
        Self {
            advance: 500,
            unavailable: Vec::new(),
            calls: Cell::new(0),
        }
    }

    /// Use `advance` (glyph space) for every character
    pub fn with_advance(mut self, advance: u16) -> Self {
        self.advance = advance;
        self
    }

    /// Fail resolution for `family`, as a platform without the font would
    pub fn with_unavailable(mut self, family: impl Into<String>) -> Self {
        self.unavailable.push(family.into());
        self
    }

    /// Successful resolutions served so far
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

/// Synthetic program bytes, stable per key
fn synthetic_program(key: &FontKey) -> Vec<u8> {
    let seed = key
        .to_string()
        .bytes()
        .fold(7u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    (0..PROGRAM_LEN)
        .map(|i| (seed.wrapping_add((i as u32).wrapping_mul(2_654_435_761)) >> 13) as u8)
        .collect()
}

impl FontMetricsProvider for FixedMetricsProvider {
    fn resolve(&self, key: &FontKey) -> Result<Arc<FontMetrics>> {
        if self
            .unavailable
            .iter()
            .any(|f| f.eq_ignore_ascii_case(&key.family))
        {
            return Err(TextError::font_resolution(key, "family not installed"));
        }
        self.calls.set(self.calls.get() + 1);

        Ok(Arc::new(FontMetrics {
            key: key.clone(),
            widths: vec![self.advance; WIDTH_COUNT],
            bbox: [-50, -200, 1000, 900],
            italic_angle: if key.style.is_italic() { -12.0 } else { 0.0 },
            ascent: 800,
            descent: -200,
            line_gap: 0,
            cap_height: 700,
            em_square: 1000,
            program: synthetic_program(key),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FontStyle;

    #[test]
    fn test_fixed_metrics() {
        let provider = FixedMetricsProvider::new();
        let m = provider.resolve(&FontKey::regular("Arial")).unwrap();
        assert_eq!(m.widths.len(), 224);
        assert_eq!(m.line_height(12.0), 12.0);
        assert_eq!(m.text_width("Page 1 / 1", 9.0), 45.0);
        assert_eq!(m.program.len(), PROGRAM_LEN);
    }

    #[test]
    fn test_program_is_stable_per_key() {
        let provider = FixedMetricsProvider::new();
        let a = provider.resolve(&FontKey::regular("Arial")).unwrap();
        let b = provider.resolve(&FontKey::regular("Arial")).unwrap();
        let c = provider.resolve(&FontKey::new("Arial", FontStyle::Bold)).unwrap();
        assert_eq!(a.program, b.program);
        assert_ne!(a.program, c.program);
    }

    #[test]
    fn test_unavailable_family() {
        let provider = FixedMetricsProvider::new().with_unavailable("Wingdings");
        let err = provider.resolve(&FontKey::regular("Wingdings")).unwrap_err();
        assert!(err.to_string().contains("Wingdings Regular"));
        assert_eq!(provider.calls(), 0);
    }
}
