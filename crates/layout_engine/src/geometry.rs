//! Geometry resolution
//!
//! Page setup arrives in hundredths of an inch; layout works in points.

use crate::{LayoutError, Result};
use grid_model::PageSetup;
use serde::{Deserialize, Serialize};

/// Points per hundredth of an inch (72 / 100)
pub const POINTS_PER_HUNDREDTH_INCH: f64 = 72.0 / 100.0;

/// Convert hundredths of an inch to points, unrounded
pub fn hundredths_to_points(value: f64) -> f64 {
    value * POINTS_PER_HUNDREDTH_INCH
}

/// Resolved page geometry in points.
///
/// Page dimensions are whole points so they can go into a MediaBox as-is;
/// margins keep their fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub landscape: bool,
}

impl PageGeometry {
    pub fn printable_width(&self) -> f64 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn printable_height(&self) -> f64 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Lowest y a row may reach
    pub fn content_bottom(&self) -> f64 {
        self.page_height - self.margin_bottom
    }
}

/// Resolve a page setup into point-space geometry.
///
/// Landscape swaps the paper's width and height; margins stay attached to
/// their named sides.
pub fn resolve_geometry(setup: &PageSetup) -> Result<PageGeometry> {
    setup
        .validate()
        .map_err(|e| LayoutError::InvalidGeometry(e.to_string()))?;

    let (paper_width, paper_height) = setup.paper_size();
    let mut page_width = hundredths_to_points(f64::from(paper_width)).round();
    let mut page_height = hundredths_to_points(f64::from(paper_height)).round();
    if setup.landscape {
        std::mem::swap(&mut page_width, &mut page_height);
    }

    let m = &setup.margins;
    let geometry = PageGeometry {
        page_width,
        page_height,
        margin_left: hundredths_to_points(f64::from(m.left)),
        margin_right: hundredths_to_points(f64::from(m.right)),
        margin_top: hundredths_to_points(f64::from(m.top)),
        margin_bottom: hundredths_to_points(f64::from(m.bottom)),
        landscape: setup.landscape,
    };

    if geometry.printable_width() <= 0.0 || geometry.printable_height() <= 0.0 {
        return Err(LayoutError::InvalidGeometry(format!(
            "printable area is {:.2} x {:.2} pt",
            geometry.printable_width(),
            geometry.printable_height()
        )));
    }

    tracing::debug!(
        width = geometry.page_width,
        height = geometry.page_height,
        landscape = geometry.landscape,
        "resolved page geometry"
    );
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_model::{Margins, PaperKind};

    #[test]
    fn test_a4_portrait() {
        let g = resolve_geometry(&PageSetup::default()).unwrap();
        assert_eq!(g.page_width, 595.0);
        assert_eq!(g.page_height, 842.0);
        assert!((g.margin_left - 56.88).abs() < 1e-9);
        assert!((g.printable_width() - (595.0 - 2.0 * 56.88)).abs() < 1e-9);
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let portrait = resolve_geometry(&PageSetup::default()).unwrap();
        let landscape = resolve_geometry(&PageSetup::default().with_landscape(true)).unwrap();
        assert_eq!(landscape.page_width, portrait.page_height);
        assert_eq!(landscape.page_height, portrait.page_width);
        assert!((landscape.printable_width() - portrait.printable_height()).abs() < 1e-9);
        assert!((landscape.printable_height() - portrait.printable_width()).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_only_on_page_dimensions() {
        // 850 * 0.72 = 612, 1100 * 0.72 = 792; 33 * 0.72 keeps its fraction
        let setup = PageSetup::new(PaperKind::Letter).with_margins(Margins::uniform(33));
        let g = resolve_geometry(&setup).unwrap();
        assert_eq!((g.page_width, g.page_height), (612.0, 792.0));
        assert!((g.margin_top - 23.76).abs() < 1e-9);
    }

    #[test]
    fn test_page_dimensions_round_to_nearest() {
        // 1025 * 0.72 = 738.0, 1026 * 0.72 = 738.72
        let setup = PageSetup::new(PaperKind::Custom { width: 1026, height: 1025 })
            .with_margins(Margins::uniform(0));
        let g = resolve_geometry(&setup).unwrap();
        assert_eq!(g.page_width, 739.0);
        assert_eq!(g.page_height, 738.0);
    }

    #[test]
    fn test_degenerate_printable_area() {
        let setup = PageSetup::new(PaperKind::A4).with_margins(Margins {
            left: 500,
            right: 500,
            top: 79,
            bottom: 79,
        });
        assert!(matches!(
            resolve_geometry(&setup),
            Err(LayoutError::InvalidGeometry(_))
        ));
    }
}
