//! Page setup configuration
//!
//! All lengths are hundredths of an inch, the unit printer dialogs report.

use crate::{GridError, PaperKind, Result};
use serde::{Deserialize, Serialize};

/// Page margins in hundredths of an inch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Margins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Margins {
    /// Same margin on all four sides
    pub fn uniform(value: i32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }
}

impl Default for Margins {
    /// 2 cm rounded to 79 hundredths of an inch
    fn default() -> Self {
        Self::uniform(79)
    }
}

/// Page setup supplied by the host for one export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageSetup {
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub paper: PaperKind,
    #[serde(default)]
    pub landscape: bool,
}

impl PageSetup {
    pub fn new(paper: PaperKind) -> Self {
        Self {
            paper,
            ..Default::default()
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_landscape(mut self, landscape: bool) -> Self {
        self.landscape = landscape;
        self
    }

    /// Paper (width, height) in hundredths of an inch, before the orientation swap
    pub fn paper_size(&self) -> (u32, u32) {
        self.paper.size()
    }

    /// Reject values no printer dialog would produce
    pub fn validate(&self) -> Result<()> {
        let m = &self.margins;
        if m.left < 0 || m.right < 0 || m.top < 0 || m.bottom < 0 {
            return Err(GridError::InvalidPageSetup(format!(
                "negative margin: {m:?}"
            )));
        }
        let (width, height) = self.paper_size();
        if width == 0 || height == 0 {
            return Err(GridError::InvalidPageSetup(format!(
                "paper has zero extent: {width}x{height}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_a4_portrait() {
        let setup = PageSetup::default();
        assert_eq!(setup.paper, PaperKind::A4);
        assert_eq!(setup.margins, Margins::uniform(79));
        assert!(!setup.landscape);
        assert!(setup.validate().is_ok());
    }

    #[test]
    fn test_negative_margin_rejected() {
        let setup = PageSetup::default().with_margins(Margins {
            left: -1,
            ..Margins::default()
        });
        assert!(setup.validate().is_err());
    }

    #[test]
    fn test_zero_custom_paper_rejected() {
        let setup = PageSetup::new(PaperKind::Custom { width: 0, height: 100 });
        assert!(setup.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let setup: PageSetup = serde_json::from_str(r#"{"landscape":true}"#).unwrap();
        assert!(setup.landscape);
        assert_eq!(setup.paper, PaperKind::A4);
    }
}
