//! Drawing command types
//!
//! Coordinates are points in a top-down space: y grows downward from the
//! top edge of the page.

use serde::{Deserialize, Serialize};
use text_engine::FontKey;

/// A rectangle in layout coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: left/top edges inside, right/bottom outside
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Position of a grid cell on its page.
///
/// Band 0 is the header row; bands 1.. are the data rows drawn on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    pub band: usize,
    pub column: usize,
}

impl CellRef {
    pub fn new(band: usize, column: usize) -> Self {
        Self { band, column }
    }

    pub fn is_header(&self) -> bool {
        self.band == 0
    }
}

/// What a text run represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextRole {
    /// Grid title at the top-left of the page
    Title,
    /// "Page k / N" at the top-right
    PageStamp,
    /// Column header cell
    Header,
    /// Data cell
    Cell,
}

/// A bordered rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectCommand {
    pub rect: Rect,
    pub page: u32,
    pub cell: Option<CellRef>,
}

/// A single-style string anchored at its baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCommand {
    pub content: String,
    pub font: FontKey,
    pub font_size: f64,
    pub x: f64,
    /// Baseline position
    pub y: f64,
    pub page: u32,
    pub role: TextRole,
    pub cell: Option<CellRef>,
}

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Rectangle(RectCommand),
    Text(TextCommand),
}

impl DrawCommand {
    pub fn page(&self) -> u32 {
        match self {
            DrawCommand::Rectangle(r) => r.page,
            DrawCommand::Text(t) => t.page,
        }
    }

    pub fn cell(&self) -> Option<CellRef> {
        match self {
            DrawCommand::Rectangle(r) => r.cell,
            DrawCommand::Text(t) => t.cell,
        }
    }

    pub fn as_rect(&self) -> Option<&RectCommand> {
        match self {
            DrawCommand::Rectangle(r) => Some(r),
            DrawCommand::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextCommand> {
        match self {
            DrawCommand::Text(t) => Some(t),
            DrawCommand::Rectangle(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(10.0, 20.0, 30.0, 15.0);
        assert!(r.contains(10.0, 20.0));
        assert!(r.contains(39.9, 34.9));
        assert!(!r.contains(40.0, 25.0));
        assert!(!r.contains(15.0, 35.0));
        assert_eq!(r.bottom(), 35.0);
    }

    #[test]
    fn test_command_accessors() {
        let cmd = DrawCommand::Rectangle(RectCommand {
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            page: 3,
            cell: Some(CellRef::new(0, 2)),
        });
        assert_eq!(cmd.page(), 3);
        assert!(cmd.cell().is_some_and(|c| c.is_header()));
        assert!(cmd.as_text().is_none());
    }
}
