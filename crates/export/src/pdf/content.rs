//! PDF Content Streams
//!
//! Builds the operator stream for one page. Layout coordinates are
//! top-down; the stream flips them into PDF's bottom-up space.

use super::objects::{escape_literal, fmt_num};
use render_model::{CommandLog, DrawCommand};
use std::collections::HashMap;
use text_engine::{winansi, FontKey};

/// Operator sequence, one operator group per CRLF-terminated line
#[derive(Debug, Default)]
pub struct ContentStream {
    lines: Vec<Vec<u8>>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, s: impl Into<Vec<u8>>) -> &mut Self {
        self.lines.push(s.into());
        self
    }

    /// Save graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.line("q")
    }

    /// Restore graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.line("Q")
    }

    /// `BT /F size Tf x y Td (text) Tj ET` for one single-style string
    pub fn text(&mut self, resource: &str, size: f64, x: f64, y: f64, text: &str) -> &mut Self {
        self.line("BT");
        self.line(format!("/{resource} {} Tf", fmt_num(size)));
        self.line(format!("{} {} Td", fmt_num(x), fmt_num(y)));
        let mut show = b"(".to_vec();
        show.extend_from_slice(&escape_literal(&winansi::encode(text)));
        show.extend_from_slice(b") Tj");
        self.line(show);
        self.line("ET")
    }

    /// Rectangle path (re) and stroke (S)
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.line(format!(
            "{} {} {} {} re",
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height)
        ));
        self.line("S")
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.lines.join(&b"\r\n"[..])
    }
}

/// Render the commands of one page.
///
/// `resources` maps each font to its page resource name (`F1`, `F2`, ...).
pub fn render_page(
    log: &CommandLog,
    page: u32,
    page_height: f64,
    resources: &HashMap<FontKey, String>,
) -> Vec<u8> {
    let mut stream = ContentStream::new();
    stream.save_state();
    for command in log.page(page) {
        match command {
            DrawCommand::Text(t) => {
                let Some(resource) = resources.get(&t.font) else {
                    tracing::warn!(font = %t.font, "no resource for font, text skipped");
                    continue;
                };
                stream.text(resource, t.font_size, t.x, page_height - t.y, &t.content);
            }
            DrawCommand::Rectangle(r) => {
                let rect = r.rect;
                stream.stroke_rect(
                    rect.x,
                    page_height - rect.y - rect.height,
                    rect.width,
                    rect.height,
                );
            }
        }
    }
    stream.restore_state();
    stream.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use render_model::{Rect, RectCommand, TextCommand, TextRole};

    fn text(page: u32, content: &str, x: f64, y: f64) -> TextCommand {
        TextCommand {
            content: content.to_string(),
            font: FontKey::regular("Arial"),
            font_size: 8.0,
            x,
            y,
            page,
            role: TextRole::Cell,
            cell: None,
        }
    }

    fn resources() -> HashMap<FontKey, String> {
        HashMap::from([(FontKey::regular("Arial"), "F1".to_string())])
    }

    #[test]
    fn test_text_block() {
        let mut log = CommandLog::new();
        log.push_text(text(1, "Hi (x)", 10.0, 100.0));
        let bytes = render_page(&log, 1, 842.0, &resources());
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "q\r\nBT\r\n/F1 8 Tf\r\n10 742 Td\r\n(Hi \\(x\\)) Tj\r\nET\r\nQ"
        );
    }

    #[test]
    fn test_rect_is_flipped_from_its_bottom_edge() {
        let mut log = CommandLog::new();
        log.push_rect(RectCommand {
            rect: Rect::new(56.88, 100.0, 160.31, 15.0),
            page: 1,
            cell: None,
        });
        let bytes = render_page(&log, 1, 842.0, &resources());
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "q\r\n56.88 727 160.31 15 re\r\nS\r\nQ"
        );
    }

    #[test]
    fn test_only_requested_page_is_rendered() {
        let mut log = CommandLog::new();
        log.push_text(text(1, "one", 0.0, 10.0));
        log.push_text(text(2, "two", 0.0, 10.0));
        let page_two = String::from_utf8(render_page(&log, 2, 100.0, &resources())).unwrap();
        assert!(page_two.contains("(two) Tj"));
        assert!(!page_two.contains("(one)"));
    }

    #[test]
    fn test_non_latin_text_is_replaced() {
        let mut log = CommandLog::new();
        log.push_text(text(1, "€\u{4E2D}", 0.0, 0.0));
        let bytes = render_page(&log, 1, 10.0, &resources());
        assert!(bytes.windows(5).any(|w| w == b"(\x80?)"));
    }
}
