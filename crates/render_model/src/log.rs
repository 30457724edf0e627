//! The command log

use crate::{DrawCommand, RectCommand, RenderError, Result, TextCommand};
use std::collections::BTreeMap;
use text_engine::FontKey;

/// Ordered, page-tagged drawing commands for one export.
///
/// A fresh log is built per export and handed to a serializer by value or
/// reference; nothing about it is global.
///
/// Per-page projections are served from an index maintained on push, so
/// walking every page costs one pass over the log in total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandLog {
    commands: Vec<DrawCommand>,
    /// Page tag → positions in `commands`, ascending
    by_page: BTreeMap<u32, Vec<usize>>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.by_page
            .entry(command.page())
            .or_default()
            .push(self.commands.len());
        self.commands.push(command);
    }

    pub fn push_rect(&mut self, rect: RectCommand) {
        self.push(DrawCommand::Rectangle(rect));
    }

    pub fn push_text(&mut self, text: TextCommand) {
        self.push(DrawCommand::Text(text));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Distinct page tags, ascending
    pub fn page_numbers(&self) -> Vec<u32> {
        self.by_page.keys().copied().collect()
    }

    /// Commands on one page, in recording order
    pub fn page(&self, page: u32) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.by_page
            .get(&page)
            .into_iter()
            .flatten()
            .map(move |&index| &self.commands[index])
    }

    pub fn rects_on(&self, page: u32) -> impl Iterator<Item = &RectCommand> + '_ {
        self.page(page).filter_map(DrawCommand::as_rect)
    }

    pub fn texts_on(&self, page: u32) -> impl Iterator<Item = &TextCommand> + '_ {
        self.page(page).filter_map(DrawCommand::as_text)
    }

    /// Distinct fonts in first-use order
    pub fn font_keys(&self) -> Vec<FontKey> {
        let mut keys: Vec<FontKey> = Vec::new();
        for text in self.commands.iter().filter_map(DrawCommand::as_text) {
            if !keys.contains(&text.font) {
                keys.push(text.font.clone());
            }
        }
        keys
    }

    /// Every tag must lie in `1..=page_count` and every page must be used
    pub fn check_pages(&self, page_count: u32) -> Result<()> {
        if let Some(bad) = self
            .commands
            .iter()
            .map(DrawCommand::page)
            .find(|p| *p == 0 || *p > page_count)
        {
            return Err(RenderError::PageOutOfRange {
                page: bad,
                page_count,
            });
        }
        if let Some(missing) = (1..=page_count).find(|p| !self.by_page.contains_key(p)) {
            return Err(RenderError::EmptyPage(missing));
        }
        Ok(())
    }
}

impl IntoIterator for CommandLog {
    type Item = DrawCommand;
    type IntoIter = std::vec::IntoIter<DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellRef, Rect, TextRole};

    fn rect(page: u32, x: f64, y: f64) -> RectCommand {
        RectCommand {
            rect: Rect::new(x, y, 50.0, 15.0),
            page,
            cell: Some(CellRef::new(0, 0)),
        }
    }

    fn text(page: u32, content: &str, font: FontKey) -> TextCommand {
        TextCommand {
            content: content.to_string(),
            font,
            font_size: 9.0,
            x: 0.0,
            y: 0.0,
            page,
            role: TextRole::Cell,
            cell: None,
        }
    }

    #[test]
    fn test_page_projection() {
        let mut log = CommandLog::new();
        log.push_rect(rect(1, 0.0, 0.0));
        log.push_text(text(2, "b", FontKey::regular("Arial")));
        log.push_text(text(1, "a", FontKey::regular("Arial")));

        assert_eq!(log.page_numbers(), vec![1, 2]);
        assert_eq!(log.page(1).count(), 2);
        assert_eq!(log.texts_on(1).next().map(|t| t.content.as_str()), Some("a"));
        assert_eq!(log.rects_on(2).count(), 0);
    }

    #[test]
    fn test_page_index_matches_tags_across_many_pages() {
        let mut log = CommandLog::new();
        // Interleaved so no page is recorded contiguously
        for i in 0..600u32 {
            let page = i % 150 + 1;
            log.push_text(text(page, &i.to_string(), FontKey::regular("Arial")));
            if i % 2 == 0 {
                log.push_rect(rect(page, f64::from(i), 0.0));
            }
        }
        assert_eq!(log.page_numbers(), (1..=150).collect::<Vec<_>>());
        for page in [1, 2, 75, 150] {
            let indexed: Vec<&DrawCommand> = log.page(page).collect();
            let scanned: Vec<&DrawCommand> =
                log.commands().iter().filter(|c| c.page() == page).collect();
            assert_eq!(indexed, scanned);
            assert_eq!(log.texts_on(page).count(), 4);
        }
        assert_eq!(log.page(151).count(), 0);
        assert!(log.check_pages(150).is_ok());
    }

    #[test]
    fn test_font_keys_first_use_order() {
        let mut log = CommandLog::new();
        log.push_text(text(1, "x", FontKey::bold("Arial")));
        log.push_text(text(1, "y", FontKey::regular("Arial")));
        log.push_text(text(2, "z", FontKey::bold("Arial")));
        assert_eq!(
            log.font_keys(),
            vec![FontKey::bold("Arial"), FontKey::regular("Arial")]
        );
    }

    #[test]
    fn test_check_pages() {
        let mut log = CommandLog::new();
        log.push_rect(rect(1, 0.0, 0.0));
        log.push_rect(rect(3, 0.0, 0.0));

        assert!(matches!(
            log.check_pages(2),
            Err(RenderError::PageOutOfRange { page: 3, .. })
        ));
        assert!(matches!(log.check_pages(3), Err(RenderError::EmptyPage(2))));

        log.push_rect(rect(2, 0.0, 0.0));
        assert!(log.check_pages(3).is_ok());
    }
}
