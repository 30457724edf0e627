//! Grid pagination
//!
//! Each page carries a right-aligned "Page k / N" stamp, the grid title, a
//! bordered header row and as many bordered data rows as fit above the
//! bottom margin. Every grid starts on a fresh page.
//!
//! The total page count is only known after layout, so pagination runs the
//! same [`PageLayouter::layout_page`] twice: a dry pass that only counts and a
//! recording pass that knows `N`.

use crate::{LayoutError, PageGeometry, Result};
use grid_model::Grid;
use render_model::{CellRef, CommandLog, DrawCommand, Rect, RectCommand, TextCommand, TextRole};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use text_engine::{FontKey, FontMetricsProvider};

/// Fonts and spacing of the printed grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStyle {
    pub title_font: FontKey,
    pub title_size: f64,
    pub stamp_font: FontKey,
    pub stamp_size: f64,
    pub header_font: FontKey,
    pub header_size: f64,
    pub cell_font: FontKey,
    pub cell_size: f64,
    /// Fixed height of every row
    pub row_height: f64,
    /// Inset of cell text from the cell's top-left corner
    pub cell_padding: f64,
    /// Space between the title line and the header row
    pub title_gap: f64,
    /// Drop of the page stamp below the top margin
    pub stamp_offset: f64,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            title_font: FontKey::bold("Arial"),
            title_size: 12.0,
            stamp_font: FontKey::regular("Arial"),
            stamp_size: 9.0,
            header_font: FontKey::bold("Arial"),
            header_size: 9.0,
            cell_font: FontKey::regular("Arial"),
            cell_size: 8.0,
            row_height: 15.0,
            cell_padding: 3.0,
            title_gap: 10.0,
            stamp_offset: 3.0,
        }
    }
}

/// Whether a layout run records commands or only advances cursors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPass {
    DryRun,
    Record,
}

impl LayoutPass {
    pub fn records(&self) -> bool {
        matches!(self, LayoutPass::Record)
    }
}

/// Rows of one grid that landed on one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpan {
    /// 1-based page number
    pub page: u32,
    /// Index of the grid in the input slice
    pub grid: usize,
    /// Source rows drawn on the page
    pub rows: Range<usize>,
}

/// Result of a full two-pass pagination
#[derive(Debug, Clone)]
pub struct Pagination {
    pub log: CommandLog,
    pub page_count: u32,
    pub spans: Vec<PageSpan>,
}

impl Pagination {
    /// Rows per grid that no page holds, for grids abandoned mid-way
    pub fn unplaced_rows(&self, grids: &[Grid]) -> Vec<(usize, Range<usize>)> {
        grids
            .iter()
            .enumerate()
            .filter_map(|(index, grid)| {
                let end = self
                    .spans
                    .iter()
                    .filter(|s| s.grid == index)
                    .map(|s| s.rows.end)
                    .max()
                    .unwrap_or(0);
                (end < grid.row_count()).then_some((index, end..grid.row_count()))
            })
            .collect()
    }
}

struct Recorder<'a> {
    pass: LayoutPass,
    log: &'a mut CommandLog,
}

impl Recorder<'_> {
    fn emit(&mut self, command: DrawCommand) {
        if self.pass.records() {
            self.log.push(command);
        }
    }
}

/// Lays grids out onto pages of one geometry
pub struct PageLayouter<'a> {
    geometry: &'a PageGeometry,
    style: &'a LayoutStyle,
    fonts: &'a dyn FontMetricsProvider,
}

impl<'a> PageLayouter<'a> {
    pub fn new(
        geometry: &'a PageGeometry,
        style: &'a LayoutStyle,
        fonts: &'a dyn FontMetricsProvider,
    ) -> Self {
        Self {
            geometry,
            style,
            fonts,
        }
    }

    /// Lay out one page of `grid` starting at `cursor_row`.
    ///
    /// Returns the index of the first row that did not fit (the grid's row
    /// count when everything fit). Commands go to `log` only for
    /// [`LayoutPass::Record`].
    pub fn layout_page(
        &self,
        grid: &Grid,
        cursor_row: usize,
        page: u32,
        total_pages: u32,
        pass: LayoutPass,
        log: &mut CommandLog,
    ) -> Result<usize> {
        grid.validate()?;
        let g = self.geometry;
        let s = self.style;
        let mut out = Recorder { pass, log };

        let stamp = format!("Page {page} / {total_pages}");
        let stamp_width = self.fonts.resolve(&s.stamp_font)?.text_width(&stamp, s.stamp_size);
        let stamp_top = g.margin_top + s.stamp_offset;
        out.emit(DrawCommand::Text(TextCommand {
            content: stamp,
            font: s.stamp_font.clone(),
            font_size: s.stamp_size,
            x: g.page_width - g.margin_right - stamp_width,
            y: stamp_top + s.stamp_size,
            page,
            role: TextRole::PageStamp,
            cell: None,
        }));

        let title_metrics = self.fonts.resolve(&s.title_font)?;
        out.emit(DrawCommand::Text(TextCommand {
            content: grid.title(),
            font: s.title_font.clone(),
            font_size: s.title_size,
            x: g.margin_left,
            y: g.margin_top + s.title_size,
            page,
            role: TextRole::Title,
            cell: None,
        }));

        let mut y = g.margin_top + title_metrics.line_height(s.title_size) + s.title_gap;
        let column_width = g.printable_width() / grid.column_count() as f64;

        self.fonts.resolve(&s.header_font)?;
        for (column, header) in grid.columns.iter().enumerate() {
            self.emit_cell(
                &mut out,
                CellRef::new(0, column),
                y,
                column_width,
                header,
                page,
            );
        }
        y += s.row_height;

        if cursor_row < grid.row_count() {
            self.fonts.resolve(&s.cell_font)?;
        }
        let bottom = g.content_bottom();
        let mut row = cursor_row;
        let mut band = 1;
        while row < grid.row_count() {
            if y + s.row_height > bottom {
                break;
            }
            for column in 0..grid.column_count() {
                self.emit_cell(
                    &mut out,
                    CellRef::new(band, column),
                    y,
                    column_width,
                    grid.cell(row, column),
                    page,
                );
            }
            y += s.row_height;
            row += 1;
            band += 1;
        }

        Ok(row)
    }

    fn emit_cell(
        &self,
        out: &mut Recorder<'_>,
        cell: CellRef,
        top: f64,
        column_width: f64,
        content: &str,
        page: u32,
    ) {
        let s = self.style;
        let x = self.geometry.margin_left + cell.column as f64 * column_width;
        let (font, size, role) = if cell.is_header() {
            (&s.header_font, s.header_size, TextRole::Header)
        } else {
            (&s.cell_font, s.cell_size, TextRole::Cell)
        };

        out.emit(DrawCommand::Rectangle(RectCommand {
            rect: Rect::new(x, top, column_width, s.row_height),
            page,
            cell: Some(cell),
        }));
        out.emit(DrawCommand::Text(TextCommand {
            content: content.to_string(),
            font: font.clone(),
            font_size: size,
            x: x + s.cell_padding,
            y: top + s.cell_padding + size,
            page,
            role,
            cell: Some(cell),
        }));
    }

    /// Run one pass over all grids, returning the rows placed on each page
    pub fn run_pass(
        &self,
        grids: &[Grid],
        pass: LayoutPass,
        total_pages: u32,
        log: &mut CommandLog,
    ) -> Result<Vec<PageSpan>> {
        let mut spans = Vec::new();
        let mut page = 0u32;

        for (index, grid) in grids.iter().enumerate() {
            let mut cursor = 0;
            loop {
                page += 1;
                let next = self.layout_page(grid, cursor, page, total_pages, pass, log)?;
                spans.push(PageSpan {
                    page,
                    grid: index,
                    rows: cursor..next,
                });

                if next >= grid.row_count() {
                    break;
                }
                if next == cursor {
                    if pass.records() {
                        tracing::warn!(
                            grid = %grid.name,
                            row = cursor,
                            remaining = grid.row_count() - cursor,
                            "row does not fit on an empty page, abandoning grid"
                        );
                    }
                    break;
                }
                cursor = next;
            }
        }

        Ok(spans)
    }

    /// Page assignment without recording anything
    pub fn plan(&self, grids: &[Grid]) -> Result<Vec<PageSpan>> {
        self.run_pass(grids, LayoutPass::DryRun, 0, &mut CommandLog::new())
    }

    /// Dry pass for the page total, then a recording pass that stamps it
    pub fn paginate(&self, grids: &[Grid]) -> Result<Pagination> {
        let planned = self.plan(grids)?;
        let page_count = u32::try_from(planned.len()).map_err(|_| {
            LayoutError::StructuralAssertion(format!("{} pages overflow", planned.len()))
        })?;

        let mut log = CommandLog::new();
        let spans = self.run_pass(grids, LayoutPass::Record, page_count, &mut log)?;

        if spans != planned {
            return Err(LayoutError::StructuralAssertion(format!(
                "dry pass planned {} pages, recording pass produced {}",
                planned.len(),
                spans.len()
            )));
        }
        log.check_pages(page_count)
            .map_err(|e| LayoutError::StructuralAssertion(e.to_string()))?;

        tracing::info!(
            grids = grids.len(),
            pages = page_count,
            commands = log.len(),
            "paginated grids"
        );
        Ok(Pagination {
            log,
            page_count,
            spans,
        })
    }
}

/// Paginate `grids` with the default style
pub fn paginate(
    grids: &[Grid],
    geometry: &PageGeometry,
    fonts: &dyn FontMetricsProvider,
) -> Result<Pagination> {
    let style = LayoutStyle::default();
    PageLayouter::new(geometry, &style, fonts).paginate(grids)
}
