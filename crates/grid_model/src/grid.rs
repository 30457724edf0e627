//! Named grids of string cells

use crate::{GridError, Result};
use serde::{Deserialize, Serialize};

/// A named table: ordered column headers and ordered rows of cells.
///
/// Missing cells (short rows or `null` values) read as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    /// Grid name, used for the page title
    pub name: String,
    /// Column header texts
    pub columns: Vec<String>,
    /// Row cells in source order
    #[serde(default)]
    pub rows: Vec<Vec<Option<String>>>,
}

impl Grid {
    /// Create a grid with the given headers and no rows
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a fully populated row
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows
            .push(cells.into_iter().map(|c| Some(c.into())).collect());
    }

    /// Builder form of [`Grid::push_row`]
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text, or `""` when the cell is null or absent
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
            .unwrap_or("")
    }

    /// Title drawn above the grid on every page
    pub fn title(&self) -> String {
        format!("{} Data", self.name)
    }

    /// Check that the grid can be laid out
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(GridError::NoColumns(self.name.clone()));
        }
        Ok(())
    }
}
