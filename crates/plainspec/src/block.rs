//! Tabular blocks attached to steps: key/value forms and header/row grids.

use derive_more::{Deref, From, IntoIterator};

/// Polymorphic tabular payload following a step line.
///
/// Blocks are owned by their step; argument binding hands handlers a clone,
/// never a shared reference.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Block {
    /// Ordered name/value pairs in a vertical layout.
    Form(Form),
    /// A header row of column names plus data rows of the same width.
    Grid(Grid),
}

/// An ordered sequence of name/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, IntoIterator)]
pub struct Form {
    #[into_iterator(owned, ref)]
    entries: Vec<(String, String)>,
}

impl Form {
    /// Create a form from ordered name/value pairs.
    #[must_use]
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Look up a value by its name, comparing case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use plainspec::block::Form;
    ///
    /// let form = Form::new(vec![("Name".into(), "Ada".into())]);
    /// assert_eq!(form.value("name"), Some("Ada"));
    /// ```
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A header row of column names plus data rows sharing that width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Create a grid. Callers guarantee every row matches the header width;
    /// the parser enforces this before construction.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// The column names from the header row.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The data rows in document order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Look up a cell by row index and column name.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self
            .columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }
}

/// Split a pipe-delimited row into trimmed cells.
///
/// A row starts and ends with `|`; anything else is not part of a block.
/// Returns `None` for non-row lines.
#[must_use]
pub(crate) fn cells(line: &str) -> Option<Vec<String>> {
    let inner = line.trim().strip_prefix('|')?.strip_suffix('|')?;
    Some(inner.split('|').map(|cell| cell.trim().to_string()).collect())
}
