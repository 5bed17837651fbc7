//! In-memory workbook grid.
//!
//! A [`Workbook`] is an ordered collection of named [`Sheet`]s, each a
//! row-major grid of scalar [`CellValue`]s with 1-based [`CellRef`]
//! addressing. Grids may be ragged; reading past the end of a row or
//! below the last row yields [`CellValue::Empty`].
//!
//! The byte codec is JSON: sheets serialize in order, rows as plain
//! arrays, cells as `null` / string / number. Serialization is
//! deterministic, so writing the same workbook twice yields identical
//! bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar cell value as read from a template grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        CellValue::Number(value)
    }

    /// True for `Empty` and for text that is blank after trimming.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Trimmed text rendering, or `None` when the cell is empty.
    pub fn as_trimmed_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(value) => Some(value.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(value) => write!(f, "{value}"),
        }
    }
}

/// An absolute (row, column) coordinate, 1-based on both axes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(r{}, c{})", self.row, self.col)
    }
}

/// A named sheet: a ragged, row-major grid of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

const EMPTY_CELL: CellValue = CellValue::Empty;

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Widest row in the grid. Ragged rows do not shrink the sheet: a
    /// coordinate inside the widest row is still inside the sheet.
    pub fn width(&self) -> u32 {
        self.rows.iter().map(|row| row.len() as u32).max().unwrap_or(0)
    }

    /// True when `cell` lies inside the sheet's row count and width.
    pub fn contains(&self, cell: CellRef) -> bool {
        cell.row >= 1 && cell.col >= 1 && cell.row <= self.row_count() && cell.col <= self.width()
    }

    /// Cell value at `cell`; out-of-range reads yield `Empty`.
    pub fn value(&self, cell: CellRef) -> &CellValue {
        if cell.row == 0 || cell.col == 0 {
            return &EMPTY_CELL;
        }
        self.rows
            .get(cell.row as usize - 1)
            .and_then(|row| row.get(cell.col as usize - 1))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Writes `value` at `cell`, padding a short row up to the target
    /// column. The caller is responsible for checking [`Sheet::contains`]
    /// first; writing outside the grid grows it.
    pub fn set_value(&mut self, cell: CellRef, value: CellValue) {
        if cell.row == 0 || cell.col == 0 {
            return;
        }
        let row_idx = cell.row as usize - 1;
        if self.rows.len() <= row_idx {
            self.rows.resize_with(row_idx + 1, Vec::new);
        }
        let row = &mut self.rows[row_idx];
        let col_idx = cell.col as usize - 1;
        if row.len() <= col_idx {
            row.resize(col_idx + 1, CellValue::Empty);
        }
        row[col_idx] = value;
    }

    pub fn push_row(&mut self, cells: Vec<CellValue>) {
        self.rows.push(cells);
    }
}

/// An ordered collection of named sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str())
    }

    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Opens a serialized workbook. This is the only fallible step of
    /// ingestion; callers surface failures as an unreadable template.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}
