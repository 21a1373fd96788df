//! In-memory workbook - ordered named sheets of ordered rows
//!
//! This is the value the report aggregator reads and writes. Column order
//! inside a row and sheet order inside a workbook are both preserved, so a
//! workbook survives a save/load cycle unchanged.

use miette::Diagnostic;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

/// An ordered mapping from column name to cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, Cell)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: Cell) -> Self {
        self.set(column, value);
        self
    }

    /// Set a column, replacing the value in place if it already exists
    pub fn set(&mut self, column: impl Into<String>, value: Cell) {
        let column = column.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// A separator row with no cells
    pub fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of column names to cell values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut row = Row::new();
                while let Some((name, value)) = access.next_entry::<String, Cell>()? {
                    row.set(name, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// A named, ordered sequence of rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,

    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Union of all column names, in first-seen order
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for row in &self.rows {
            for column in row.columns() {
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
        columns
    }
}

/// Errors raised when looking up sheets
#[derive(Debug, Error, Diagnostic)]
pub enum WorkbookError {
    #[error("No data available for {name} report")]
    #[diagnostic(
        code(spc::workbook::sheet_not_found),
        help("available sheets: {available}")
    )]
    SheetNotFound { name: String, available: String },
}

/// Ordered collection of named sheets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// An empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Rows of a sheet, or an empty slice if the sheet does not exist
    pub fn rows(&self, name: &str) -> &[Row] {
        self.sheet(name).map(|s| s.rows.as_slice()).unwrap_or(&[])
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Write a sheet, replacing an existing sheet of the same name in place
    /// or appending a new one at the end
    pub fn put_sheet(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        let name = name.into();
        match self.sheets.iter_mut().find(|s| s.name == name) {
            Some(sheet) => sheet.rows = rows,
            None => self.sheets.push(Sheet::new(name, rows)),
        }
    }

    /// Copy one sheet into a workbook of its own
    pub fn extract_sheet(&self, name: &str) -> Result<Workbook, WorkbookError> {
        let sheet = self
            .sheet(name)
            .ok_or_else(|| WorkbookError::SheetNotFound {
                name: name.to_string(),
                available: self.available_names(),
            })?;
        Ok(Workbook {
            sheets: vec![sheet.clone()],
        })
    }

    fn available_names(&self) -> String {
        if self.sheets.is_empty() {
            "(none)".to_string()
        } else {
            self.sheet_names().join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_preserves_insertion_order() {
        let row = Row::new()
            .with("zeta", Cell::Int(1))
            .with("alpha", Cell::Int(2))
            .with("mid", Cell::text("x"));
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_row_set_replaces_in_place() {
        let mut row = Row::new().with("a", Cell::Int(1)).with("b", Cell::Int(2));
        row.set("a", Cell::Int(9));
        assert_eq!(row.get("a"), Some(&Cell::Int(9)));
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_row_json_keeps_column_order() {
        let row = Row::new()
            .with("date", Cell::text("2026-10-16"))
            .with("year", Cell::Int(2026))
            .with("average", Cell::Number(12.5));
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"date":"2026-10-16","year":2026,"average":12.5}"#);

        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_blank_row_roundtrip() {
        let json = serde_json::to_string(&Row::new()).unwrap();
        assert_eq!(json, "{}");
        let back: Row = serde_json::from_str(&json).unwrap();
        assert!(back.is_blank());
    }

    #[test]
    fn test_put_sheet_replaces_and_appends() {
        let mut wb = Workbook::new();
        wb.put_sheet("Weekly", vec![Row::new()]);
        wb.put_sheet("Monthly", vec![]);
        wb.put_sheet("Weekly", vec![Row::new(), Row::new()]);

        assert_eq!(wb.sheet_names(), vec!["Weekly", "Monthly"]);
        assert_eq!(wb.rows("Weekly").len(), 2);
        assert!(wb.rows("Missing").is_empty());
    }

    #[test]
    fn test_extract_sheet() {
        let mut wb = Workbook::new();
        wb.put_sheet("Weekly", vec![Row::new().with("a", Cell::Int(1))]);
        wb.put_sheet("Yearly", vec![]);

        let single = wb.extract_sheet("Weekly").unwrap();
        assert_eq!(single.sheet_names(), vec!["Weekly"]);
        assert_eq!(single.rows("Weekly").len(), 1);
    }

    #[test]
    fn test_extract_unknown_sheet_fails() {
        let mut wb = Workbook::new();
        wb.put_sheet("Weekly", vec![]);

        let err = wb.extract_sheet("Daily").unwrap_err();
        assert_eq!(err.to_string(), "No data available for Daily report");
        match err {
            WorkbookError::SheetNotFound { available, .. } => assert_eq!(available, "Weekly"),
        }
    }

    #[test]
    fn test_sheet_columns_union_first_seen() {
        let sheet = Sheet::new(
            "Yearly",
            vec![
                Row::new().with("date", Cell::text("d")).with("average", Cell::Number(1.0)),
                Row::new(),
                Row::new().with("Metric", Cell::text("Average")).with("Value", Cell::Number(1.0)),
            ],
        );
        assert_eq!(sheet.columns(), vec!["date", "average", "Metric", "Value"]);
    }

    #[test]
    fn test_cell_untagged_deserialize() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[2026, 1.63, "W42"]"#).unwrap();
        assert_eq!(cells, vec![Cell::Int(2026), Cell::Number(1.63), Cell::text("W42")]);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Int(3).to_string(), "3");
        assert_eq!(Cell::Number(12.0).to_string(), "12");
        assert_eq!(Cell::Number(1.63).to_string(), "1.63");
        assert_eq!(Cell::text("P").to_string(), "P");
    }
}
