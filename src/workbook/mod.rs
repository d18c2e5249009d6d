use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Float(f64),
    Text(String),
    Bool(bool),
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::Float(value) => CellValue::Float(*value),
            Data::Int(value) => CellValue::Float(*value as f64),
            Data::String(value) => CellValue::Text(value.clone()),
            Data::Bool(value) => CellValue::Bool(*value),
            Data::DateTime(value) => CellValue::Float(value.as_f64()),
            Data::DateTimeIso(value) | Data::DurationIso(value) => CellValue::Text(value.clone()),
        }
    }
}

/// One named tab: a header row plus typed data rows.
///
/// Column names are normalized to lowercase and trimmed, so `Latitude ` in the
/// spreadsheet matches a `latitude` lookup.
#[derive(Debug, Clone)]
pub struct Sheet {
    columns: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn from_rows<S: AsRef<str>>(headers: &[S], rows: Vec<Vec<CellValue>>) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_ref().trim().to_lowercase(), idx))
            .collect();
        Self { columns, rows }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().enumerate().map(|(idx, cells)| Row {
            sheet: self,
            cells,
            // Spreadsheet row number as the user sees it (header is row 1)
            number: idx + 2,
        })
    }
}

/// Borrowed view over one data row with by-name cell access.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    sheet: &'a Sheet,
    cells: &'a [CellValue],
    number: usize,
}

impl Row<'_> {
    pub fn number(&self) -> usize {
        self.number
    }

    fn cell(&self, column: &str) -> Option<&CellValue> {
        let idx = *self.sheet.columns.get(column)?;
        self.cells.get(idx)
    }

    /// Numeric cell value; numeric text is accepted too.
    pub fn get_f64(&self, column: &str) -> Option<f64> {
        match self.cell(column)? {
            CellValue::Float(value) => Some(*value),
            CellValue::Text(value) => value.trim().parse().ok(),
            CellValue::Empty | CellValue::Bool(_) => None,
        }
    }

    /// Cell value as display text; blank text counts as absent.
    pub fn get_text(&self, column: &str) -> Option<String> {
        match self.cell(column)? {
            CellValue::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Float(value) => Some(format!("{value}")),
            CellValue::Bool(value) => Some(value.to_string()),
            CellValue::Empty => None,
        }
    }
}

/// All tabs of one spreadsheet, loaded up front.
#[derive(Debug, Default)]
pub struct Workbook {
    sheets: HashMap<String, Sheet>,
}

impl Workbook {
    pub fn load(path: &Path) -> Result<Self> {
        let mut xlsx: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("Failed to open spreadsheet {:?}", path))?;

        let names = xlsx.sheet_names();
        let mut sheets = HashMap::with_capacity(names.len());
        for name in names {
            let range = xlsx
                .worksheet_range(&name)
                .with_context(|| format!("Failed to read sheet {name:?}"))?;

            let mut rows = range.rows();
            let headers: Vec<String> = match rows.next() {
                Some(header_row) => header_row.iter().map(|cell| cell.to_string()).collect(),
                None => Vec::new(),
            };
            let data = rows
                .map(|cells| cells.iter().map(CellValue::from).collect())
                .collect();

            sheets.insert(name.trim().to_lowercase(), Sheet::from_rows(&headers, data));
        }

        Ok(Self { sheets })
    }

    #[cfg(test)]
    pub fn from_sheets<S: Into<String>>(sheets: Vec<(S, Sheet)>) -> Self {
        Self {
            sheets: sheets
                .into_iter()
                .map(|(name, sheet)| (name.into(), sheet))
                .collect(),
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sheets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
