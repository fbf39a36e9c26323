//! Tabular data

use eyre::{Context, Result};
use serde_json::{Value, json};
use std::path::Path;

/// Values of one table column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell rendered as text, empty for missing numbers
    pub fn cell(&self, row: usize) -> String {
        match self {
            Self::Numeric(v) => v
                .get(row)
                .filter(|x| x.is_finite())
                .map(|x| x.to_string())
                .unwrap_or_default(),
            Self::Text(v) => v.get(row).cloned().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Text(values),
        }
    }
}

/// A table of equally long, named columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub name: Option<String>,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let nrows = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != nrows) {
                eyre::bail!(
                    "Column {} has {} rows, expected {}",
                    bad.name,
                    bad.values.len(),
                    nrows
                );
            }
        }
        Ok(Self {
            name: None,
            columns,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn spec(&self) -> Value {
        json!({
            "columns": self.column_names(),
            "size": self.columns.len() * self.num_rows(),
        })
    }

    /// Read a comma separated file with a header row.
    ///
    /// A column is numeric when every non-empty cell parses as a number,
    /// empty cells in numeric columns become NaN. Fields may be quoted.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

        let mut table = Self::parse_csv(&content)
            .with_context(|| format!("Failed to parse CSV file: {}", path.display()))?;

        table.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());
        Ok(table)
    }

    pub fn parse_csv(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let names: Vec<String> = reader
            .headers()
            .with_context(|| "Failed to read CSV header")?
            .iter()
            .map(|s| s.to_string())
            .collect();
        if names.is_empty() {
            eyre::bail!("CSV content has no header row");
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        for (idx, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV row {}", idx + 1))?;
            if record.len() != names.len() {
                eyre::bail!(
                    "Row {} has {} fields, header has {}",
                    idx + 1,
                    record.len(),
                    names.len()
                );
            }
            for (column, cell) in cells.iter_mut().zip(record.iter()) {
                column.push(cell.to_string());
            }
        }

        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| {
                let numeric: Option<Vec<f64>> = raw
                    .iter()
                    .map(|cell| match cell.is_empty() {
                        true => Some(f64::NAN),
                        false => cell.parse::<f64>().ok(),
                    })
                    .collect();
                match numeric {
                    Some(values) => Column::numeric(name, values),
                    None => Column::text(name, raw),
                }
            })
            .collect();

        Self::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOLUMES: &str = "ZONE,REGION,BULK_OIL,PORV_OIL
Valysar,WestLowland,1.5e9,3.1e8
Therys,CentralSouth,,2.2e8
";

    #[test]
    fn test_parse_csv_column_types() {
        let table = Table::parse_csv(VOLUMES).unwrap();

        assert_eq!(table.column_names(), vec!["ZONE", "REGION", "BULK_OIL", "PORV_OIL"]);
        assert_eq!(table.num_rows(), 2);
        assert!(matches!(table.columns[0].values, ColumnValues::Text(_)));

        let ColumnValues::Numeric(bulk) = &table.column("bulk_oil").unwrap().values else {
            panic!("BULK_OIL should be numeric");
        };
        assert_eq!(bulk[0], 1.5e9);
        assert!(bulk[1].is_nan());
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = Table::parse_csv("A,B\n1,2\n3\n").unwrap_err();
        assert!(err.to_string().contains("Row 2 has 1 fields"));
    }

    #[test]
    fn test_unequal_columns_are_rejected() {
        let result = Table::new(vec![
            Column::numeric("A", vec![1.0, 2.0]),
            Column::numeric("B", vec![1.0]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_spec() {
        let table = Table::parse_csv(VOLUMES).unwrap();
        let spec = table.spec();
        assert_eq!(spec["columns"][2], "BULK_OIL");
        assert_eq!(spec["size"], 8);
    }

    #[test]
    fn test_cell_rendering() {
        let table = Table::parse_csv(VOLUMES).unwrap();
        let bulk = &table.column("BULK_OIL").unwrap().values;
        assert_eq!(bulk.cell(0), "1500000000");
        assert_eq!(bulk.cell(1), "");
    }
}
