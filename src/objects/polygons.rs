//! Polygons and polylines, e.g. fault lines

use super::{BoundingBox, ColumnValues, Table};
use eyre::Result;
use serde_json::{Value, json};
use std::path::Path;

/// Column names used when polygons are written as a table
pub const POLYGON_COLUMNS: [&str; 4] = ["X_UTME", "Y_UTMN", "Z_TVDSS", "POLY_ID"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub poly_id: i64,
}

/// A set of polygons as one point list, polygons told apart by `poly_id`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygons {
    pub name: Option<String>,
    pub points: Vec<PolygonPoint>,
}

impl Polygons {
    pub fn new(points: Vec<PolygonPoint>) -> Self {
        Self { name: None, points }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of distinct polygons
    pub fn npolys(&self) -> usize {
        let mut ids: Vec<i64> = self.points.iter().map(|p| p.poly_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Points split into consecutive runs sharing a `poly_id`
    pub fn polygons(&self) -> Vec<&[PolygonPoint]> {
        self.points
            .chunk_by(|a, b| a.poly_id == b.poly_id)
            .collect()
    }

    pub fn spec(&self) -> Value {
        json!({
            "npolys": self.npolys(),
            "npoints": self.points.len(),
            "columns": POLYGON_COLUMNS,
        })
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.points.iter().map(|p| (p.x, p.y)),
            self.points.iter().map(|p| p.z),
        )
    }

    /// Build polygons from a table with x, y, z and polygon id columns.
    ///
    /// Both `X_UTME, Y_UTMN, Z_TVDSS, POLY_ID` and `X, Y, Z, ID` headers are
    /// accepted, case insensitive.
    pub fn from_table(table: &Table) -> Result<Self> {
        let xs = numeric_column(table, ["X_UTME", "X"])?;
        let ys = numeric_column(table, ["Y_UTMN", "Y"])?;
        let zs = numeric_column(table, ["Z_TVDSS", "Z"])?;
        let ids = numeric_column(table, ["POLY_ID", "ID"])?;

        let points = (0..table.num_rows())
            .map(|i| {
                let id = ids[i];
                if !id.is_finite() || id.fract() != 0.0 {
                    eyre::bail!("Invalid POLY_ID {} in row {}", id, i + 1);
                }
                Ok(PolygonPoint {
                    x: xs[i],
                    y: ys[i],
                    z: zs[i],
                    poly_id: id as i64,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: table.name.clone(),
            points,
        })
    }

    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_table(&Table::read_csv(path)?)
    }
}

fn numeric_column<'a>(table: &'a Table, names: [&str; 2]) -> Result<&'a [f64]> {
    let column = names
        .iter()
        .find_map(|n| table.column(n))
        .ok_or_else(|| eyre::eyre!("Polygons table is missing a {} column", names[0]))?;
    match &column.values {
        ColumnValues::Numeric(values) => Ok(values),
        ColumnValues::Text(_) => eyre::bail!("Column {} is not numeric", column.name),
    }
}
