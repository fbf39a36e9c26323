//! Comma separated writer for tables and polygons
//!
//! Fields holding commas, quotes or line breaks are quoted.

use super::FormatWriter;
use crate::objects::{DataClass, GeoObject, POLYGON_COLUMNS, Polygons, Table};
use eyre::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvWriter;

impl FormatWriter for CsvWriter {
    fn format(&self) -> &str {
        "csv"
    }

    fn supports(&self, class: DataClass) -> bool {
        matches!(class, DataClass::Table | DataClass::Polygons)
    }

    fn write(&self, object: &GeoObject, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);

        match object {
            GeoObject::Table(table) => write_table(table, &mut out),
            GeoObject::Polygons(polygons) => write_polygons(polygons, &mut out),
            other => eyre::bail!("CSV cannot hold a {}", other.class()),
        }
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

        out.flush()?;
        Ok(())
    }
}

fn write_table(table: &Table, out: &mut impl Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(table.column_names())?;
    for row in 0..table.num_rows() {
        writer.write_record(table.columns.iter().map(|c| c.values.cell(row)))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_polygons(polygons: &Polygons, out: &mut impl Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(POLYGON_COLUMNS)?;
    for point in &polygons.points {
        writer.write_record([
            point.x.to_string(),
            point.y.to_string(),
            point.z.to_string(),
            point.poly_id.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
