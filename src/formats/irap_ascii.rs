//! Irap ASCII writer for surfaces and polygons

use super::FormatWriter;
use crate::objects::{DataClass, GeoObject, Polygons, RegularSurface};
use eyre::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Undefined node value in Irap ASCII surfaces
const IRAP_UNDEF: f64 = 9999900.0;
/// Coordinate triplet terminating each polygon
const POLYGON_END: &str = "999.000000 999.000000 999.000000";
const VALUES_PER_LINE: usize = 6;

/// Writes surfaces as Irap ASCII grids and polygons as Irap ASCII point lists
#[derive(Debug, Default, Clone, Copy)]
pub struct IrapAsciiWriter;

impl FormatWriter for IrapAsciiWriter {
    fn format(&self) -> &str {
        "irap_ascii"
    }

    fn supports(&self, class: DataClass) -> bool {
        matches!(class, DataClass::Surface | DataClass::Polygons)
    }

    fn write(&self, object: &GeoObject, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);

        match object {
            GeoObject::Surface(surface) => write_surface(surface, &mut out),
            GeoObject::Polygons(polygons) => write_polygons(polygons, &mut out),
            other => eyre::bail!("Irap ASCII cannot hold a {}", other.class()),
        }
        .with_context(|| format!("Failed to write Irap ASCII file: {}", path.display()))?;

        out.flush()?;
        Ok(())
    }
}

fn write_surface(surface: &RegularSurface, out: &mut impl Write) -> Result<()> {
    let xmax = surface.xori + surface.ncol.saturating_sub(1) as f64 * surface.xinc;
    let ymax = surface.yori + surface.nrow.saturating_sub(1) as f64 * surface.yinc;

    writeln!(out, "-996 {} {:.6} {:.6}", surface.nrow, surface.xinc, surface.yinc)?;
    writeln!(
        out,
        "{:.6} {:.6} {:.6} {:.6}",
        surface.xori, xmax, surface.yori, ymax
    )?;
    writeln!(
        out,
        "{} {:.6} {:.6} {:.6}",
        surface.ncol, surface.rotation, surface.xori, surface.yori
    )?;
    writeln!(out, "0 0 0 0 0 0 0")?;

    for line in surface.values.chunks(VALUES_PER_LINE) {
        let cells: Vec<String> = line
            .iter()
            .map(|v| match v.is_finite() {
                true => format!("{:.4}", v),
                false => format!("{:.4}", IRAP_UNDEF),
            })
            .collect();
        writeln!(out, "{}", cells.join(" "))?;
    }
    Ok(())
}

fn write_polygons(polygons: &Polygons, out: &mut impl Write) -> Result<()> {
    for polygon in polygons.polygons() {
        for point in polygon {
            writeln!(out, "{:.6} {:.6} {:.6}", point.x, point.y, point.z)?;
        }
        writeln!(out, "{}", POLYGON_END)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{PolygonPoint, Table};
    use tempfile::TempDir;

    #[test]
    fn test_write_surface() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("top.irap");
        let surface = RegularSurface::from_values(
            2,
            4,
            25.0,
            50.0,
            vec![1.0, 2.0, 3.0, f64::NAN, 5.0, 6.0, 7.0, 8.0],
        )
        .unwrap();

        IrapAsciiWriter.write(&surface.into(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "-996 4 25.000000 50.000000");
        assert_eq!(lines[1], "0.000000 25.000000 0.000000 150.000000");
        assert_eq!(lines[2], "2 0.000000 0.000000 0.000000");
        assert_eq!(lines[3], "0 0 0 0 0 0 0");
        assert_eq!(
            lines[4],
            "1.0000 2.0000 3.0000 9999900.0000 5.0000 6.0000"
        );
        assert_eq!(lines[5], "7.0000 8.0000");
    }

    #[test]
    fn test_write_polygons() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("faults.pol");
        let polygons = Polygons::new(vec![
            PolygonPoint { x: 1.0, y: 2.0, z: 3.0, poly_id: 0 },
            PolygonPoint { x: 4.0, y: 5.0, z: 6.0, poly_id: 1 },
        ]);

        IrapAsciiWriter.write(&polygons.into(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "1.000000 2.000000 3.000000\n999.000000 999.000000 999.000000\n\
             4.000000 5.000000 6.000000\n999.000000 999.000000 999.000000\n"
        );
    }

    #[test]
    fn test_rejects_tables() {
        let temp = TempDir::new().unwrap();
        let result = IrapAsciiWriter.write(&Table::default().into(), &temp.path().join("x"));
        assert!(result.is_err());
    }
}
