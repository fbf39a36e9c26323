//! In-memory geo-objects understood by the exporter
//!
//! These are plain data holders. Reading and writing the binary formats they
//! usually live in is left to [`FormatWriter`](crate::formats::FormatWriter)
//! implementations supplied by the caller.

mod cube;
mod grid;
mod polygons;
mod surface;
mod table;

pub use cube::Cube;
pub use grid::{Grid, GridProperty, Subgrid};
pub use polygons::{POLYGON_COLUMNS, PolygonPoint, Polygons};
pub use surface::RegularSurface;
pub use table::{Column, ColumnValues, Table};

use crate::naming::ObjectLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Metadata class of an exported object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataClass {
    Surface,
    Cube,
    #[serde(rename = "cpgrid")]
    Grid,
    #[serde(rename = "cpgrid_property")]
    GridProperty,
    Polygons,
    Table,
}

impl DataClass {
    /// Name used for the `class` field in metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Cube => "cube",
            Self::Grid => "cpgrid",
            Self::GridProperty => "cpgrid_property",
            Self::Polygons => "polygons",
            Self::Table => "table",
        }
    }

    /// Destination category for file naming
    pub fn location(&self) -> ObjectLocation {
        match self {
            Self::Surface => ObjectLocation::Surface,
            Self::Cube => ObjectLocation::Cube,
            Self::Grid | Self::GridProperty => ObjectLocation::Grid,
            Self::Polygons => ObjectLocation::Polygons,
            Self::Table => ObjectLocation::Table,
        }
    }
}

impl fmt::Display for DataClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Axis aligned bounding box of an object
///
/// `zmin`/`zmax` are absent when the object carries no defined z values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: Option<f64>,
    pub zmax: Option<f64>,
}

impl BoundingBox {
    /// Lateral extent of `points` and z extent of the finite values in `zvalues`.
    ///
    /// Returns `None` when there are no points.
    pub fn from_points(
        points: impl IntoIterator<Item = (f64, f64)>,
        zvalues: impl IntoIterator<Item = f64>,
    ) -> Option<Self> {
        let mut extent: Option<(f64, f64, f64, f64)> = None;
        for (x, y) in points {
            extent = Some(match extent {
                None => (x, x, y, y),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            });
        }
        let (xmin, xmax, ymin, ymax) = extent?;

        let (zmin, zmax) = min_max(zvalues).unzip();

        Some(Self {
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
        })
    }
}

fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None::<(f64, f64)>, |acc, v| {
            Some(match acc {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            })
        })
}

/// Node coordinates of the four corners of a rotated regular lattice.
///
/// `rotation` is in degrees, counter-clockwise from the x axis. A `yflip` of -1
/// mirrors the lattice's y axis.
pub(crate) fn lattice_corners(
    origin: (f64, f64),
    increments: (f64, f64),
    size: (usize, usize),
    rotation: f64,
    yflip: i8,
) -> [(f64, f64); 4] {
    let (xori, yori) = origin;
    let (xinc, yinc) = increments;
    let (ncol, nrow) = size;
    let (sin, cos) = rotation.to_radians().sin_cos();
    let yinc = yinc * f64::from(yflip);

    let node = |i: usize, j: usize| {
        let dx = i as f64 * xinc;
        let dy = j as f64 * yinc;
        (xori + dx * cos - dy * sin, yori + dx * sin + dy * cos)
    };

    let (imax, jmax) = (ncol.saturating_sub(1), nrow.saturating_sub(1));
    [node(0, 0), node(imax, 0), node(0, jmax), node(imax, jmax)]
}

/// Any object the exporter can write
#[derive(Debug, Clone, PartialEq)]
pub enum GeoObject {
    Surface(RegularSurface),
    Cube(Cube),
    Grid(Grid),
    GridProperty(GridProperty),
    Polygons(Polygons),
    Table(Table),
}

impl GeoObject {
    pub fn class(&self) -> DataClass {
        match self {
            Self::Surface(_) => DataClass::Surface,
            Self::Cube(_) => DataClass::Cube,
            Self::Grid(_) => DataClass::Grid,
            Self::GridProperty(_) => DataClass::GridProperty,
            Self::Polygons(_) => DataClass::Polygons,
            Self::Table(_) => DataClass::Table,
        }
    }

    /// Name carried by the object itself, used when the export names none
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Surface(o) => o.name.as_deref(),
            Self::Cube(o) => o.name.as_deref(),
            Self::Grid(o) => o.name.as_deref(),
            Self::GridProperty(o) => o.name.as_deref(),
            Self::Polygons(o) => o.name.as_deref(),
            Self::Table(o) => o.name.as_deref(),
        }
    }

    /// Value of `data.layout` in metadata
    pub fn layout(&self) -> &'static str {
        match self {
            Self::Surface(_) | Self::Cube(_) => "regular",
            Self::Grid(_) | Self::GridProperty(_) => "cornerpoint",
            Self::Polygons(_) => "unset",
            Self::Table(_) => "table",
        }
    }

    /// Class specific geometry description for `data.spec`
    pub fn spec(&self) -> Value {
        match self {
            Self::Surface(o) => o.spec(),
            Self::Cube(o) => o.spec(),
            Self::Grid(o) => o.spec(),
            Self::GridProperty(o) => o.spec(),
            Self::Polygons(o) => o.spec(),
            Self::Table(o) => o.spec(),
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        match self {
            Self::Surface(o) => o.bbox(),
            Self::Cube(o) => Some(o.bbox()),
            Self::Grid(o) => o.bbox(),
            Self::GridProperty(_) | Self::Table(_) => None,
            Self::Polygons(o) => o.bbox(),
        }
    }

    /// Value marking undefined cells, where the class has one
    pub fn undef(&self) -> Option<f64> {
        match self {
            Self::Surface(o) => Some(o.undef),
            _ => None,
        }
    }

    /// Parent grid name of a grid property, used as the filename prefix
    pub fn parent(&self) -> Option<&str> {
        match self {
            Self::GridProperty(o) => o.parent.as_deref(),
            _ => None,
        }
    }
}

impl From<RegularSurface> for GeoObject {
    fn from(value: RegularSurface) -> Self {
        Self::Surface(value)
    }
}

impl From<Cube> for GeoObject {
    fn from(value: Cube) -> Self {
        Self::Cube(value)
    }
}

impl From<Grid> for GeoObject {
    fn from(value: Grid) -> Self {
        Self::Grid(value)
    }
}

impl From<GridProperty> for GeoObject {
    fn from(value: GridProperty) -> Self {
        Self::GridProperty(value)
    }
}

impl From<Polygons> for GeoObject {
    fn from(value: Polygons) -> Self {
        Self::Polygons(value)
    }
}

impl From<Table> for GeoObject {
    fn from(value: Table) -> Self {
        Self::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_from_points() {
        let bbox =
            BoundingBox::from_points(vec![(1.0, 5.0), (-2.0, 3.0)], vec![10.0, f64::NAN, 4.0])
                .unwrap();

        assert_eq!(bbox.xmin, -2.0);
        assert_eq!(bbox.xmax, 1.0);
        assert_eq!(bbox.ymin, 3.0);
        assert_eq!(bbox.ymax, 5.0);
        assert_eq!(bbox.zmin, Some(4.0));
        assert_eq!(bbox.zmax, Some(10.0));
    }

    #[test]
    fn test_bbox_without_points() {
        assert!(BoundingBox::from_points(Vec::new(), vec![1.0]).is_none());
    }

    #[test]
    fn test_bbox_without_z() {
        let bbox = BoundingBox::from_points(vec![(0.0, 0.0)], Vec::new()).unwrap();
        assert_eq!(bbox.zmin, None);
        assert_eq!(bbox.zmax, None);
    }

    #[test]
    fn test_lattice_corners_rotated() {
        let corners = lattice_corners((0.0, 0.0), (10.0, 10.0), (2, 2), 90.0, 1);
        let (x, y) = corners[1];
        assert!(x.abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);
        let (x, y) = corners[2];
        assert!((x + 10.0).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn test_class_names_and_locations() {
        assert_eq!(DataClass::Grid.as_str(), "cpgrid");
        assert_eq!(DataClass::GridProperty.location(), ObjectLocation::Grid);
        assert_eq!(DataClass::Surface.location().folder(), "maps");
        assert_eq!(
            serde_json::to_value(DataClass::GridProperty).unwrap(),
            "cpgrid_property"
        );
    }
}
