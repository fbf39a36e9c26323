//! Regular 2D surfaces (maps)

use super::{BoundingBox, lattice_corners};
use eyre::Result;
use serde_json::{Value, json};

/// Undefined value marker written to metadata and files
pub const UNDEF: f64 = 1.0e33;

/// A regular, possibly rotated, 2D lattice of z values
///
/// `values` holds `ncol * nrow` nodes, row by row with the column index
/// running fastest. Undefined nodes are NaN in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularSurface {
    pub name: Option<String>,
    pub ncol: usize,
    pub nrow: usize,
    pub xori: f64,
    pub yori: f64,
    pub xinc: f64,
    pub yinc: f64,
    pub yflip: i8,
    pub rotation: f64,
    pub values: Vec<f64>,
    pub undef: f64,
}

impl RegularSurface {
    /// Create a surface with every node set to `value`
    pub fn new(ncol: usize, nrow: usize, xinc: f64, yinc: f64, value: f64) -> Self {
        Self {
            name: None,
            ncol,
            nrow,
            xori: 0.0,
            yori: 0.0,
            xinc,
            yinc,
            yflip: 1,
            rotation: 0.0,
            values: vec![value; ncol * nrow],
            undef: UNDEF,
        }
    }

    /// Create a surface from explicit node values
    pub fn from_values(ncol: usize, nrow: usize, xinc: f64, yinc: f64, values: Vec<f64>) -> Result<Self> {
        if values.len() != ncol * nrow {
            eyre::bail!(
                "Surface of {}x{} nodes needs {} values, got {}",
                ncol,
                nrow,
                ncol * nrow,
                values.len()
            );
        }
        Ok(Self {
            values,
            ..Self::new(ncol, nrow, xinc, yinc, 0.0)
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_origin(mut self, xori: f64, yori: f64) -> Self {
        self.xori = xori;
        self.yori = yori;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Value at node (`col`, `row`), `None` when outside or undefined
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.ncol || row >= self.nrow {
            return None;
        }
        let value = self.values[row * self.ncol + col];
        value.is_finite().then_some(value)
    }

    pub fn spec(&self) -> Value {
        json!({
            "ncol": self.ncol,
            "nrow": self.nrow,
            "xori": self.xori,
            "yori": self.yori,
            "xinc": self.xinc,
            "yinc": self.yinc,
            "yflip": self.yflip,
            "rotation": self.rotation,
            "undef": self.undef,
        })
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        if self.ncol == 0 || self.nrow == 0 {
            return None;
        }
        let corners = lattice_corners(
            (self.xori, self.yori),
            (self.xinc, self.yinc),
            (self.ncol, self.nrow),
            self.rotation,
            self.yflip,
        );
        BoundingBox::from_points(corners, self.values.iter().copied())
    }
}
