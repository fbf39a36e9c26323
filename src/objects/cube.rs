//! Regular 3D cubes, most often seismic

use super::{BoundingBox, lattice_corners};
use serde_json::{Value, json};

/// A regular, possibly rotated, 3D lattice
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    pub name: Option<String>,
    pub ncol: usize,
    pub nrow: usize,
    pub nlay: usize,
    pub xori: f64,
    pub yori: f64,
    pub zori: f64,
    pub xinc: f64,
    pub yinc: f64,
    pub zinc: f64,
    pub yflip: i8,
    pub rotation: f64,
    /// Trace values, `ncol * nrow * nlay` long, or empty when only the geometry is known
    pub values: Vec<f64>,
}

impl Cube {
    /// Create a cube on the default template: origin at zero, 25 m lateral
    /// and 2 m vertical increments, no rotation.
    pub fn new(ncol: usize, nrow: usize, nlay: usize) -> Self {
        Self {
            name: None,
            ncol,
            nrow,
            nlay,
            xori: 0.0,
            yori: 0.0,
            zori: 0.0,
            xinc: 25.0,
            yinc: 25.0,
            zinc: 2.0,
            yflip: 1,
            rotation: 0.0,
            values: Vec::new(),
        }
    }

    /// Fill every trace sample with a constant
    pub fn with_constant(mut self, value: f64) -> Self {
        self.values = vec![value; self.ncol * self.nrow * self.nlay];
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn spec(&self) -> Value {
        json!({
            "ncol": self.ncol,
            "nrow": self.nrow,
            "nlay": self.nlay,
            "xori": self.xori,
            "yori": self.yori,
            "zori": self.zori,
            "xinc": self.xinc,
            "yinc": self.yinc,
            "zinc": self.zinc,
            "yflip": self.yflip,
            "rotation": self.rotation,
        })
    }

    pub fn bbox(&self) -> BoundingBox {
        let corners = lattice_corners(
            (self.xori, self.yori),
            (self.xinc, self.yinc),
            (self.ncol, self.nrow),
            self.rotation,
            self.yflip,
        );
        let zmax = self.zori + self.nlay.saturating_sub(1) as f64 * self.zinc;
        let mut bbox = BoundingBox::from_points(corners, [self.zori, zmax])
            .unwrap_or(BoundingBox {
                xmin: self.xori,
                xmax: self.xori,
                ymin: self.yori,
                ymax: self.yori,
                zmin: None,
                zmax: None,
            });
        bbox.zmin = Some(self.zori.min(zmax));
        bbox.zmax = Some(self.zori.max(zmax));
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_bbox() {
        let cube = Cube::new(23, 12, 5);
        let bbox = cube.bbox();

        assert_eq!(bbox.xmin, 0.0);
        assert_eq!(bbox.xmax, 550.0);
        assert_eq!(bbox.ymin, 0.0);
        assert_eq!(bbox.ymax, 275.0);
        assert_eq!(bbox.zmin, Some(0.0));
        assert_eq!(bbox.zmax, Some(8.0));
    }

    #[test]
    fn test_constant_fill() {
        let cube = Cube::new(2, 3, 4).with_constant(0.1);
        assert_eq!(cube.values.len(), 24);
        assert_eq!(cube.values[23], 0.1);
    }

    #[test]
    fn test_spec() {
        let spec = Cube::new(5, 8, 3).spec();
        assert_eq!(spec["nlay"], 3);
        assert_eq!(spec["zinc"], 2.0);
    }
}
