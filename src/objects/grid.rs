//! Corner-point grids and their properties

use super::BoundingBox;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Named range of layers within a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgrid {
    pub name: String,
    pub nlay: usize,
}

/// Corner-point grid geometry
///
/// Only what the exporter needs is kept: dimensions, the corner points
/// (for the bounding box) and the subgrid layering.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub name: Option<String>,
    pub ncol: usize,
    pub nrow: usize,
    pub nlay: usize,
    pub corners: Vec<[f64; 3]>,
    pub subgrids: Vec<Subgrid>,
}

impl Grid {
    pub fn new(ncol: usize, nrow: usize, nlay: usize) -> Self {
        Self {
            name: None,
            ncol,
            nrow,
            nlay,
            corners: Vec::new(),
            subgrids: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_corners(mut self, corners: Vec<[f64; 3]>) -> Self {
        self.corners = corners;
        self
    }

    pub fn with_subgrids(mut self, subgrids: Vec<Subgrid>) -> Self {
        self.subgrids = subgrids;
        self
    }

    pub fn spec(&self) -> Value {
        let subgrids = (!self.subgrids.is_empty()).then(|| {
            self.subgrids
                .iter()
                .map(|s| (s.name.clone(), json!(s.nlay)))
                .collect::<serde_json::Map<_, _>>()
        });
        json!({
            "ncol": self.ncol,
            "nrow": self.nrow,
            "nlay": self.nlay,
            "subgrids": subgrids,
        })
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.corners.iter().map(|c| (c[0], c[1])),
            self.corners.iter().map(|c| c[2]),
        )
    }
}

/// Cell values on a grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridProperty {
    pub name: Option<String>,
    /// Name of the grid the property belongs to
    pub parent: Option<String>,
    pub ncol: usize,
    pub nrow: usize,
    pub nlay: usize,
    pub values: Vec<f64>,
    pub discrete: bool,
    /// Code names of a discrete property
    pub codes: BTreeMap<i64, String>,
}

impl GridProperty {
    pub fn new(ncol: usize, nrow: usize, nlay: usize, value: f64) -> Self {
        Self {
            name: None,
            parent: None,
            ncol,
            nrow,
            nlay,
            values: vec![value; ncol * nrow * nlay],
            discrete: false,
            codes: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_codes(mut self, codes: BTreeMap<i64, String>) -> Self {
        self.discrete = true;
        self.codes = codes;
        self
    }

    pub fn spec(&self) -> Value {
        let codes = self.discrete.then(|| {
            self.codes
                .iter()
                .map(|(code, name)| (code.to_string(), json!(name)))
                .collect::<serde_json::Map<_, _>>()
        });
        json!({
            "ncol": self.ncol,
            "nrow": self.nrow,
            "nlay": self.nlay,
            "discrete": self.discrete,
            "codes": codes,
        })
    }
}
