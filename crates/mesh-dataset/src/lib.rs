#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Mesh Dataset
//!
//! Indexed datasets of 3D meshes.
//!
//! The [Dataset] trait describes a sized collection that can be indexed from the front or, with
//! [Dataset::get_signed], from the back. [ShapeNetDataset](shapenet::ShapeNetDataset) reads the
//! ShapeNetCore corpora on top of it.

/// Dataset transformations.
pub mod transform;

/// ShapeNetCore reader.
pub mod shapenet;

mod dataset;
pub use dataset::*;

/// Mesh import types, re-exported for dataset users.
pub use mesh_io;

#[cfg(test)]
mod test_data {
    pub fn string_items() -> Vec<String> {
        vec![
            "1 Item".to_string(),
            "2 Items".to_string(),
            "3 Items".to_string(),
            "4 Items".to_string(),
        ]
    }
}
