#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Mesh IO
//!
//! Importer for Wavefront OBJ meshes and their MTL material libraries.
//!
//! Meshes are returned as [ObjMesh] records holding dense arrays: vertex positions, triangle
//! indices and, on request, UV coordinates, per-face UV indices, materials, a materials-order
//! table and normals.

mod error;
mod mesh;
mod mtl;
mod obj;

pub use error::*;
pub use mesh::*;
pub use mtl::*;
pub use obj::*;
