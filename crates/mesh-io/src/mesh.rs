use ndarray::{Array2, Array3};

/// Material definition read from an MTL library.
///
/// Two materials are equal when they define the same set of properties and each property is
/// exactly equal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    /// Material name (`newmtl`).
    pub name: String,

    /// Ambient color (`Ka`).
    pub ambient: Option<[f32; 3]>,

    /// Diffuse color (`Kd`).
    pub diffuse: Option<[f32; 3]>,

    /// Specular color (`Ks`).
    pub specular: Option<[f32; 3]>,

    /// Specular exponent (`Ns`).
    pub shininess: Option<f32>,

    /// Ambient texture (`map_Ka`) as a `[height, width, 3]` RGB array.
    pub ambient_texture: Option<Array3<u8>>,

    /// Diffuse texture (`map_Kd`) as a `[height, width, 3]` RGB array.
    pub diffuse_texture: Option<Array3<u8>>,

    /// Specular texture (`map_Ks`) as a `[height, width, 3]` RGB array.
    pub specular_texture: Option<Array3<u8>>,
}

impl Material {
    /// Create a material with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Names of the properties defined by the material, `name` included.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = vec!["name"];
        let optional = [
            ("Ka", self.ambient.is_some()),
            ("Kd", self.diffuse.is_some()),
            ("Ks", self.specular.is_some()),
            ("Ns", self.shininess.is_some()),
            ("map_Ka", self.ambient_texture.is_some()),
            ("map_Kd", self.diffuse_texture.is_some()),
            ("map_Ks", self.specular_texture.is_some()),
        ];
        keys.extend(
            optional
                .into_iter()
                .filter(|(_, present)| *present)
                .map(|(key, _)| key),
        );
        keys
    }
}

/// Mesh imported from an OBJ file.
///
/// Indices are zero-based. Material related fields are `None` unless materials were requested,
/// normal related fields are `None` unless normals were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjMesh {
    /// Vertex positions, shape `[V, 3]`.
    pub vertices: Array2<f32>,

    /// Vertex indices of each face, shape `[F, K]` (`K = 3` once triangulated).
    pub faces: Array2<i64>,

    /// Texture coordinates, shape `[U, 2]`.
    pub uvs: Option<Array2<f32>>,

    /// UV indices of each face, same shape as `faces`. `-1` marks a corner without UV.
    pub face_uvs_idx: Option<Array2<i64>>,

    /// Materials in order of first use.
    pub materials: Option<Vec<Material>>,

    /// Material assignments, shape `[M, 2]`. Each row is `(first face index, material index)`
    /// and holds until the next row.
    pub materials_order: Option<Array2<i64>>,

    /// Vertex normals, shape `[N, 3]`.
    pub normals: Option<Array2<f32>>,

    /// Normal indices of each face, same shape as `faces`. `-1` marks a corner without normal.
    pub face_normals_idx: Option<Array2<i64>>,
}

impl ObjMesh {
    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.nrows()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.nrows()
    }

    /// Whether the mesh carries material data.
    pub fn has_materials(&self) -> bool {
        self.materials.is_some()
    }
}
