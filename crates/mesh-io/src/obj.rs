use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::{ImportError, Material, MaterialErrorPolicy, ObjMesh, load_mtl};

/// How faces with more than three corners are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeterogeneousFaces {
    /// Keep faces as they are. Fails when face sizes differ.
    Reject,

    /// Split every polygon into a fan of triangles.
    #[default]
    Triangulate,
}

/// Options for [import_mesh].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjImportOptions {
    /// Read UVs, face UV indices and materials.
    pub with_materials: bool,

    /// Read normals and face normal indices.
    pub with_normals: bool,

    /// Policy for polygons.
    pub heterogeneous_faces: HeterogeneousFaces,

    /// Policy for material errors.
    pub material_errors: MaterialErrorPolicy,
}

impl ObjImportOptions {
    /// Set whether materials are read.
    pub fn with_materials(mut self, with_materials: bool) -> Self {
        self.with_materials = with_materials;
        self
    }

    /// Set whether normals are read.
    pub fn with_normals(mut self, with_normals: bool) -> Self {
        self.with_normals = with_normals;
        self
    }

    /// Set the polygon policy.
    pub fn with_heterogeneous_faces(mut self, policy: HeterogeneousFaces) -> Self {
        self.heterogeneous_faces = policy;
        self
    }

    /// Set the material error policy.
    pub fn with_material_errors(mut self, policy: MaterialErrorPolicy) -> Self {
        self.material_errors = policy;
        self
    }
}

/// Import a mesh from an OBJ file.
///
/// # Arguments
///
/// * `path` - OBJ file. Material libraries are resolved relative to its folder.
/// * `options` - Import options.
///
/// # Returns
/// The imported mesh.
pub fn import_mesh<P: AsRef<Path>>(
    path: P,
    options: &ObjImportOptions,
) -> Result<ObjMesh, ImportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| ImportError::io(path, err))?;
    parse_obj(BufReader::new(file), path, options)
}

/// Lines of a text file. Invalid UTF-8 is replaced, not rejected.
pub(crate) fn text_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = std::io::Result<String>> {
    reader
        .split(b'\n')
        .map(|line| line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}

/// Parse an OBJ mesh from a reader.
///
/// `source` is the path the content was read from, used to resolve `mtllib` statements.
pub fn parse_obj<R: BufRead>(
    reader: R,
    source: &Path,
    options: &ObjImportOptions,
) -> Result<ObjMesh, ImportError> {
    let mut state = ObjState::default();

    for (index, line) in text_lines(reader).enumerate() {
        let line = line.map_err(|err| ImportError::io(source, err))?;
        let line_no = index + 1;
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        let args = tokens.collect::<Vec<_>>();

        match keyword {
            "v" => state.vertices.push(parse_floats::<3>(line_no, &args, 3)?),
            "vt" if options.with_materials => {
                let [u, v] = parse_floats::<2>(line_no, &args, 1)?;
                state.uvs.push([u, v]);
            }
            "vn" if options.with_normals => {
                state.normals.push(parse_floats::<3>(line_no, &args, 3)?)
            }
            "f" => {
                let face = state.parse_face(line_no, &args, options)?;
                state.faces.push(face);
            }
            "usemtl" if options.with_materials => {
                let name = args
                    .first()
                    .ok_or_else(|| ImportError::parse(line_no, "`usemtl` without a name"))?;
                state.material_uses.push((name.to_string(), state.faces.len()));
            }
            "mtllib" if options.with_materials => {
                let base_dir = source.parent().unwrap_or_else(|| Path::new(""));
                state
                    .libraries
                    .extend(args.iter().map(|file| base_dir.join(file)));
            }
            _ => {}
        }
    }

    state.build(options)
}

#[derive(Debug)]
struct Face {
    vertices: Vec<i64>,
    uvs: Vec<i64>,
    normals: Vec<i64>,
}

#[derive(Default)]
struct ObjState {
    vertices: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    faces: Vec<Face>,
    /// `(material name, index of the first face using it)`.
    material_uses: Vec<(String, usize)>,
    libraries: Vec<PathBuf>,
}

impl ObjState {
    fn parse_face(
        &self,
        line: usize,
        args: &[&str],
        options: &ObjImportOptions,
    ) -> Result<Face, ImportError> {
        if args.len() < 3 {
            return Err(ImportError::parse(
                line,
                format!("face with {} corners", args.len()),
            ));
        }

        let mut face = Face {
            vertices: Vec::with_capacity(args.len()),
            uvs: Vec::with_capacity(args.len()),
            normals: Vec::with_capacity(args.len()),
        };

        for corner in args {
            let mut parts = corner.split('/');
            let vertex = parts.next().unwrap_or_default();
            let uv = parts.next().filter(|part| !part.is_empty());
            let normal = parts.next().filter(|part| !part.is_empty());

            face.vertices.push(resolve_index(
                line,
                vertex,
                self.vertices.len(),
                "vertices",
            )?);

            if options.with_materials {
                let uv = match uv {
                    Some(uv) => resolve_index(line, uv, self.uvs.len(), "uvs")?,
                    None => -1,
                };
                face.uvs.push(uv);
            }

            if options.with_normals {
                let normal = match normal {
                    Some(normal) => resolve_index(line, normal, self.normals.len(), "normals")?,
                    None => -1,
                };
                face.normals.push(normal);
            }
        }

        Ok(face)
    }

    fn build(self, options: &ObjImportOptions) -> Result<ObjMesh, ImportError> {
        if self.vertices.is_empty() || self.faces.is_empty() {
            return Err(ImportError::EmptyMesh {
                vertices: self.vertices.len(),
                faces: self.faces.len(),
            });
        }

        let (faces, face_offsets) = self.shape_faces(options.heterogeneous_faces)?;
        let num_faces = faces.len();
        let face_size = faces.first().map(|face| face.vertices.len()).unwrap_or(3);

        let corners = |select: fn(&Face) -> &[i64]| face_array(&faces, face_size, select);

        let (uvs, face_uvs_idx, materials, materials_order) = if options.with_materials {
            let (materials, order) = resolve_materials(
                &self.material_uses,
                &self.libraries,
                &face_offsets,
                num_faces,
                options.material_errors,
            )?;
            (
                Some(Array2::from(self.uvs)),
                Some(corners(|face| face.uvs.as_slice())),
                Some(materials),
                Some(order),
            )
        } else {
            (None, None, None, None)
        };

        let (normals, face_normals_idx) = if options.with_normals {
            (
                Some(Array2::from(self.normals)),
                Some(corners(|face| face.normals.as_slice())),
            )
        } else {
            (None, None)
        };

        Ok(ObjMesh {
            vertices: Array2::from(self.vertices),
            faces: corners(|face| face.vertices.as_slice()),
            uvs,
            face_uvs_idx,
            materials,
            materials_order,
            normals,
            face_normals_idx,
        })
    }

    /// Apply the polygon policy.
    ///
    /// Also returns, for every original face, the index of its first output face.
    fn shape_faces(
        &self,
        policy: HeterogeneousFaces,
    ) -> Result<(Vec<Face>, Vec<usize>), ImportError> {
        let first = self.faces[0].vertices.len();
        let other = self
            .faces
            .iter()
            .map(|face| face.vertices.len())
            .find(|size| *size != first);

        let triangulate = match (policy, other) {
            (HeterogeneousFaces::Reject, Some(other)) => {
                return Err(ImportError::NonHomogeneousMesh { first, other });
            }
            (HeterogeneousFaces::Reject, None) => false,
            (HeterogeneousFaces::Triangulate, _) => other.is_some() || first != 3,
        };

        let mut faces = Vec::with_capacity(self.faces.len());
        let mut offsets = Vec::with_capacity(self.faces.len());

        for face in self.faces.iter() {
            offsets.push(faces.len());

            if !triangulate {
                faces.push(Face {
                    vertices: face.vertices.clone(),
                    uvs: face.uvs.clone(),
                    normals: face.normals.clone(),
                });
                continue;
            }

            for i in 1..face.vertices.len() - 1 {
                let pick = |corners: &[i64]| {
                    if corners.is_empty() {
                        Vec::new()
                    } else {
                        vec![corners[0], corners[i], corners[i + 1]]
                    }
                };
                faces.push(Face {
                    vertices: pick(face.vertices.as_slice()),
                    uvs: pick(face.uvs.as_slice()),
                    normals: pick(face.normals.as_slice()),
                });
            }
        }

        Ok((faces, offsets))
    }
}

/// Gather one index per face corner into a `[F, size]` array.
fn face_array(faces: &[Face], size: usize, select: fn(&Face) -> &[i64]) -> Array2<i64> {
    Array2::from_shape_fn((faces.len(), size), |(i, j)| select(&faces[i])[j])
}

/// Build the material list and the `[M, 2]` materials-order table.
fn resolve_materials(
    uses: &[(String, usize)],
    libraries: &[PathBuf],
    face_offsets: &[usize],
    num_faces: usize,
    policy: MaterialErrorPolicy,
) -> Result<(Vec<Material>, Array2<i64>), ImportError> {
    let mut library = HashMap::new();
    for path in libraries {
        match load_mtl(path, policy) {
            // Later definitions override earlier ones.
            Ok(materials) => library.extend(
                materials
                    .into_iter()
                    .map(|material| (material.name.clone(), material)),
            ),
            Err(err) => policy.handle(err)?,
        }
    }

    let mut materials: Vec<Material> = Vec::new();
    let mut indices: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::with_capacity(uses.len());

    for (name, face) in uses {
        let material_idx = match indices.get(name.as_str()) {
            Some(idx) => *idx,
            None => {
                let material = match library.get(name) {
                    Some(material) => material.clone(),
                    None => {
                        policy.handle(ImportError::MaterialNotFound(name.clone()))?;
                        Material::new(name.as_str())
                    }
                };
                materials.push(material);
                indices.insert(name.as_str(), materials.len() - 1);
                materials.len() - 1
            }
        };

        let first_face = face_offsets.get(*face).copied().unwrap_or(num_faces);
        order.push([first_face as i64, material_idx as i64]);
    }

    Ok((materials, Array2::from(order)))
}

/// Resolve a one-based (or negative, relative) OBJ index to a zero-based one.
fn resolve_index(
    line: usize,
    token: &str,
    count: usize,
    kind: &'static str,
) -> Result<i64, ImportError> {
    let index = token
        .parse::<i64>()
        .map_err(|err| ImportError::parse(line, format!("invalid index `{token}`: {err}")))?;

    let resolved = if index > 0 {
        index - 1
    } else {
        count as i64 + index
    };

    if index == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(ImportError::InvalidIndex {
            line,
            index,
            count,
            kind,
        });
    }

    Ok(resolved)
}

/// Parse up to `N` floats, requiring at least `required`. Missing components are zero.
fn parse_floats<const N: usize>(
    line: usize,
    args: &[&str],
    required: usize,
) -> Result<[f32; N], ImportError> {
    if args.len() < required {
        return Err(ImportError::parse(
            line,
            format!("expected {required} components, got {}", args.len()),
        ));
    }

    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(args) {
        *value = token
            .parse::<f32>()
            .map_err(|err| ImportError::parse(line, format!("invalid number `{token}`: {err}")))?;
    }

    Ok(values)
}
