use std::path::{Path, PathBuf};

use mesh_io::{HeterogeneousFaces, MaterialErrorPolicy, ObjImportOptions};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{ConfigError, ShapeNetError};

/// ShapeNetCore release.
///
/// The two releases share the `<root>/<synset>/<model>/` layout and differ in the model file
/// inside each model folder.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum ShapeNetVersion {
    /// ShapeNetCore v1: `<model>/model.obj`.
    #[strum(serialize = "v1")]
    #[serde(rename = "v1")]
    V1,

    /// ShapeNetCore v2: `<model>/models/model_normalized.obj`.
    #[strum(serialize = "v2")]
    #[serde(rename = "v2")]
    V2,
}

impl ShapeNetVersion {
    /// Parse a version name (`v1` or `v2`).
    pub fn from_name(name: &str) -> Result<Self, ShapeNetError> {
        name.parse()
            .map_err(|_| ShapeNetError::UnknownVersion(name.to_string()))
    }

    /// Model file relative to a model folder.
    pub fn model_file(&self) -> &'static str {
        match self {
            ShapeNetVersion::V1 => "model.obj",
            ShapeNetVersion::V2 => "models/model_normalized.obj",
        }
    }

    /// Environment variable overriding the dataset root.
    pub fn root_env_var(&self) -> &'static str {
        match self {
            ShapeNetVersion::V1 => "SHAPENET_V1_ROOT",
            ShapeNetVersion::V2 => "SHAPENET_V2_ROOT",
        }
    }

    /// Dataset root used when the environment variable is not set.
    pub fn default_root(&self) -> &'static str {
        match self {
            ShapeNetVersion::V1 => "/data/ShapeNetCore.v1",
            ShapeNetVersion::V2 => "/data/ShapeNetCore.v2",
        }
    }

    /// Dataset root from the environment, falling back to [default_root](Self::default_root).
    pub fn root_from_env(&self) -> PathBuf {
        std::env::var_os(self.root_env_var())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(self.default_root()))
    }
}

/// Configuration of a [ShapeNetDataset](crate::shapenet::ShapeNetDataset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeNetConfig {
    /// Dataset release.
    pub version: ShapeNetVersion,

    /// Dataset root folder, holding one folder per synset.
    pub root: PathBuf,

    /// Categories to load, as synset ids or labels. `None` loads every category present.
    #[serde(default)]
    pub categories: Option<Vec<String>>,

    /// Load the train part of each category, the test part otherwise.
    #[serde(default = "default_train")]
    pub train: bool,

    /// Fraction of each category assigned to the train part.
    #[serde(default = "default_split")]
    pub split: f64,

    /// Load UVs and materials.
    #[serde(default = "default_with_materials")]
    pub with_materials: bool,

    /// Load normals.
    #[serde(default)]
    pub with_normals: bool,

    /// Log and skip material errors instead of failing.
    #[serde(default = "default_ignore_material_errors")]
    pub ignore_material_errors: bool,

    /// Split polygons into triangles.
    #[serde(default = "default_triangulate")]
    pub triangulate: bool,
}

fn default_train() -> bool {
    true
}

fn default_split() -> f64 {
    0.7
}

fn default_with_materials() -> bool {
    true
}

fn default_ignore_material_errors() -> bool {
    true
}

fn default_triangulate() -> bool {
    true
}

impl ShapeNetConfig {
    /// Create a configuration with default options.
    pub fn new<P: AsRef<Path>>(version: ShapeNetVersion, root: P) -> Self {
        Self {
            version,
            root: root.as_ref().to_path_buf(),
            categories: None,
            train: default_train(),
            split: default_split(),
            with_materials: default_with_materials(),
            with_normals: false,
            ignore_material_errors: default_ignore_material_errors(),
            triangulate: default_triangulate(),
        }
    }

    /// Create a configuration rooted at the version's environment or default root.
    pub fn from_env(version: ShapeNetVersion) -> Self {
        Self::new(version, version.root_from_env())
    }

    /// Restrict the dataset to the given categories (synset ids or labels).
    ///
    /// Entries naming the same synset are loaded once, in the order first requested.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Load every category present under the root.
    pub fn with_all_categories(mut self) -> Self {
        self.categories = None;
        self
    }

    /// Set whether the train part is loaded.
    pub fn with_train(mut self, train: bool) -> Self {
        self.train = train;
        self
    }

    /// Set the train fraction.
    pub fn with_split(mut self, split: f64) -> Self {
        self.split = split;
        self
    }

    /// Set whether materials are loaded.
    pub fn with_materials(mut self, with_materials: bool) -> Self {
        self.with_materials = with_materials;
        self
    }

    /// Set whether normals are loaded.
    pub fn with_normals(mut self, with_normals: bool) -> Self {
        self.with_normals = with_normals;
        self
    }

    /// Set whether material errors are ignored.
    pub fn with_ignore_material_errors(mut self, ignore: bool) -> Self {
        self.ignore_material_errors = ignore;
        self
    }

    /// Set whether polygons are triangulated.
    pub fn with_triangulate(mut self, triangulate: bool) -> Self {
        self.triangulate = triangulate;
        self
    }

    /// Mesh import options derived from the configuration.
    pub fn import_options(&self) -> ObjImportOptions {
        ObjImportOptions::default()
            .with_materials(self.with_materials)
            .with_normals(self.with_normals)
            .with_material_errors(if self.ignore_material_errors {
                MaterialErrorPolicy::Ignore
            } else {
                MaterialErrorPolicy::Fail
            })
            .with_heterogeneous_faces(if self.triangulate {
                HeterogeneousFaces::Triangulate
            } else {
                HeterogeneousFaces::Reject
            })
    }

    /// Converts the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::InvalidFormat(format!("{err}")))
    }

    /// Saves the configuration to a file.
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<(), ConfigError> {
        let content = self.to_json()?;
        std::fs::write(file.as_ref(), content)
            .map_err(|_| ConfigError::FileNotFound(file.as_ref().to_string_lossy().to_string()))
    }

    /// Loads the configuration from a file.
    pub fn load<P: AsRef<Path>>(file: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(file.as_ref())
            .map_err(|_| ConfigError::FileNotFound(file.as_ref().to_string_lossy().to_string()))?;
        Self::from_json(&content)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|err| ConfigError::InvalidFormat(format!("{err}")))
    }
}
