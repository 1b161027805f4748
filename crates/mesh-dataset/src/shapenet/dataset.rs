use std::path::{Path, PathBuf};

use globwalk::{DirEntry, FileType};
use mesh_io::{ObjImportOptions, ObjMesh, import_mesh};

use super::{SYNSETS, ShapeNetConfig, ShapeNetError, labels_of, resolve_category};
use crate::transform::{Mapper, MapperDataset};
use crate::{Dataset, InMemDataset, resolve_index};

/// Attributes of a ShapeNet model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeNetAttributes {
    /// Model folder name (the model id).
    pub name: String,

    /// Model file.
    pub path: PathBuf,

    /// Synset id of the model's category.
    pub synset: String,

    /// Labels of the model's category.
    pub labels: Vec<String>,
}

/// ShapeNet dataset item.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeNetItem {
    /// Imported mesh.
    pub data: ObjMesh,

    /// Model attributes.
    pub attributes: ShapeNetAttributes,
}

#[derive(Debug, Clone)]
struct ShapeNetItemRaw {
    /// Model folder.
    model_dir: PathBuf,

    /// Index into the dataset's synsets.
    synset_idx: usize,
}

struct PathToShapeNetItem {
    model_file: &'static str,
    synsets: Vec<String>,
    options: ObjImportOptions,
}

impl PathToShapeNetItem {
    fn attributes(&self, item: &ShapeNetItemRaw) -> ShapeNetAttributes {
        let synset = &self.synsets[item.synset_idx];
        let labels = labels_of(synset)
            .unwrap_or_default()
            .iter()
            .map(|label| label.to_string())
            .collect();

        ShapeNetAttributes {
            name: item
                .model_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: item.model_dir.join(self.model_file),
            synset: synset.clone(),
            labels,
        }
    }
}

impl Mapper<ShapeNetItemRaw, Result<ShapeNetItem, ShapeNetError>> for PathToShapeNetItem {
    /// Load the model's mesh from disk.
    fn map(&self, item: &ShapeNetItemRaw) -> Result<ShapeNetItem, ShapeNetError> {
        let attributes = self.attributes(item);
        let data = import_mesh(&attributes.path, &self.options).map_err(|source| {
            ShapeNetError::Import {
                path: attributes.path.clone(),
                source,
            }
        })?;

        Ok(ShapeNetItem { data, attributes })
    }
}

type ShapeNetMapper =
    MapperDataset<InMemDataset<ShapeNetItemRaw>, PathToShapeNetItem, ShapeNetItemRaw>;

/// ShapeNetCore dataset.
///
/// The corpus is laid out as `<root>/<synset>/<model>/` with the mesh file given by the
/// [version](super::ShapeNetVersion). Each category is split on its sorted model folders: the
/// first `floor(count * split)` models form the train part, the rest the test part.
///
/// Meshes are read from disk on every access. Items support negative indices through
/// [Dataset::get_signed] and [ShapeNetDataset::try_get_signed].
pub struct ShapeNetDataset {
    dataset: ShapeNetMapper,
    config: ShapeNetConfig,
}

impl Dataset<ShapeNetItem> for ShapeNetDataset {
    fn get(&self, index: usize) -> Option<ShapeNetItem> {
        match self.load(index)? {
            Ok(item) => Some(item),
            Err(err) => {
                log::warn!("Could not load ShapeNet item {index}: {err}");
                None
            }
        }
    }

    fn len(&self) -> usize {
        self.dataset.inner().len()
    }
}

impl ShapeNetDataset {
    /// Scan the dataset root and create the dataset.
    ///
    /// # Arguments
    ///
    /// * `config` - Dataset configuration.
    ///
    /// # Returns
    /// A new dataset instance.
    pub fn new(config: ShapeNetConfig) -> Result<Self, ShapeNetError> {
        if !(0.0..=1.0).contains(&config.split) {
            return Err(ShapeNetError::InvalidSplit(config.split));
        }
        if !config.root.is_dir() {
            return Err(ShapeNetError::RootNotFound(config.root.clone()));
        }

        let synsets = Self::resolve_synsets(&config)?;

        let mut items = Vec::new();
        for (synset_idx, synset) in synsets.iter().enumerate() {
            let models = Self::list_models(&config.root.join(synset))?;
            let stop = (models.len() as f64 * config.split) as usize;
            let models = if config.train {
                &models[..stop]
            } else {
                &models[stop..]
            };

            log::debug!(
                "Synset {synset}: {} models in the {} part",
                models.len(),
                if config.train { "train" } else { "test" }
            );

            items.extend(models.iter().map(|model_dir| ShapeNetItemRaw {
                model_dir: model_dir.clone(),
                synset_idx,
            }));
        }

        log::info!(
            "ShapeNet {} at {}: {} models from {} categories",
            config.version,
            config.root.display(),
            items.len(),
            synsets.len()
        );

        let mapper = PathToShapeNetItem {
            model_file: config.version.model_file(),
            synsets,
            options: config.import_options(),
        };
        let dataset = MapperDataset::new(InMemDataset::new(items), mapper);

        Ok(Self { dataset, config })
    }

    /// Load the item at the given index.
    pub fn try_get(&self, index: usize) -> Result<ShapeNetItem, ShapeNetError> {
        self.load(index).ok_or(ShapeNetError::IndexOutOfRange {
            index: index as isize,
            len: self.len(),
        })?
    }

    /// Load the item at a signed index. Negative indices count from the end.
    pub fn try_get_signed(&self, index: isize) -> Result<ShapeNetItem, ShapeNetError> {
        let resolved = resolve_index(index, self.len()).ok_or(ShapeNetError::IndexOutOfRange {
            index,
            len: self.len(),
        })?;
        self.try_get(resolved)
    }

    /// Iterate over every item, yielding load failures instead of skipping them.
    pub fn try_iter(&self) -> impl Iterator<Item = Result<ShapeNetItem, ShapeNetError>> + '_ {
        (0..self.len()).map(move |index| self.try_get(index))
    }

    /// Attributes of the item at the given index, without reading its mesh.
    pub fn attributes(&self, index: usize) -> Option<ShapeNetAttributes> {
        let raw = self.dataset.inner().get(index)?;
        Some(self.mapper().attributes(&raw))
    }

    /// Synset ids of the loaded categories.
    pub fn synsets(&self) -> &[String] {
        &self.mapper().synsets
    }

    /// Dataset configuration.
    pub fn config(&self) -> &ShapeNetConfig {
        &self.config
    }

    fn mapper(&self) -> &PathToShapeNetItem {
        self.dataset.mapper()
    }

    fn load(&self, index: usize) -> Option<Result<ShapeNetItem, ShapeNetError>> {
        self.dataset.get(index)
    }

    /// Synset ids to load, in table order for `None`, in request order otherwise.
    fn resolve_synsets(config: &ShapeNetConfig) -> Result<Vec<String>, ShapeNetError> {
        let Some(categories) = &config.categories else {
            let synsets = SYNSETS
                .iter()
                .map(|(id, _)| id.to_string())
                .filter(|id| config.root.join(id).is_dir())
                .collect::<Vec<_>>();
            return Ok(synsets);
        };

        let mut synsets: Vec<String> = Vec::with_capacity(categories.len());
        for category in categories {
            let synset = resolve_category(category)
                .ok_or_else(|| ShapeNetError::UnknownCategory(category.clone()))?;

            if synsets.iter().any(|known| known == synset) {
                continue;
            }

            let path = config.root.join(synset);
            if !path.is_dir() {
                return Err(ShapeNetError::CategoryNotFound {
                    synset: synset.to_string(),
                    path,
                });
            }
            synsets.push(synset.to_string());
        }

        Ok(synsets)
    }

    /// Model folders of a category, sorted by path.
    fn list_models(category_dir: &Path) -> Result<Vec<PathBuf>, ShapeNetError> {
        let walker = globwalk::GlobWalkerBuilder::from_patterns(category_dir, &["*"])
            .max_depth(1)
            .file_type(FileType::DIR)
            .follow_links(true)
            .sort_by(|p1: &DirEntry, p2: &DirEntry| p1.path().cmp(p2.path())) // order by path
            .build()
            .map_err(|err| ShapeNetError::Scan(format!("{err:?}")))?;

        walker
            .map(|entry| {
                entry
                    .map(|entry| entry.into_path())
                    .map_err(|err| ShapeNetError::Scan(err.to_string()))
            })
            .collect()
    }
}
