//! Corpus helpers shared by the integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use mesh_dataset::shapenet::ShapeNetVersion;
use tempfile::TempDir;

/// Synsets written to a synthetic corpus: planes, cars and chairs.
pub const SYNTHETIC_SYNSETS: [&str; 3] = ["02691156", "02958343", "03001627"];

/// Models written per synset.
pub const MODELS_PER_SYNSET: usize = 4;

/// Where the corpus under test comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusSource {
    /// Generated in a temporary folder.
    Synthetic,
    /// The ShapeNetCore release found at the version's configured root.
    OnDisk,
}

/// A corpus root, keeping the temporary folder alive for synthetic corpora.
pub struct Corpus {
    pub root: PathBuf,
    _dir: Option<TempDir>,
}

impl Corpus {
    /// Open the corpus, or `None` when the on-disk release is unavailable.
    pub fn open(source: CorpusSource, version: ShapeNetVersion) -> Option<Self> {
        match source {
            CorpusSource::Synthetic => Some(Self::synthetic(version)),
            CorpusSource::OnDisk => {
                if std::env::var("CI").is_ok_and(|ci| ci == "true") {
                    eprintln!("Skipping on-disk ShapeNet {version}: CI does not have the dataset");
                    return None;
                }

                let root = version.root_from_env();
                if !root.is_dir() {
                    eprintln!(
                        "Skipping on-disk ShapeNet {version}: {} not found (set {})",
                        root.display(),
                        version.root_env_var()
                    );
                    return None;
                }

                Some(Self { root, _dir: None })
            }
        }
    }

    /// Write a small corpus with the layout of the given release.
    pub fn synthetic(version: ShapeNetVersion) -> Self {
        let dir = tempfile::tempdir().unwrap();

        for (synset_idx, synset) in SYNTHETIC_SYNSETS.iter().enumerate() {
            for model_idx in 0..MODELS_PER_SYNSET {
                let model_dir = dir.path().join(synset).join(format!("model_{model_idx:02}"));
                let obj_path = model_dir.join(version.model_file());
                write_model(&obj_path, (synset_idx * MODELS_PER_SYNSET + model_idx) as f32);
            }
        }

        Self {
            root: dir.path().to_path_buf(),
            _dir: Some(dir),
        }
    }
}

/// Write a textured box with one quad face, two materials and partial normals.
fn write_model(obj_path: &Path, offset: f32) {
    let folder = obj_path.parent().unwrap();
    fs::create_dir_all(folder).unwrap();

    let mut texture = RgbImage::new(4, 2);
    for (x, y, pixel) in texture.enumerate_pixels_mut() {
        *pixel = Rgb([(x * 60) as u8, (y * 120) as u8, offset as u8]);
    }
    texture.save(folder.join("texture0.png")).unwrap();

    let mtl = "\
newmtl shell
Ka 0.1 0.1 0.1
Kd 0.6 0.6 0.6
Ks 0.2 0.2 0.2
Ns 12.5
map_Kd texture0.png

newmtl trim
Kd 0.9 0.1 0.1
";
    fs::write(folder.join("model.mtl"), mtl).unwrap();

    let mut obj = String::from("# synthetic model\nmtllib model.mtl\no box\n");
    for (x, y, z) in [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 0.0, 1.0),
    ] {
        obj.push_str(&format!("v {} {y} {z}\n", x + offset));
    }
    obj.push_str("vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n");
    obj.push_str("vn 0 0 -1\nvn 0 -1 0\n");
    obj.push_str("usemtl shell\n");
    obj.push_str("f 1/1/1 2/2/1 3/3/1 4/4/1\n");
    obj.push_str("f 1/1 2/2 6/3\n");
    obj.push_str("usemtl trim\n");
    obj.push_str("f 1/1/2 6/3/2 5/4/2\n");
    obj.push_str("f 4 3 5\n");
    fs::write(obj_path, obj).unwrap();
}
