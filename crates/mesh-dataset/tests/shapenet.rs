mod common;

use common::{Corpus, CorpusSource, MODELS_PER_SYNSET};
use mesh_dataset::Dataset;
use mesh_dataset::mesh_io::Material;
use mesh_dataset::shapenet::{
    ShapeNetConfig, ShapeNetDataset, ShapeNetError, ShapeNetItem, ShapeNetVersion,
};
use ndarray::array;
use rand::Rng;
use rstest::rstest;

const CATEGORY_SYNSETS: &[&str] = &["02691156"];
const CATEGORY_LABELS: &[&str] = &["plane"];
const CATEGORY_SYNSETS_2: &[&str] = &["02958343"];
const CATEGORY_LABELS_2: &[&str] = &["car"];
const CATEGORY_SYNSETS_MULTI: &[&str] = &["02691156", "02958343"];
const CATEGORY_LABELS_MULTI: &[&str] = &["plane", "car"];

#[derive(Debug, Clone, Copy)]
enum Index {
    At(isize),
    Random,
}

/// Build the dataset under test, or `None` when its corpus is unavailable.
fn shapenet_dataset(
    source: CorpusSource,
    version: &str,
    categories: Option<&[&str]>,
    train: bool,
    with_materials: bool,
) -> Result<Option<(Corpus, ShapeNetDataset)>, ShapeNetError> {
    let version = ShapeNetVersion::from_name(version)?;
    let Some(corpus) = Corpus::open(source, version) else {
        return Ok(None);
    };

    let config = ShapeNetConfig::new(version, &corpus.root)
        .with_train(train)
        .with_split(0.7)
        .with_materials(with_materials);
    let config = match categories {
        Some(categories) => config.with_categories(categories.iter().copied()),
        None => config.with_all_categories(),
    };

    let dataset = ShapeNetDataset::new(config)?;
    Ok(Some((corpus, dataset)))
}

fn assert_same_material(material: &Material, expected: &Material) {
    assert_eq!(material.keys(), expected.keys());
    assert_eq!(material.name, expected.name);
    assert_eq!(material.ambient, expected.ambient);
    assert_eq!(material.diffuse, expected.diffuse);
    assert_eq!(material.specular, expected.specular);
    assert_eq!(material.shininess, expected.shininess);
    assert_eq!(material.ambient_texture, expected.ambient_texture);
    assert_eq!(material.diffuse_texture, expected.diffuse_texture);
    assert_eq!(material.specular_texture, expected.specular_texture);
}

fn assert_same_item(item: &ShapeNetItem, expected: &ShapeNetItem, with_materials: bool) {
    let (data, expected_data) = (&item.data, &expected.data);
    assert_eq!(data.vertices, expected_data.vertices);
    assert_eq!(data.faces, expected_data.faces);

    if with_materials {
        assert_eq!(data.uvs, expected_data.uvs);
        assert_eq!(data.face_uvs_idx, expected_data.face_uvs_idx);
        assert_eq!(data.materials_order, expected_data.materials_order);

        let materials = data.materials.as_ref().unwrap();
        let expected_materials = expected_data.materials.as_ref().unwrap();
        assert_eq!(materials.len(), expected_materials.len());
        for (material, expected) in materials.iter().zip(expected_materials) {
            assert_same_material(material, expected);
        }
    }

    assert_eq!(item.attributes.name, expected.attributes.name);
    assert_eq!(item.attributes.path, expected.attributes.path);
    assert_eq!(item.attributes.synset, expected.attributes.synset);
    assert_eq!(item.attributes.labels, expected.attributes.labels);
}

#[rstest]
fn basic_getitem(
    #[values(CorpusSource::Synthetic, CorpusSource::OnDisk)] source: CorpusSource,
    #[values("v1", "v2")] version: &str,
    #[values(
        None,
        Some(CATEGORY_SYNSETS),
        Some(CATEGORY_LABELS),
        Some(CATEGORY_SYNSETS_2),
        Some(CATEGORY_LABELS_2),
        Some(CATEGORY_SYNSETS_MULTI),
        Some(CATEGORY_LABELS_MULTI)
    )]
    categories: Option<&[&str]>,
    #[values(true, false)] train: bool,
    #[values(true, false)] with_materials: bool,
    #[values(Index::At(0), Index::At(-1), Index::Random, Index::Random)] index: Index,
) {
    let Some((_corpus, dataset)) =
        shapenet_dataset(source, version, categories, train, with_materials).unwrap()
    else {
        return;
    };
    assert!(!dataset.is_empty());

    let index = match index {
        Index::At(index) => index,
        Index::Random => rand::rng().random_range(0..dataset.len()) as isize,
    };

    let item = dataset.try_get_signed(index).unwrap();
    let data = &item.data;
    let attributes = &item.attributes;

    assert_eq!(data.vertices.ndim(), 2);
    assert!(data.num_vertices() > 0);
    assert_eq!(data.vertices.shape()[1], 3);

    assert_eq!(data.faces.ndim(), 2);
    assert!(data.num_faces() > 0);
    assert_eq!(data.faces.shape()[1], 3);

    assert_eq!(data.has_materials(), with_materials);
    if with_materials {
        let uvs = data.uvs.as_ref().unwrap();
        assert_eq!(uvs.ndim(), 2);
        assert_eq!(uvs.shape()[1], 2);

        let face_uvs_idx = data.face_uvs_idx.as_ref().unwrap();
        assert_eq!(face_uvs_idx.shape(), data.faces.shape());

        assert!(!data.materials.as_ref().unwrap().is_empty());

        let materials_order = data.materials_order.as_ref().unwrap();
        assert_eq!(materials_order.ndim(), 2);
        assert!(materials_order.shape()[0] > 0);
        assert_eq!(materials_order.shape()[1], 2);
    } else {
        assert!(data.uvs.is_none());
        assert!(data.face_uvs_idx.is_none());
        assert!(data.materials.is_none());
        assert!(data.materials_order.is_none());
    }

    assert!(!attributes.name.is_empty());
    assert!(attributes.path.ends_with(dataset.config().version.model_file()));
    assert_eq!(attributes.synset.len(), 8);
    assert!(!attributes.labels.is_empty());
}

#[rstest]
fn neg_index(
    #[values(CorpusSource::Synthetic, CorpusSource::OnDisk)] source: CorpusSource,
    #[values("v1", "v2")] version: &str,
    #[values(
        None,
        Some(CATEGORY_SYNSETS),
        Some(CATEGORY_LABELS),
        Some(CATEGORY_SYNSETS_2),
        Some(CATEGORY_LABELS_2),
        Some(CATEGORY_SYNSETS_MULTI),
        Some(CATEGORY_LABELS_MULTI)
    )]
    categories: Option<&[&str]>,
    #[values(true, false)] train: bool,
    #[values(true, false)] with_materials: bool,
    #[values(-1, -2)] index: isize,
) {
    let Some((_corpus, dataset)) =
        shapenet_dataset(source, version, categories, train, with_materials).unwrap()
    else {
        return;
    };
    assert!(!dataset.is_empty());

    let expected = dataset
        .try_get((dataset.len() as isize + index) as usize)
        .unwrap();
    let item = dataset.try_get_signed(index).unwrap();

    assert_same_item(&item, &expected, with_materials);
    assert_eq!(item, expected);
}

#[rstest]
fn unknown_version_fails(
    #[values(CorpusSource::Synthetic, CorpusSource::OnDisk)] source: CorpusSource,
) {
    let result = shapenet_dataset(source, "v3", None, true, true);
    assert!(matches!(result, Err(ShapeNetError::UnknownVersion(version)) if version == "v3"));
}

#[rstest]
fn synthetic_split_sizes(
    #[values("v1", "v2")] version: &str,
    #[values(
        (None, 3),
        (Some(CATEGORY_LABELS), 1),
        (Some(CATEGORY_SYNSETS_MULTI), 2)
    )]
    categories: (Option<&[&str]>, usize),
    #[values(true, false)] train: bool,
) {
    let (categories, num_synsets) = categories;
    let (_corpus, dataset) =
        shapenet_dataset(CorpusSource::Synthetic, version, categories, train, false)
            .unwrap()
            .unwrap();

    let train_per_synset = (MODELS_PER_SYNSET as f64 * 0.7) as usize;
    let per_synset = if train {
        train_per_synset
    } else {
        MODELS_PER_SYNSET - train_per_synset
    };

    assert_eq!(dataset.synsets().len(), num_synsets);
    assert_eq!(dataset.len(), num_synsets * per_synset);
}

#[rstest]
fn synthetic_materials(#[values("v1", "v2")] version: &str) {
    let (_corpus, dataset) =
        shapenet_dataset(CorpusSource::Synthetic, version, None, true, true)
            .unwrap()
            .unwrap();
    let item = dataset.try_get(0).unwrap();
    let materials = item.data.materials.unwrap();

    assert_eq!(materials.len(), 2);
    assert_eq!(
        materials[0].keys(),
        vec!["name", "Ka", "Kd", "Ks", "Ns", "map_Kd"]
    );
    assert_eq!(materials[0].diffuse_texture.as_ref().unwrap().shape(), &[2, 4, 3]);
    assert_eq!(materials[1].keys(), vec!["name", "Kd"]);

    // The quad splits in two, so the second material starts at face 3.
    let order = item.data.materials_order.unwrap();
    assert_eq!(order.row(0).to_vec(), vec![0_i64, 0]);
    assert_eq!(order.row(1).to_vec(), vec![3_i64, 1]);

    let face_uvs_idx = item.data.face_uvs_idx.unwrap();
    assert_eq!(face_uvs_idx.row(4).to_vec(), vec![-1_i64, -1, -1]);
}

#[rstest]
fn synthetic_normals(#[values("v1", "v2")] version: &str) {
    let version = ShapeNetVersion::from_name(version).unwrap();
    let corpus = Corpus::synthetic(version);
    let config = ShapeNetConfig::new(version, &corpus.root)
        .with_categories(["chair"])
        .with_materials(false)
        .with_normals(true);
    let dataset = ShapeNetDataset::new(config).unwrap();
    let item = dataset.try_get_signed(-1).unwrap();

    assert!(!item.data.has_materials());
    assert_eq!(
        item.data.normals.unwrap(),
        array![[0.0_f32, 0.0, -1.0], [0.0, -1.0, 0.0]]
    );
    assert_eq!(
        item.data.face_normals_idx.unwrap(),
        array![
            [0_i64, 0, 0],
            [0, 0, 0],
            [-1, -1, -1],
            [1, 1, 1],
            [-1, -1, -1]
        ]
    );
}

#[rstest]
fn normals_are_off_by_default(#[values("v1", "v2")] version: &str) {
    let (_corpus, dataset) =
        shapenet_dataset(CorpusSource::Synthetic, version, None, true, true)
            .unwrap()
            .unwrap();
    let item = dataset.try_get(0).unwrap();

    assert!(item.data.normals.is_none());
    assert!(item.data.face_normals_idx.is_none());
}
