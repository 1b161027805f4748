//! ShapeNetCore taxonomy.

/// ShapeNetCore synset ids with their human readable labels, ordered by id.
pub const SYNSETS: &[(&str, &[&str])] = &[
    ("02691156", &["airplane", "aeroplane", "plane"]),
    (
        "02747177",
        &[
            "ashcan",
            "trash can",
            "garbage can",
            "wastebin",
            "ash bin",
            "ash-bin",
            "ashbin",
            "dustbin",
            "trash barrel",
            "trash bin",
        ],
    ),
    (
        "02773838",
        &["bag", "traveling bag", "travelling bag", "grip", "suitcase"],
    ),
    ("02801938", &["basket", "handbasket"]),
    ("02808440", &["bathtub", "bathing tub", "bath", "tub"]),
    ("02818832", &["bed"]),
    ("02828884", &["bench"]),
    ("02843684", &["birdhouse"]),
    ("02871439", &["bookshelf"]),
    ("02876657", &["bottle"]),
    ("02880940", &["bowl"]),
    (
        "02924116",
        &[
            "bus",
            "autobus",
            "coach",
            "charabanc",
            "double-decker",
            "jitney",
            "motorbus",
            "motorcoach",
            "omnibus",
            "passenger vehicle",
        ],
    ),
    ("02933112", &["cabinet"]),
    ("02942699", &["camera", "photographic camera"]),
    ("02946921", &["can", "tin", "tin can"]),
    ("02954340", &["cap"]),
    ("02958343", &["car", "auto", "automobile", "machine", "motorcar"]),
    (
        "02992529",
        &[
            "cellular telephone",
            "cellular phone",
            "cellphone",
            "cell",
            "mobile phone",
        ],
    ),
    ("03001627", &["chair"]),
    ("03046257", &["clock"]),
    ("03085013", &["computer keyboard", "keypad"]),
    (
        "03207941",
        &["dishwasher", "dish washer", "dishwashing machine"],
    ),
    ("03211117", &["display", "video display"]),
    ("03261776", &["earphone", "earpiece", "headphone", "phone"]),
    ("03325088", &["faucet", "spigot"]),
    ("03337140", &["file", "file cabinet", "filing cabinet"]),
    ("03467517", &["guitar"]),
    ("03513137", &["helmet"]),
    ("03593526", &["jar"]),
    ("03624134", &["knife"]),
    ("03636649", &["lamp"]),
    ("03642806", &["laptop", "laptop computer"]),
    (
        "03691459",
        &[
            "loudspeaker",
            "speaker",
            "speaker unit",
            "loudspeaker system",
            "speaker system",
        ],
    ),
    ("03710193", &["mailbox", "letter box"]),
    ("03759954", &["microphone", "mike"]),
    ("03761084", &["microwave", "microwave oven"]),
    ("03790512", &["motorcycle", "bike"]),
    ("03797390", &["mug"]),
    ("03928116", &["piano", "pianoforte", "forte-piano"]),
    ("03938244", &["pillow"]),
    (
        "03948459",
        &["pistol", "handgun", "side arm", "shooting iron"],
    ),
    ("03991062", &["pot", "flowerpot"]),
    ("04004475", &["printer", "printing machine"]),
    ("04074963", &["remote control", "remote"]),
    ("04090263", &["rifle"]),
    ("04099429", &["rocket", "projectile"]),
    ("04225987", &["skateboard"]),
    ("04256520", &["sofa", "couch", "lounge"]),
    ("04330267", &["stove"]),
    ("04379243", &["table"]),
    ("04401088", &["telephone", "phone", "telephone set"]),
    ("04460130", &["tower"]),
    ("04468005", &["train", "railroad train"]),
    ("04530566", &["vessel", "watercraft"]),
    (
        "04554684",
        &["washer", "automatic washer", "washing machine"],
    ),
];

/// Labels of a synset id.
pub fn labels_of(synset: &str) -> Option<&'static [&'static str]> {
    SYNSETS
        .iter()
        .find(|(id, _)| *id == synset)
        .map(|(_, labels)| *labels)
}

/// Synset id of a label.
///
/// A label shared by several synsets (`phone`) resolves to the last of them in id order.
pub fn synset_of(label: &str) -> Option<&'static str> {
    SYNSETS
        .iter()
        .rev()
        .find(|(_, labels)| labels.iter().any(|candidate| *candidate == label))
        .map(|(id, _)| *id)
}

/// Resolve a category given as a synset id or a label to its synset id.
pub fn resolve_category(category: &str) -> Option<&'static str> {
    SYNSETS
        .iter()
        .find(|(id, _)| *id == category)
        .map(|(id, _)| *id)
        .or_else(|| synset_of(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn table_is_sorted_and_unique() {
        assert_eq!(SYNSETS.len(), 55);
        for pair in SYNSETS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[rstest]
    #[case::id("02691156", Some("02691156"))]
    #[case::label("plane", Some("02691156"))]
    #[case::car("car", Some("02958343"))]
    #[case::multi_word("trash can", Some("02747177"))]
    #[case::shared_label("phone", Some("04401088"))]
    #[case::unknown("spaceship", None)]
    #[case::unknown_id("99999999", None)]
    fn resolve(#[case] category: &str, #[case] expected: Option<&str>) {
        assert_eq!(resolve_category(category), expected);
    }

    #[test]
    fn labels() {
        assert_eq!(labels_of("02958343").unwrap()[0], "car");
        assert_eq!(labels_of("car"), None);
    }
}
