use rand::prelude::*;

use spamforest::prelude::*;
use spamforest::model_store::{self, FORMAT_VERSION, MAGIC};
use spamforest::tree::MAX_TREE_DEPTH;


fn dataset(n_sample: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut dataset = Dataset::default();
    for _ in 0..n_sample {
        let row = (0..9).map(|_| rng.gen_range(0..100)).collect::<Vec<u64>>();
        let label = usize::from(row[1] > 60 || row[8] < 10);
        dataset.push(row, label).unwrap();
    }
    dataset
}


fn model() -> RandomForestClassifier {
    let train = dataset(120, 0);
    RandomForestBuilder::new(&train)
        .n_trees(13)
        .max_depth(6)
        .build()
        .unwrap()
        .fit()
        .unwrap()
}


#[test]
fn load_of_save_predicts_the_same() {
    let model = model();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cli-cli.model");

    model.save(&path).unwrap();
    let loaded = RandomForestClassifier::load(&path).unwrap();

    assert_eq!(loaded, model);
    assert_eq!(loaded.hyperparameters(), model.hyperparameters());
    assert_eq!(loaded.oob_error(), model.oob_error());

    let test = dataset(200, 1);
    for (x, _) in test.iter() {
        assert_eq!(loaded.predict(x), model.predict(x));
        assert_eq!(loaded.predict_with_votes(x), model.predict_with_votes(x));
    }
}


#[test]
fn encoding_is_stable() {
    let model = model();
    let mut first = Vec::new();
    model_store::encode(&model, &mut first).unwrap();

    let decoded = model_store::decode(&first[..], "memory").unwrap();
    let mut second = Vec::new();
    model_store::encode(&decoded, &mut second).unwrap();

    assert!(first.starts_with(MAGIC));
    assert_eq!(first, second);
}


#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = model_store::load(dir.path().join("missing.model"));
    assert!(matches!(result, Err(SpamError::NotFound { .. })));
}


#[test]
fn garbage_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.model");
    std::fs::write(&path, b"definitely not a model").unwrap();

    let result = model_store::load(&path);
    assert!(matches!(result, Err(SpamError::CorruptModel { .. })));
}


#[test]
fn other_versions_are_rejected() {
    let mut bytes = Vec::new();
    model_store::encode(&model(), &mut bytes).unwrap();
    let next = FORMAT_VERSION + 1;
    bytes[8..10].copy_from_slice(&next.to_le_bytes());

    match model_store::decode(&bytes[..], "old.model") {
        Err(SpamError::VersionMismatch { expected, found, path }) => {
            assert_eq!(expected, FORMAT_VERSION);
            assert_eq!(found, next);
            assert_eq!(path, std::path::PathBuf::from("old.model"));
        },
        other => panic!("expected a version mismatch, got {other:?}"),
    }
}


#[test]
fn truncated_and_padded_files_are_corrupt() {
    let mut bytes = Vec::new();
    model_store::encode(&model(), &mut bytes).unwrap();

    let truncated = &bytes[..bytes.len() - 3];
    assert!(matches!(
        model_store::decode(truncated, "truncated.model"),
        Err(SpamError::CorruptModel { .. }),
    ));

    let mut padded = bytes.clone();
    padded.push(0);
    assert!(matches!(
        model_store::decode(&padded[..], "padded.model"),
        Err(SpamError::CorruptModel { .. }),
    ));
}


#[test]
fn out_of_range_nodes_are_corrupt() {
    let train = Dataset::from_vectors(&[
        spamforest::feature::FeatureVector {
            association: 0, contributions: 0, repos: 0, age: 0,
            followers: 0, following: 0, body_len: 0, title_len: 0,
            sim_score: 0, is_spam: 1,
        },
    ]).unwrap();
    let model = RandomForestBuilder::new(&train)
        .n_trees(1)
        .build()
        .unwrap()
        .fit()
        .unwrap();

    let mut bytes = Vec::new();
    model_store::encode(&model, &mut bytes).unwrap();

    // A single leaf: tag, label, then one count per class.
    let n_classes = model.n_classes();
    let leaf = bytes.len() - (1 + 4 + 8 * n_classes);
    assert_eq!(bytes[leaf], 0);
    bytes[leaf + 1..leaf + 5].copy_from_slice(&99_u32.to_le_bytes());

    assert!(matches!(
        model_store::decode(&bytes[..], "label.model"),
        Err(SpamError::CorruptModel { .. }),
    ));

    bytes[leaf] = 7;
    assert!(matches!(
        model_store::decode(&bytes[..], "tag.model"),
        Err(SpamError::CorruptModel { .. }),
    ));
}


/// A one-tree header with the given `max_depth`, 9 features and 2 classes.
fn header(max_depth: u32) -> Vec<u8> {
    let mut bytes = MAGIC.to_vec();
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    for value in [1_u32, 3, max_depth, 2] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes.extend_from_slice(&42_u64.to_le_bytes());
    bytes.extend_from_slice(&9_u32.to_le_bytes());
    bytes.extend_from_slice(&2_u32.to_le_bytes());
    bytes.push(0);
    bytes
}


fn push_branches(bytes: &mut Vec<u8>, n_branch: usize) {
    for _ in 0..n_branch {
        bytes.push(1);
        bytes.extend_from_slice(&0_u32.to_le_bytes());
        bytes.extend_from_slice(&0.5_f64.to_bits().to_le_bytes());
    }
}


#[test]
fn huge_max_depth_is_corrupt() {
    let mut bytes = header(u32::MAX);
    push_branches(&mut bytes, 100_000);

    match model_store::decode(&bytes[..], "deep.model") {
        Err(SpamError::CorruptModel { reason, .. }) => {
            assert!(reason.contains("max_depth"), "{reason}");
        },
        other => panic!("expected a corrupt model, got {other:?}"),
    }
}


#[test]
fn trees_deeper_than_declared_are_corrupt() {
    let mut bytes = header(MAX_TREE_DEPTH as u32);
    push_branches(&mut bytes, MAX_TREE_DEPTH + 1);

    assert!(matches!(
        model_store::decode(&bytes[..], "chain.model"),
        Err(SpamError::CorruptModel { .. }),
    ));

    let mut bytes = header(4);
    push_branches(&mut bytes, 5);
    assert!(matches!(
        model_store::decode(&bytes[..], "shallow.model"),
        Err(SpamError::CorruptModel { .. }),
    ));
}


#[test]
fn class_count_must_be_two() {
    let mut bytes = Vec::new();
    model_store::encode(&model(), &mut bytes).unwrap();
    // magic, version, five u32 fields and the seed precede n_classes
    let at = 8 + 2 + 4 * 5 + 8;
    assert_eq!(bytes[at..at + 4], 2_u32.to_le_bytes());
    bytes[at..at + 4].copy_from_slice(&u32::MAX.to_le_bytes());

    assert!(matches!(
        model_store::decode(&bytes[..], "classes.model"),
        Err(SpamError::CorruptModel { .. }),
    ));
}


#[test]
fn depth_limit_applies_to_training() {
    let train = dataset(20, 3);
    assert!(matches!(
        RandomForestBuilder::new(&train).max_depth(MAX_TREE_DEPTH + 1).build(),
        Err(SpamError::InvalidParameter(_)),
    ));

    let tree = DecisionTreeBuilder::new(&train)
        .max_depth(usize::MAX)
        .build();
    assert_eq!(tree.max_depth(), MAX_TREE_DEPTH);
}


#[test]
fn json_dump_predicts_the_same() {
    let model = model();
    let json = serde_json::to_string(&model).unwrap();
    let loaded: RandomForestClassifier = serde_json::from_str(&json).unwrap();

    assert_eq!(loaded.hyperparameters(), model.hyperparameters());
    assert_eq!(loaded.trees().len(), model.trees().len());
    let test = dataset(200, 1);
    assert_eq!(
        loaded.predict_batch(&test).unwrap(),
        model.predict_batch(&test).unwrap(),
    );
}
