use spamforest::{Dataset, DatasetReader, SpamError};
use spamforest::feature::{FeatureVector, FEATURE_NAMES, TARGET_NAME};

use std::io::Cursor;


fn vector(seed: u64, is_spam: usize) -> FeatureVector {
    FeatureVector {
        association: seed % 5,
        contributions: seed * 13,
        repos: seed % 7,
        age: seed * 31,
        followers: seed * 2,
        following: seed + 1,
        body_len: 100 + seed,
        title_len: 10 + seed % 4,
        sim_score: seed * 40,
        is_spam,
    }
}


fn sample() -> Dataset {
    let vectors = (0..12)
        .map(|i| vector(i, (i % 3 == 0) as usize))
        .collect::<Vec<_>>();
    Dataset::from_vectors(&vectors).unwrap()
}


#[test]
fn header_is_the_feature_names() {
    let dataset = sample();
    let mut expected = FEATURE_NAMES.to_vec();
    expected.push(TARGET_NAME);

    assert_eq!(dataset.header(), expected);
    assert_eq!(dataset.shape(), (12, 9));
}


#[test]
fn csv_round_trip() {
    let dataset = sample();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cli-cli.csv");

    dataset.write_csv(&path).unwrap();
    let read = Dataset::read_csv(&path).unwrap();

    assert_eq!(read, dataset);
    assert_eq!(read.vectors().unwrap(), dataset.vectors().unwrap());
}


#[test]
fn written_csv_is_plain_integers() {
    let vectors = [vector(1, 1), vector(2, 0)];
    let dataset = Dataset::from_vectors(&vectors).unwrap();

    let mut buf = Vec::new();
    dataset.to_writer(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert_eq!(
        text,
        "association,contributions,repos,age,followers,following,\
         body_len,title_len,sim_score,is_spam\n\
         1,13,1,31,2,2,101,11,40,1\n\
         2,26,2,62,4,3,102,12,80,0\n"
    );
}


#[test]
fn target_column_may_be_anywhere() {
    let text = "label,x,y\n1,10,20\n0,11,21\n\n1,12,22\n";
    let dataset = Dataset::from_reader(Cursor::new(text), "label").unwrap();

    assert_eq!(dataset.feature_names(), ["x", "y"]);
    assert_eq!(dataset.target(), [1, 0, 1]);
    assert_eq!(dataset.row(2), [12, 22]);
}


#[test]
fn reader_builder_selects_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "a,b,spam\n1,2,1\n3,4,0\n").unwrap();

    let dataset = DatasetReader::default()
        .file(&path)
        .target_feature("spam")
        .read()
        .unwrap();
    assert_eq!(dataset.target_name(), "spam");
    assert_eq!(dataset.label_counts(), [1, 1]);
}


#[test]
fn malformed_rows_report_their_line() {
    let text = "x,is_spam\n1,0\n2,oops\n";
    match Dataset::from_reader(Cursor::new(text), "is_spam") {
        Err(SpamError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a parse error, got {other:?}"),
    }

    let text = "x,y,is_spam\n1,2,0\n1,0\n";
    match Dataset::from_reader(Cursor::new(text), "is_spam") {
        Err(SpamError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a parse error, got {other:?}"),
    }

    let text = "x,y\n1,2\n";
    assert!(matches!(
        Dataset::from_reader(Cursor::new(text), "is_spam"),
        Err(SpamError::Parse { line: 1, .. }),
    ));
}


#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = Dataset::read_csv(dir.path().join("nope.csv"));
    assert!(matches!(result, Err(SpamError::NotFound { .. })));
}


#[test]
fn rows_must_match_the_header() {
    let mut dataset = Dataset::default();
    let result = dataset.push(vec![1, 2, 3], 0);
    assert!(matches!(
        result,
        Err(SpamError::InvalidFeatureVector { expected: 9, found: 3 }),
    ));
    assert!(dataset.is_empty());
}


#[test]
fn train_test_split_partitions_the_rows() {
    let dataset = sample();
    let (train, test) = dataset.train_test_split(0.25, 42).unwrap();

    assert_eq!(test.len(), 3);
    assert_eq!(train.len(), 9);

    let mut rows = train.iter()
        .chain(test.iter())
        .map(|(x, y)| (x.to_vec(), y))
        .collect::<Vec<_>>();
    let mut expected = dataset.iter()
        .map(|(x, y)| (x.to_vec(), y))
        .collect::<Vec<_>>();
    rows.sort();
    expected.sort();
    assert_eq!(rows, expected);

    let again = dataset.train_test_split(0.25, 42).unwrap();
    assert_eq!(again, (train, test));
}


#[test]
fn train_test_split_rejects_bad_ratios() {
    let dataset = sample();
    assert!(dataset.train_test_split(0.0, 1).is_err());
    assert!(dataset.train_test_split(1.0, 1).is_err());

    let one = Dataset::from_vectors(&[vector(0, 1)]).unwrap();
    assert!(one.train_test_split(0.5, 1).is_err());
}


#[test]
fn dataframe_round_trip() {
    let dataset = sample();
    let df = dataset.to_dataframe().unwrap();
    assert_eq!(df.shape(), (12, 10));

    let back = Dataset::from_dataframe(&df, TARGET_NAME).unwrap();
    assert_eq!(back, dataset);
}


#[test]
fn label_statistics() {
    let dataset = sample();
    assert_eq!(dataset.n_classes(), 2);
    assert_eq!(dataset.label_counts(), [8, 4]);
    assert_eq!(dataset.distinct_labels(), [(0, 8), (1, 4)]);
}


#[test]
fn labels_other_than_zero_and_one_are_rejected() {
    let text = "x,is_spam\n1,0\n2,2\n";
    match Dataset::from_reader(Cursor::new(text), "is_spam") {
        Err(SpamError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a parse error, got {other:?}"),
    }

    let text = "x,is_spam\n1,1\n2,0\n3,18446744073709551615\n";
    match Dataset::from_reader(Cursor::new(text), "is_spam") {
        Err(SpamError::Parse { line, .. }) => assert_eq!(line, 4),
        other => panic!("expected a parse error, got {other:?}"),
    }

    let mut dataset = Dataset::new(["x"], "is_spam");
    assert!(matches!(
        dataset.push(vec![1], 7),
        Err(SpamError::InvalidLabel { label: 7 }),
    ));
    assert!(dataset.is_empty());
    assert_eq!(dataset.n_classes(), 2);
}


#[test]
fn push_vector_checks_the_columns_and_the_label() {
    let mut narrow = Dataset::new(["x"], "is_spam");
    assert!(matches!(
        narrow.push_vector(&vector(1, 0)),
        Err(SpamError::InvalidFeatureVector { expected: 1, found: 9 }),
    ));
    assert!(narrow.is_empty());

    assert!(matches!(
        Dataset::from_vectors(&[vector(1, 0), vector(2, 3)]),
        Err(SpamError::InvalidLabel { label: 3 }),
    ));
}
