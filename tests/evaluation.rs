use spamforest::prelude::*;


fn dataset(labels: &[usize]) -> Dataset {
    let mut dataset = Dataset::new(["x"], "is_spam");
    for (i, &y) in labels.iter().enumerate() {
        dataset.push(vec![i as u64], y).unwrap();
    }
    dataset
}


#[test]
fn cells_count_pairs() {
    let data = dataset(&[0, 0, 1, 1, 1, 0]);
    let predictions = [0, 1, 1, 1, 0, 0];
    let matrix = ConfusionMatrix::new(&data, &predictions).unwrap();

    assert_eq!(matrix.n_classes(), 2);
    assert_eq!(matrix.get(0, 0), 2);
    assert_eq!(matrix.get(0, 1), 1);
    assert_eq!(matrix.get(1, 0), 1);
    assert_eq!(matrix.get(1, 1), 2);
    assert_eq!(matrix.get(5, 5), 0);
    assert_eq!(matrix.total(), data.len());
}


#[test]
fn summary_statistics() {
    let data = dataset(&[0, 0, 0, 0, 1, 1, 1, 1, 1, 1]);
    let predictions = [0, 0, 0, 1, 1, 1, 1, 1, 0, 0];
    let summary = ConfusionMatrix::new(&data, &predictions)
        .unwrap()
        .summary();

    assert!((summary.accuracy - 0.7).abs() < 1e-12);
    // class 1: tp = 4, fp = 1, fn = 2
    assert!((summary.precision(1) - 0.8).abs() < 1e-12);
    assert!((summary.recall(1) - 4.0 / 6.0).abs() < 1e-12);
    let f1 = 2.0 * 0.8 * (4.0 / 6.0) / (0.8 + 4.0 / 6.0);
    assert!((summary.f1(1) - f1).abs() < 1e-12);
    // class 0: tp = 3, fp = 2, fn = 1
    assert!((summary.precision(0) - 0.6).abs() < 1e-12);
    assert!((summary.recall(0) - 0.75).abs() < 1e-12);

    let c = &summary.classes[1];
    assert_eq!(
        (c.true_positives, c.false_positives, c.true_negatives),
        (4, 1, 3),
    );
}


#[test]
fn zero_count_class_gives_zero() {
    let data = dataset(&[0, 0, 0]);
    let summary = ConfusionMatrix::new(&data, &[0, 0, 0])
        .unwrap()
        .summary();

    assert_eq!(summary.accuracy, 1.0);
    assert_eq!(summary.precision(1), 0.0);
    assert_eq!(summary.recall(1), 0.0);
    assert_eq!(summary.f1(1), 0.0);
    assert_eq!(summary.precision(0), 1.0);
}


#[test]
fn length_mismatch_is_an_error() {
    let data = dataset(&[0, 1, 1]);
    assert!(matches!(
        ConfusionMatrix::new(&data, &[0, 1]),
        Err(SpamError::LengthMismatch { expected: 3, found: 2 }),
    ));
}


#[test]
fn empty_inputs() {
    let data = dataset(&[]);
    let matrix = ConfusionMatrix::new(&data, &[]).unwrap();
    assert_eq!(matrix.total(), 0);
    assert_eq!(matrix.summary().accuracy, 0.0);
}


#[test]
fn display_is_a_table() {
    let data = dataset(&[0, 1]);
    let matrix = ConfusionMatrix::new(&data, &[0, 0]).unwrap();
    let table = matrix.summary().to_string();

    assert!(table.starts_with("Reference Class"));
    assert!(table.contains("F1 Score"));
    assert!(table.ends_with("Overall accuracy: 0.5000"));
    assert_eq!(table.lines().count(), 5);
}


#[test]
fn non_binary_labels_are_rejected() {
    assert!(matches!(
        ConfusionMatrix::from_labels(&[0, 1], &[1, 7]),
        Err(SpamError::InvalidLabel { label: 7 }),
    ));
    assert!(matches!(
        ConfusionMatrix::from_labels(&[usize::MAX], &[0]),
        Err(SpamError::InvalidLabel { .. }),
    ));
}
