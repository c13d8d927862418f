use rand::prelude::*;

use spamforest::prelude::*;
use spamforest::tree::Node;


// Toy example (o/x are the spam/legitimate rows)
//
// 15|                     |
//   |                   5 |
//   |                  x  |
//   |                     |         6
//   |                     |        x
// 10|       4             |________________________ 9.5
//   |      x              |             1
//   |                     |            o
//   |                     |
//   |                     |   0
//  5|                     |  o
//   |                     |                 2
//   |                     |                o
//   |            3        |
//   |           x         |
//   |_____________________|____________________
//  0            5         | 10            15
//                         |
//                        9.0
fn toy() -> Dataset {
    let xs = [[10, 5], [14, 8], [15, 3], [5, 1], [3, 9], [8, 13], [12, 11]];
    let ys = [1, 1, 1, 0, 0, 0, 0];

    let mut dataset = Dataset::new(["x", "y"], "class");
    for (x, y) in xs.into_iter().zip(ys) {
        dataset.push(x.to_vec(), y).unwrap();
    }
    dataset
}


fn all_rows(dataset: &Dataset) -> Vec<usize> {
    (0..dataset.len()).collect()
}


#[test]
fn fits_the_toy_example() {
    let dataset = toy();
    let tree = DecisionTreeBuilder::new(&dataset).build();

    let mut rng = StdRng::seed_from_u64(0);
    let f = tree.fit(&dataset, &all_rows(&dataset), &mut rng).unwrap();

    assert_eq!(f.predict_all(&dataset), dataset.target());
    assert_eq!(f.n_feature(), 2);
    assert_eq!(f.n_nodes(), 2 * f.n_leaves() - 1);
    assert!(f.depth() >= 2);
}


#[test]
fn split_goes_left_on_equal_values() {
    let mut dataset = Dataset::new(["x"], "is_spam");
    for (x, y) in [(1, 1), (2, 1), (5, 0), (6, 0)] {
        dataset.push(vec![x], y).unwrap();
    }
    let tree = DecisionTreeBuilder::new(&dataset).build();
    let mut rng = StdRng::seed_from_u64(1);
    let f = tree.fit(&dataset, &all_rows(&dataset), &mut rng).unwrap();

    match f.root() {
        Node::Branch { splitter, .. } => {
            assert_eq!(splitter.feature, 0);
            assert_eq!(splitter.threshold, 3.5);
        },
        leaf => panic!("expected a branch, got {leaf:?}"),
    }
    assert_eq!(f.predict(&[3]), 1);
    assert_eq!(f.predict(&[4]), 0);
}


#[test]
fn identical_rows_give_a_single_leaf() {
    let mut dataset = Dataset::new(["a", "b"], "is_spam");
    for y in [0, 1, 1, 0, 1] {
        dataset.push(vec![7, 7], y).unwrap();
    }
    let tree = DecisionTreeBuilder::new(&dataset).build();
    let mut rng = StdRng::seed_from_u64(2);
    let f = tree.fit(&dataset, &all_rows(&dataset), &mut rng).unwrap();

    assert!(f.root().is_leaf());
    assert_eq!(f.predict(&[7, 7]), 1);
}


#[test]
fn ties_go_to_label_zero() {
    let mut dataset = Dataset::new(["a"], "is_spam");
    dataset.push(vec![1], 1).unwrap();
    dataset.push(vec![1], 0).unwrap();

    let tree = DecisionTreeBuilder::new(&dataset).build();
    let mut rng = StdRng::seed_from_u64(3);
    let f = tree.fit(&dataset, &all_rows(&dataset), &mut rng).unwrap();

    assert_eq!(f.root(), &Node::leaf(0, vec![1, 1]));
}


#[test]
fn zero_rows_is_an_error() {
    let dataset = toy();
    let tree = DecisionTreeBuilder::new(&dataset).build();
    let mut rng = StdRng::seed_from_u64(4);

    assert!(matches!(
        tree.fit(&dataset, &[], &mut rng),
        Err(SpamError::EmptyTrainingSet),
    ));
}


#[test]
fn depth_is_bounded() {
    let dataset = toy();
    let mut rng = StdRng::seed_from_u64(5);

    let stump = DecisionTreeBuilder::new(&dataset)
        .max_depth(1)
        .build()
        .fit(&dataset, &all_rows(&dataset), &mut rng)
        .unwrap();
    assert_eq!(stump.depth(), 1);
    assert_eq!(stump.n_leaves(), 2);

    let leaf = DecisionTreeBuilder::new(&dataset)
        .max_depth(0)
        .build()
        .fit(&dataset, &all_rows(&dataset), &mut rng)
        .unwrap();
    assert_eq!(leaf.n_nodes(), 1);
    assert_eq!(leaf.predict(&[0, 0]), 0);
}


#[test]
fn small_nodes_become_leaves() {
    let dataset = toy();
    let mut rng = StdRng::seed_from_u64(6);
    let f = DecisionTreeBuilder::new(&dataset)
        .min_leaf_size(8)
        .build()
        .fit(&dataset, &all_rows(&dataset), &mut rng)
        .unwrap();
    assert!(f.root().is_leaf());
}


#[test]
fn repeated_indices_weigh_rows() {
    let mut dataset = Dataset::new(["a"], "is_spam");
    dataset.push(vec![1], 1).unwrap();
    dataset.push(vec![1], 0).unwrap();

    let tree = DecisionTreeBuilder::new(&dataset).build();
    let mut rng = StdRng::seed_from_u64(7);
    let f = tree.fit(&dataset, &[0, 0, 1], &mut rng).unwrap();

    assert_eq!(f.predict(&[1]), 1);
}


#[test]
fn dot_export() {
    let dataset = toy();
    let mut rng = StdRng::seed_from_u64(8);
    let f = DecisionTreeBuilder::new(&dataset)
        .build()
        .fit(&dataset, &all_rows(&dataset), &mut rng)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.dot");
    f.to_dot_file(&path, dataset.feature_names()).unwrap();

    let dot = std::fs::read_to_string(&path).unwrap();
    assert!(dot.starts_with("graph DecisionTree {"));
    assert!(dot.contains("node_0"));
    assert_eq!(dot.matches("shape = box").count(), f.n_leaves());
}
