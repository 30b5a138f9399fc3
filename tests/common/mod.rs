#![allow(dead_code)]
use emst::{Edge, Emst, EmstAlgorithm, EmstError, EmstParams, SpanningTree, SpatialIndexKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub(crate) type ComputeFn = fn(&Emst<f64>) -> Result<SpanningTree<f64>, EmstError>;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn random_points(n_samples: usize, n_dims: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_samples)
        .map(|_| (0..n_dims).map(|_| rng.gen_range(-100.0..100.0)).collect())
        .collect()
}

/// Checks that the edges form a spanning tree: N-1 edges, ordered endpoints, ascending
/// weights, and no edge joining two already connected points.
pub(crate) fn assert_spanning_tree(n_samples: usize, tree: &SpanningTree<f64>) {
    assert_eq!(n_samples - 1, tree.len());
    let mut component: Vec<usize> = (0..n_samples).collect();
    let mut previous_weight = f64::NEG_INFINITY;
    for edge in tree.edges() {
        assert!(edge.point_a < edge.point_b);
        assert!(edge.weight >= previous_weight);
        previous_weight = edge.weight;

        let (from, to) = (component[edge.point_a], component[edge.point_b]);
        assert_ne!(from, to, "edge {edge:?} closes a cycle");
        component.iter_mut().filter(|c| **c == from).for_each(|c| *c = to);
    }
    assert!(component.iter().all(|&c| c == component[0]));
}

fn rows(tree: &SpanningTree<f64>) -> Vec<(usize, usize, f64)> {
    tree.edges().iter().map(Edge::as_row).collect()
}

pub(crate) fn test_scenario(compute_fn: ComputeFn) {
    init_logging();
    let data = vec![
        vec![0.0, 0.0],
        vec![1.0, 1.0],
        vec![3.0, 3.0],
        vec![0.5, 0.0],
        vec![1000.0, 0.0],
        vec![1001.0, 0.0],
    ];
    let expected = [
        (0, 3, 0.5),
        (4, 5, 1.0),
        (1, 3, 1.25_f64.sqrt()),
        (1, 2, 8.0_f64.sqrt()),
        (2, 4, 994018.0_f64.sqrt()),
    ];
    for use_naive in [true, false] {
        let params = EmstParams::builder().use_naive(use_naive).build();
        let tree = compute_fn(&Emst::new(&data, params)).unwrap();
        assert_edges_close(&expected, &tree);
        assert!((tree.total_weight() - 1002.450975).abs() < 1e-6);
    }
}

/// Compares endpoints exactly and weights to a relative tolerance.
fn assert_edges_close(expected: &[(usize, usize, f64)], tree: &SpanningTree<f64>) {
    assert_eq!(expected.len(), tree.len());
    for (&(a, b, weight), edge) in expected.iter().zip(tree.edges()) {
        assert_eq!((a, b), (edge.point_a, edge.point_b));
        assert!(
            (edge.weight - weight).abs() <= 1e-12 * weight,
            "{edge:?} != {weight}"
        );
    }
}

pub(crate) fn test_two_points(compute_fn: ComputeFn) {
    init_logging();
    let data = vec![vec![-1.0, 2.0], vec![2.0, 6.0]];
    for use_naive in [true, false] {
        let params = EmstParams::builder().use_naive(use_naive).build();
        let tree = compute_fn(&Emst::new(&data, params)).unwrap();
        assert_eq!(vec![(0, 1, 5.0)], rows(&tree));
    }
}

pub(crate) fn test_duplicate_points(compute_fn: ComputeFn) {
    init_logging();
    let distinct = [vec![0.0, 0.0], vec![4.0, 1.0], vec![-2.0, 7.5]];
    let data: Vec<Vec<f64>> = (0..90).map(|i| distinct[i % 3].clone()).collect();
    for use_naive in [true, false] {
        let params = EmstParams::builder().use_naive(use_naive).build();
        let tree = compute_fn(&Emst::new(&data, params)).unwrap();
        assert_spanning_tree(data.len(), &tree);
        let n_zero = tree.edges().iter().filter(|e| e.weight == 0.0).count();
        assert_eq!(87, n_zero);
        assert!(tree.edges()[..87].iter().all(|e| e.weight == 0.0));
        assert!(tree.edges()[87..].iter().all(|e| e.weight > 0.0));
    }
}

pub(crate) fn test_all_points_coincident(compute_fn: ComputeFn) {
    init_logging();
    let data = vec![vec![3.0, 3.0, 3.0]; 70];
    let tree = compute_fn(&Emst::default_params(&data)).unwrap();
    assert_spanning_tree(data.len(), &tree);
    assert_eq!(0.0, tree.total_weight());
}

pub(crate) fn test_dual_tree_matches_naive(compute_fn: ComputeFn) {
    init_logging();
    for (seed, n_samples, n_dims) in [(1, 200, 2), (2, 150, 3), (3, 120, 5), (4, 33, 1)] {
        let data = random_points(n_samples, n_dims, seed);
        let naive_params = EmstParams::builder().use_naive(true).build();
        let naive = compute_fn(&Emst::new(&data, naive_params)).unwrap();
        assert_spanning_tree(n_samples, &naive);

        for index in [SpatialIndexKind::KdTree, SpatialIndexKind::BallTree] {
            for leaf_size in [1, 2, 7, 40] {
                let params = EmstParams::builder()
                    .algorithm(EmstAlgorithm::DualTreeBoruvka)
                    .index(index)
                    .leaf_size(leaf_size)
                    .build();
                let dual_tree = compute_fn(&Emst::new(&data, params)).unwrap();
                assert_eq!(naive.edges(), dual_tree.edges(), "{index:?}, leaf size {leaf_size}");
            }
        }
    }
}

pub(crate) fn test_idempotent(compute_fn: ComputeFn) {
    init_logging();
    let data = random_points(300, 3, 11);
    let emst = Emst::default_params(&data);
    let first = compute_fn(&emst).unwrap();
    let second = compute_fn(&emst).unwrap();
    assert_eq!(first, second);
}

pub(crate) fn test_grid_ties(compute_fn: ComputeFn) {
    init_logging();
    // Every edge of a unit grid has the same length, so the result depends on tie-breaking
    let data: Vec<Vec<f64>> = (0..12)
        .flat_map(|x| (0..12).map(move |y| vec![x as f64, y as f64]))
        .collect();
    let naive_params = EmstParams::builder().use_naive(true).build();
    let naive = compute_fn(&Emst::new(&data, naive_params)).unwrap();
    let dual_tree_params = EmstParams::builder().use_naive(false).leaf_size(3).build();
    let dual_tree = compute_fn(&Emst::new(&data, dual_tree_params)).unwrap();
    assert_spanning_tree(data.len(), &dual_tree);
    assert_eq!(naive.edges(), dual_tree.edges());
    assert_eq!(143.0, dual_tree.total_weight());
}

pub(crate) fn test_huge_coordinates(compute_fn: ComputeFn) {
    init_logging();
    let data = vec![vec![0.0], vec![1e200], vec![3e200]];
    for use_naive in [true, false] {
        let params = EmstParams::builder().use_naive(use_naive).build();
        let tree = compute_fn(&Emst::new(&data, params)).unwrap();
        assert_edges_close(&[(0, 1, 1e200), (1, 2, 2e200)], &tree);
    }

    let data = vec![vec![1e300, -1e300], vec![-1e300, 1e300], vec![1e300, 1e300]];
    let tree = compute_fn(&Emst::default_params(&data)).unwrap();
    assert_edges_close(&[(0, 2, 2e300), (1, 2, 2e300)], &tree);
}

pub(crate) fn test_tiny_coordinates(compute_fn: ComputeFn) {
    init_logging();
    let data = vec![vec![0.0], vec![1e-200], vec![3e-200]];
    for use_naive in [true, false] {
        let params = EmstParams::builder().use_naive(use_naive).build();
        let tree = compute_fn(&Emst::new(&data, params)).unwrap();
        assert_edges_close(&[(0, 1, 1e-200), (1, 2, 2e-200)], &tree);
    }

    // Mixed magnitudes: a tight cluster far from the origin
    let mut data = random_points(60, 2, 17);
    for point in data.iter_mut() {
        point.iter_mut().for_each(|x| *x *= 1e-250);
    }
    data.push(vec![1e150, 1e150]);
    let naive = compute_fn(&Emst::new(&data, EmstParams::builder().use_naive(true).build()));
    let dual_tree_params = EmstParams::builder()
        .algorithm(EmstAlgorithm::DualTreeBoruvka)
        .leaf_size(2)
        .build();
    let dual_tree = compute_fn(&Emst::new(&data, dual_tree_params));
    let (naive, dual_tree) = (naive.unwrap(), dual_tree.unwrap());
    assert_spanning_tree(data.len(), &dual_tree);
    assert_eq!(naive.edges(), dual_tree.edges());
    assert!(dual_tree.edges().iter().all(|e| e.weight > 0.0));
}

pub(crate) fn test_coordinate_range_overflow(compute_fn: ComputeFn) {
    init_logging();
    let data = vec![vec![-1e308], vec![1e308]];
    let result = compute_fn(&Emst::default_params(&data));
    assert!(matches!(result, Err(EmstError::CoordinateRangeTooLarge(..))));
}

pub(crate) fn test_too_few_points(compute_fn: ComputeFn) {
    init_logging();
    let empty: Vec<Vec<f64>> = Vec::new();
    let result = compute_fn(&Emst::default_params(&empty));
    assert!(matches!(result, Err(EmstError::TooFewPoints(0))));
    let single = vec![vec![1.0, 1.0]];
    let result = compute_fn(&Emst::default_params(&single));
    assert!(matches!(result, Err(EmstError::TooFewPoints(1))));
}

pub(crate) fn test_mismatched_dimensions(compute_fn: ComputeFn) {
    init_logging();
    let data = vec![vec![1.5, 2.2], vec![1.0, 1.1], vec![1.2]];
    let result = compute_fn(&Emst::default_params(&data));
    assert!(matches!(result, Err(EmstError::WrongDimension(..))));
}

pub(crate) fn test_non_finite_coordinate(compute_fn: ComputeFn) {
    init_logging();
    for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let data = vec![vec![1.5, 2.2], vec![1.0, bad]];
        let result = compute_fn(&Emst::default_params(&data));
        assert!(matches!(result, Err(EmstError::NonFiniteCoordinate(..))));
    }
}

/// The shortest edge at every point of a minimum spanning tree connects it to its nearest
/// neighbour. Checked against an independent kd-tree implementation.
pub(crate) fn test_nearest_neighbour_edges(compute_fn: ComputeFn) {
    init_logging();
    let data = random_points(400, 3, 7);
    let tree = compute_fn(&Emst::default_params(&data)).unwrap();

    let mut shortest = vec![f64::INFINITY; data.len()];
    for edge in tree.edges() {
        shortest[edge.point_a] = shortest[edge.point_a].min(edge.weight);
        shortest[edge.point_b] = shortest[edge.point_b].min(edge.weight);
    }

    let mut oracle = kdtree::KdTree::new(3);
    for (idx, point) in data.iter().enumerate() {
        oracle.add(point, idx).unwrap();
    }
    for (idx, point) in data.iter().enumerate() {
        let nearest = oracle
            .nearest(point, 2, &kdtree::distance::squared_euclidean)
            .unwrap();
        let (squared, neighbour) = nearest
            .into_iter()
            .find(|&(_, &other)| other != idx)
            .unwrap();
        assert_ne!(idx, *neighbour);
        let expected = squared.sqrt();
        assert!(
            (shortest[idx] - expected).abs() <= 1e-12 * expected.max(1.0),
            "point {idx}: {} != {expected}",
            shortest[idx]
        );
    }
}
