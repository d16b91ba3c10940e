//! Unit tests for the tour representation and its length cache.

use lateral_tsp::error::TourError;
use lateral_tsp::length_map::LengthMap;
use lateral_tsp::problem::Problem;
use lateral_tsp::tour::Tour;
use lateral_tsp::PointId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

/// Creates a 10 x 10 square with corners numbered counter-clockwise.
fn create_square_problem() -> Problem {
    Problem::from_points(
        "Square",
        &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
    )
}

fn create_tour(problem: &Problem, order: &[PointId]) -> Tour {
    Tour::new(order, &problem.x, &problem.y).unwrap()
}

/// The undirected edges of the cycle visiting `order`.
fn edge_set(order: &[PointId]) -> BTreeSet<(PointId, PointId)> {
    (0..order.len())
        .map(|k| {
            let (a, b) = (order[k], order[(k + 1) % order.len()]);
            (a.min(b), a.max(b))
        })
        .collect()
}

#[test]
fn test_new_tour_keeps_initial_edges() {
    let problem = create_square_problem();
    let tour = create_tour(&problem, &[0, 2, 1, 3]);

    let order = tour.order().unwrap();
    assert_eq!(order[0], 0);
    assert_eq!(order.len(), 4);
    assert_eq!(edge_set(&order), edge_set(&[0, 2, 1, 3]));
    tour.check_invariants().unwrap();
}

#[test]
fn test_lengths_match_coordinates() {
    let problem = create_square_problem();
    let tour = create_tour(&problem, &[0, 1, 2, 3]);

    assert_eq!(tour.length(), 40);
    for i in 0..4 {
        assert_eq!(tour.edge_length(i), 10);
    }

    let crossed = create_tour(&problem, &[0, 2, 1, 3]);
    // Diagonals of 14.14 round down to 14.
    assert_eq!(crossed.length(), 48);
}

#[test]
fn test_next_and_prev_are_inverse() {
    let problem = Problem::random(25, 100.0, 3);
    let tour = create_tour(&problem, &problem.shuffled_tour(11));

    for i in 0..25 {
        let prev = tour.prev(i).unwrap();
        assert_eq!(tour.next(prev), i);
        assert_eq!(tour.prev(tour.next(i)).unwrap(), i);
        assert!(tour.neighbors(i).contains(&prev));
        assert!(tour.neighbors(i).contains(&tour.next(i)));
    }
}

#[test]
fn test_order_is_a_permutation_and_length_matches() {
    let problem = Problem::random(40, 1000.0, 5);
    let tour = create_tour(&problem, &problem.shuffled_tour(1));

    let order = tour.order().unwrap();
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..40).collect::<Vec<_>>());
    assert_eq!(tour.length(), problem.tour_length(&order));
}

#[test]
fn test_move_uncrosses_square() {
    let problem = create_square_problem();
    let mut tour = create_tour(&problem, &[0, 2, 1, 3]);

    // Remove the two diagonals (0, 2) and (1, 3).
    let a = if tour.next(0) == 2 { 0 } else { 2 };
    let b = if tour.next(1) == 3 { 1 } else { 3 };
    assert!(tour.next(a) != b && tour.next(b) != a);
    tour.apply_move(a, b).unwrap();

    tour.check_invariants().unwrap();
    assert_eq!(tour.length(), 40);
    assert_eq!(edge_set(&tour.order().unwrap()), edge_set(&[0, 1, 2, 3]));
}

#[test]
fn test_random_moves_preserve_invariants() {
    let problem = Problem::random(30, 1000.0, 9);
    let mut tour = create_tour(&problem, &problem.shuffled_tour(2));
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    let mut applied = 0;
    while applied < 200 {
        let a = rng.gen_range(0..30);
        let b = rng.gen_range(0..30);
        if a == b || tour.next(a) == b || tour.next(b) == a {
            continue;
        }

        let (next_a, next_b) = (tour.next(a), tour.next(b));
        let lengths = tour.length_map();
        let expected = tour.length() - tour.edge_length(a) - tour.edge_length(b)
            + lengths.compute_length(a, b)
            + lengths.compute_length(next_a, next_b);

        tour.apply_move(a, b).unwrap();
        applied += 1;

        tour.check_invariants().unwrap();
        assert_eq!(tour.length(), expected);
        assert_eq!(tour.length_map().edge_count(), 30);
        assert_eq!(tour.length(), problem.tour_length(&tour.order().unwrap()));
        for i in 0..30 {
            let neighbors = tour.neighbors(i);
            assert_ne!(neighbors[0], neighbors[1]);
            assert!(!neighbors.contains(&i));
        }
    }
}

#[test]
fn test_clone_is_independent() {
    let problem = Problem::random(20, 500.0, 4);
    let original = create_tour(&problem, &problem.shuffled_tour(8));
    let original_order = original.order().unwrap();
    let original_length = original.length();

    let mut copy = original.clone();
    assert_eq!(copy.order().unwrap(), original_order);
    assert_eq!(copy.length(), original_length);

    let a = 0;
    let b = copy.next(copy.next(copy.next(a)));
    copy.apply_move(a, b).unwrap();

    assert_ne!(edge_set(&copy.order().unwrap()), edge_set(&original_order));
    assert_eq!(original.order().unwrap(), original_order);
    assert_eq!(original.length(), original_length);
    original.check_invariants().unwrap();
}

#[test]
fn test_invalid_orderings_are_rejected() {
    let problem = create_square_problem();

    let repeated = Tour::new(&[0, 1, 1, 3], &problem.x, &problem.y);
    assert!(matches!(repeated, Err(TourError::InvalidOrder(_))));

    let out_of_range = Tour::new(&[0, 1, 2, 7], &problem.x, &problem.y);
    assert!(matches!(out_of_range, Err(TourError::InvalidOrder(_))));

    let too_short = Tour::new(&[0, 1, 2], &problem.x, &problem.y);
    assert!(matches!(too_short, Err(TourError::InvalidOrder(_))));

    let two_points = Tour::new(&[0, 1], &[0.0, 1.0], &[0.0, 0.0]);
    assert!(matches!(two_points, Err(TourError::InvalidOrder(_))));

    let mismatched = Tour::new(&[0, 1, 2, 3], &problem.x, &problem.y[..3]);
    assert!(matches!(mismatched, Err(TourError::InvalidOrder(_))));
}

#[test]
fn test_triangle_is_a_valid_tour() {
    let tour = Tour::new(&[2, 0, 1], &[0.0, 3.0, 0.0], &[0.0, 0.0, 4.0]).unwrap();
    tour.check_invariants().unwrap();
    assert_eq!(tour.length(), 12);
    assert_eq!(tour.order().unwrap().len(), 3);
}

#[test]
fn test_length_map_insert_and_erase() {
    let problem = create_square_problem();
    let mut lengths = LengthMap::new(&[0, 1, 2, 3], &problem.x, &problem.y);

    assert_eq!(lengths.edge_count(), 4);
    assert_eq!(lengths.get(0, 2), None);

    lengths.insert(2, 0);
    assert_eq!(lengths.length(0, 2), 14);
    assert_eq!(lengths.edge_count(), 5);

    lengths.erase(0, 1);
    assert_eq!(lengths.get(1, 0), None);
    assert_eq!(lengths.edge_count(), 4);

    // Geometry is available for any pair, cached or not.
    assert_eq!(lengths.compute_length(1, 3), 14);
    assert_eq!(lengths.point_count(), 4);
}
