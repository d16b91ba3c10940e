//! Unit tests for the 2-opt scan and hill climbing.

use lateral_tsp::local_search::observer::{SearchEvent, TraceObserver};
use lateral_tsp::local_search::two_opt::{compute_improvement, first_improvement};
use lateral_tsp::local_search::LocalSearch;
use lateral_tsp::problem::Problem;
use lateral_tsp::tour::Tour;
use lateral_tsp::PointId;
use std::f64::consts::PI;

/// Creates a 10 x 10 square with corners numbered counter-clockwise.
fn create_square_problem() -> Problem {
    Problem::from_points(
        "Square",
        &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
    )
}

/// Creates `n` points on a circle of radius 1000, numbered by angle.
fn create_circle_problem(n: usize) -> Problem {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|k| {
            let angle = 2.0 * PI * k as f64 / n as f64;
            (1000.0 * angle.cos(), 1000.0 * angle.sin())
        })
        .collect();
    Problem::from_points("Circle", &points)
}

fn create_tour(problem: &Problem, order: &[PointId]) -> Tour {
    Tour::new(order, &problem.x, &problem.y).unwrap()
}

#[test]
fn test_compute_improvement_on_crossed_square() {
    let problem = create_square_problem();
    let tour = create_tour(&problem, &[0, 2, 1, 3]);

    // Point of each diagonal whose successor is the other end.
    let a = if tour.next(0) == 2 { 0 } else { 2 };
    let b = if tour.next(1) == 3 { 1 } else { 3 };
    let current_length = tour.edge_length(a) + tour.edge_length(b);
    assert_eq!(current_length, 28);
    assert_eq!(compute_improvement(&tour, a, b, current_length), 8);

    // Exchanging the two sides only produces the other crossing.
    let c = tour.next(a);
    let d = tour.next(b);
    let current_length = tour.edge_length(c) + tour.edge_length(d);
    assert_eq!(compute_improvement(&tour, c, d, current_length), 0);
}

#[test]
fn test_compute_improvement_rejects_long_first_edge() {
    let problem = Problem::from_points(
        "Line",
        &[(0.0, 0.0), (1.0, 0.0), (100.0, 0.0), (101.0, 0.0)],
    );
    let tour = create_tour(&problem, &[0, 1, 2, 3]);

    // Whatever the pair, a budget of 1 is exceeded by any new edge.
    for i in 0..4 {
        let j = tour.next(tour.next(i));
        assert_eq!(compute_improvement(&tour, i, j, 1), 0);
    }
}

#[test]
fn test_crossed_square_uncrosses_in_one_move() {
    let problem = create_square_problem();
    let mut tour = create_tour(&problem, &[0, 2, 1, 3]);

    let swap = first_improvement(&tour).unwrap();
    assert!(!swap.is_empty());
    assert_eq!(swap.improvement, 8);

    let mut local_search = LocalSearch::with_observer(true, TraceObserver::new());
    assert!(local_search.hill_climb(&mut tour).unwrap());

    assert_eq!(local_search.moves_applied, 1);
    assert_eq!(tour.length(), 40);
    let order = tour.order().unwrap();
    assert!(order == vec![0, 1, 2, 3] || order == vec![0, 3, 2, 1]);
    assert_eq!(
        local_search.observer().events,
        vec![SearchEvent::HillClimbStep {
            iteration: 1,
            length: 40,
            improvement: 8
        }]
    );
}

#[test]
fn test_convex_order_is_a_local_optimum() {
    let problem = create_circle_problem(12);
    let order: Vec<PointId> = (0..12).collect();
    let mut tour = create_tour(&problem, &order);
    let initial_length = tour.length();

    assert!(first_improvement(&tour).unwrap().is_empty());

    let mut local_search = LocalSearch::silent();
    assert!(!local_search.hill_climb(&mut tour).unwrap());
    assert_eq!(local_search.moves_applied, 0);
    assert_eq!(tour.length(), initial_length);
}

#[test]
fn test_scrambled_circle_recovers_convex_order() {
    let problem = create_circle_problem(16);
    let mut tour = create_tour(&problem, &problem.shuffled_tour(21));
    let convex: Vec<PointId> = (0..16).collect();

    let mut local_search = LocalSearch::silent();
    local_search.hill_climb(&mut tour).unwrap();

    // On points in convex position every 2-opt local optimum is the hull.
    assert_eq!(tour.length(), problem.tour_length(&convex));
}

#[test]
fn test_hill_climb_reaches_local_optimum() {
    let problem = Problem::random(60, 1000.0, 12);
    let mut tour = create_tour(&problem, &problem.shuffled_tour(4));

    let mut local_search = LocalSearch::silent();
    assert!(local_search.hill_climb(&mut tour).unwrap());

    assert!(first_improvement(&tour).unwrap().is_empty());
    tour.check_invariants().unwrap();
}

#[test]
fn test_hill_climb_steps_are_exact_and_monotone() {
    let problem = Problem::random(40, 1000.0, 31);
    let mut tour = create_tour(&problem, &problem.shuffled_tour(6));
    let initial_length = tour.length();

    let mut local_search = LocalSearch::with_observer(true, TraceObserver::new());
    local_search.hill_climb(&mut tour).unwrap();
    let events = local_search.into_observer().events;
    assert!(!events.is_empty());

    let mut previous = initial_length;
    for (index, event) in events.iter().enumerate() {
        match *event {
            SearchEvent::HillClimbStep {
                iteration,
                length,
                improvement,
            } => {
                assert_eq!(iteration, index + 1);
                assert!(improvement > 0);
                assert_eq!(previous - improvement, length);
                previous = length;
            }
            ref other => panic!("unexpected event {:?}", other),
        }
    }
    assert_eq!(previous, tour.length());
}

#[test]
fn test_quiet_hill_climb_reports_nothing() {
    let problem = Problem::random(30, 1000.0, 2);
    let mut tour = create_tour(&problem, &problem.shuffled_tour(3));

    let mut local_search = LocalSearch::with_observer(false, TraceObserver::new());
    assert!(local_search.hill_climb(&mut tour).unwrap());
    assert!(local_search.moves_applied > 0);
    assert!(local_search.observer().events.is_empty());
}
