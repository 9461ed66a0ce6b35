use fengshui::catalog::ObjectCatalog;
use fengshui::config::Config;
use fengshui::geometry::{Grid, Placement};
use fengshui::scorer::{ScoreDetails, Scorer, Violation};
use rstest::rstest;
use std::sync::Arc;

fn scorer() -> Scorer {
    Scorer::new(
        Grid::new(144, 144).unwrap(),
        Arc::new(ObjectCatalog::standard()),
        &Config::default(),
    )
}

fn layout(items: &[(&str, i32, i32)]) -> Vec<Placement> {
    items
        .iter()
        .map(|(k, x, y)| Placement::new(*k, *x, *y))
        .collect()
}

#[test]
fn test_scoring_is_idempotent() {
    let s = scorer();
    let l = layout(&[
        ("bed", 0, 42),
        ("desk", 96, 0),
        ("door", 143, 90),
        ("window", 60, 0),
    ]);
    let first = s.score(&l);
    let second = s.score(&l);
    assert_eq!(first, second);
    assert_eq!(s.score_details(&l).layout_score, first);
}

#[test]
fn test_out_of_bounds_sentinel() {
    let s = scorer();
    let l = layout(&[("bed", 100, 100), ("door", 0, 0)]);
    let score = s.score(&l);
    assert!(score <= -1000.0);
    assert_eq!(score, -s.weights.penalty_out_of_bounds);
    assert_eq!(s.score_details(&l).violation, Some(Violation::OutOfBounds));
}

#[test]
fn test_overlap_sentinel() {
    let s = scorer();
    let l = layout(&[("desk", 10, 10), ("desk", 20, 20)]);
    let score = s.score(&l);
    assert!(score <= -s.weights.penalty_overlap);

    let d = s.score_details(&l);
    assert_eq!(d.violation, Some(Violation::Overlap));
    // The explicit term stays visible in the breakdown
    assert_eq!(d.overlap, -s.weights.penalty_overlap);
    assert_eq!(d.layout_score, score);
}

#[test]
fn test_bounds_outrank_overlap() {
    let s = scorer();
    let l = layout(&[("bed", 100, 100), ("desk", 100, 100)]);
    assert_eq!(s.score(&l), -s.weights.penalty_out_of_bounds);
}

#[test]
fn test_door_blocked_sentinel() {
    let s = scorer();
    // Desk spans x 1..49 and y 40..64, one cell from the door anchor
    let l = layout(&[("door", 0, 50), ("desk", 1, 40)]);
    assert_eq!(s.score(&l), -s.weights.penalty_door_blocked);

    let d = s.score_details(&l);
    assert_eq!(d.violation, Some(Violation::DoorBlocked));
    assert_eq!(d.door_blocked, -s.weights.penalty_door_blocked);
}

#[test]
fn test_flat_bonuses() {
    let s = scorer();
    let l = layout(&[("bed", 0, 42), ("door", 143, 90), ("window", 60, 0)]);
    let d = s.score_details(&l);
    assert_eq!(d.violation, None);
    assert_eq!(d.completeness, 30.0);
    assert_eq!(d.wall, 30.0);
}

#[test]
fn test_floating_bed_penalty() {
    let s = scorer();
    // 32 cells from the nearest wall: middle tier plus the bed surcharge
    let d = s.score_details(&layout(&[("bed", 32, 42)]));
    assert_eq!(d.pen_floating, -50.0);
    assert_eq!(d.stat_floating, 1);
}

#[test]
fn test_bed_in_corner() {
    let s = scorer();
    let d = s.score_details(&layout(&[("bed", 0, 0)]));
    assert_eq!(d.bonus_corner, 10.0);
    assert_eq!(d.pen_bed_corner, -25.0);
    assert_eq!(d.pen_floating, 0.0);
}

#[test]
fn test_window_near_door_same_wall() {
    let s = scorer();
    let d = s.score_details(&layout(&[("door", 0, 10), ("window", 0, 20)]));
    assert_eq!(d.pen_window_door, -35.0);

    let d = s.score_details(&layout(&[("door", 0, 10), ("window", 10, 0)]));
    assert_eq!(d.pen_window_door, -20.0);
}

#[test]
fn test_zone_preference_for_bed() {
    let s = scorer();
    // Center (72, 72) lies in health, the bed's favourite zone: 9 * 2.0 * 10/10
    let bed = Placement::new("bed", 32, 42);
    assert_eq!(s.zone_score(&bed), 18.0);

    let lamp = Placement::new("lamp", 72, 72);
    assert_eq!(s.zone_score(&lamp), 0.0);
}

#[test]
fn test_command_position_needs_a_door() {
    let s = scorer();
    let without = s.score_details(&layout(&[("bed", 0, 42)]));
    assert_eq!(without.command_position, 0.0);

    let with = s.score_details(&layout(&[("bed", 0, 42), ("door", 143, 60)]));
    assert!(with.command_position > 0.0);
    assert!(with.command_position <= s.weights.bonus_command_position);
}

#[test]
fn test_term_total_matches_valid_score() {
    let s = scorer();
    let l = layout(&[
        ("bed", 0, 42),
        ("desk", 96, 0),
        ("door", 143, 90),
        ("window", 60, 0),
    ]);
    let d = s.score_details(&l);
    assert_eq!(d.violation, None);
    assert!((d.term_total() - s.score(&l)).abs() < 1e-3);
}

#[test]
fn test_anchor_near_integer_limit_is_out_of_bounds() {
    let s = scorer();
    let l = layout(&[("bed", i32::MAX - 10, 0), ("door", i32::MIN, i32::MAX)]);
    assert_eq!(s.score(&l), -s.weights.penalty_out_of_bounds);

    let d = s.score_details(&l);
    assert_eq!(d.violation, Some(Violation::OutOfBounds));
    assert_eq!(d.layout_score, -s.weights.penalty_out_of_bounds);
    assert_eq!(d.door_blocked, 0.0);
}

fn details(items: &[(&str, i32, i32)]) -> ScoreDetails {
    scorer().score_details(&layout(items))
}

// Bed at the origin: center (40, 30), foot (40, 60)
#[rstest]
#[case(96, -40.0)] // exactly 36 from the foot
#[case(97, 0.0)]
fn test_door_at_bed_foot(#[case] door_y: i32, #[case] expected: f32) {
    let d = details(&[("bed", 0, 0), ("door", 40, door_y)]);
    assert_eq!(d.pen_door_bed_foot, expected);
}

#[rstest]
#[case(78, -25.0)] // exactly 48 from the center
#[case(79, 0.0)]
fn test_door_facing_bed(#[case] door_y: i32, #[case] expected: f32) {
    let d = details(&[("bed", 0, 0), ("door", 40, door_y)]);
    assert_eq!(d.pen_door_facing_bed, expected);
}

#[rstest]
#[case(78, -30.0)]
#[case(79, 0.0)]
fn test_bed_under_window(#[case] window_y: i32, #[case] expected: f32) {
    let d = details(&[("bed", 0, 0), ("window", 40, window_y)]);
    assert_eq!(d.pen_bed_window, expected);
}

#[rstest]
#[case(74, -20.0)] // anchors exactly 24 apart
#[case(75, 0.0)]
fn test_door_clearance(#[case] door_y: i32, #[case] expected: f32) {
    let d = details(&[("desk", 50, 50), ("door", 50, door_y)]);
    assert_eq!(d.pen_door_clearance, expected);
}
