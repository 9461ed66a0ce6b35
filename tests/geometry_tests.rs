use fengshui::catalog::ObjectCatalog;
use fengshui::geometry::{
    add_occupied_positions, check_object_collision, is_layout_valid, is_position_valid,
    objects_overlap, placement_center, Grid, OccupiedSet, Placement,
};
use rstest::rstest;

fn room() -> Grid {
    Grid::new(144, 144).unwrap()
}

#[rstest]
#[case("bed", 0, 0, true)]
#[case("bed", 64, 84, true)] // flush with the far corner
#[case("bed", 65, 0, false)]
#[case("bed", -1, 0, false)]
#[case("desk", 96, 120, true)]
#[case("door", 0, 0, true)]
#[case("door", 0, 114, true)] // span ends exactly at the wall end
#[case("door", 0, 115, false)]
#[case("door", 10, 0, true)]
#[case("door", 115, 0, false)]
#[case("door", 143, 50, true)]
#[case("door", 50, 50, false)] // interior
#[case("window", 120, 143, true)]
#[case("window", 121, 143, false)]
#[case("lamp", 5, 5, false)] // unknown type
fn test_is_position_valid(
    #[case] kind: &str,
    #[case] x: i32,
    #[case] y: i32,
    #[case] expected: bool,
) {
    let catalog = ObjectCatalog::standard();
    assert_eq!(is_position_valid(&catalog, room(), x, y, kind), expected);
}

#[test]
fn test_grid_rejects_non_positive_dimensions() {
    assert!(Grid::new(0, 10).is_err());
    assert!(Grid::new(10, -3).is_err());
    assert!(Grid::new(1, 1).is_ok());
}

#[test]
fn test_collision_and_occupancy() {
    let catalog = ObjectCatalog::standard();
    let mut occupied = OccupiedSet::new();

    add_occupied_positions(&catalog, 10, 10, "desk", &mut occupied);
    assert_eq!(occupied.len(), 48 * 24);

    assert!(check_object_collision(&catalog, 57, 33, "desk", &occupied));
    assert!(!check_object_collision(&catalog, 58, 10, "desk", &occupied));

    // Boundaries neither claim nor collide with cells
    add_occupied_positions(&catalog, 0, 0, "door", &mut occupied);
    assert_eq!(occupied.len(), 48 * 24);
    assert!(!check_object_collision(&catalog, 10, 10, "window", &occupied));
}

#[rstest]
#[case((10, 10), (10, 10), true)] // identical anchors
#[case((0, 0), (47, 23), true)]
#[case((0, 0), (48, 0), false)] // touching edges
#[case((0, 0), (0, 24), false)]
fn test_objects_overlap(#[case] a: (i32, i32), #[case] b: (i32, i32), #[case] expected: bool) {
    let catalog = ObjectCatalog::standard();
    let p1 = Placement::new("desk", a.0, a.1);
    let p2 = Placement::new("desk", b.0, b.1);
    assert_eq!(objects_overlap(&catalog, &p1, &p2), expected);
    assert_eq!(objects_overlap(&catalog, &p2, &p1), expected);
}

#[test]
fn test_boundaries_never_overlap() {
    let catalog = ObjectCatalog::standard();
    let door = Placement::new("door", 0, 0);
    let bed = Placement::new("bed", 0, 0);
    assert!(!objects_overlap(&catalog, &door, &bed));
}

#[test]
fn test_layout_validity() {
    let catalog = ObjectCatalog::standard();
    let good = vec![
        Placement::new("bed", 0, 0),
        Placement::new("desk", 96, 120),
        Placement::new("door", 143, 40),
    ];
    assert!(is_layout_valid(&catalog, room(), &good));

    let overlapping = vec![Placement::new("bed", 0, 0), Placement::new("desk", 20, 20)];
    assert!(!is_layout_valid(&catalog, room(), &overlapping));
}

#[test]
fn test_boundary_center_is_span_midpoint() {
    let catalog = ObjectCatalog::standard();
    let left = Placement::new("door", 0, 40);
    assert_eq!(placement_center(&catalog, room(), &left), (0.0, 55.0));
    let top = Placement::new("window", 60, 0);
    assert_eq!(placement_center(&catalog, room(), &top), (72.0, 0.0));
    let bed = Placement::new("bed", 0, 0);
    assert_eq!(placement_center(&catalog, room(), &bed), (40.0, 30.0));
}
