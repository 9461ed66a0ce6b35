use fengshui::catalog::ObjectCatalog;
use fengshui::config::{default_preferences, ZoneWeights};
use fengshui::geometry::{Grid, Placement};
use fengshui::zones::{rank_values, ZoneLabel, ZoneMap};
use rstest::rstest;
use std::str::FromStr;

#[rstest]
#[case(0, 0, ZoneLabel::Career)]
#[case(72, 0, ZoneLabel::Knowledge)]
#[case(143, 0, ZoneLabel::Family)]
#[case(0, 72, ZoneLabel::HelpfulPeople)]
#[case(72, 72, ZoneLabel::Health)]
#[case(143, 72, ZoneLabel::Wealth)]
#[case(0, 143, ZoneLabel::Children)]
#[case(72, 143, ZoneLabel::Relationships)]
#[case(143, 143, ZoneLabel::Fame)]
#[case(-1, 5, ZoneLabel::Health)] // outside the grid
fn test_bagua_layout(#[case] x: i32, #[case] y: i32, #[case] expected: ZoneLabel) {
    let map = ZoneMap::new(Grid::new(144, 144).unwrap());
    assert_eq!(map.zone_at(x, y), expected);
}

#[test]
fn test_last_band_takes_remainder() {
    let map = ZoneMap::new(Grid::new(10, 10).unwrap());
    assert_eq!(map.zone_at(5, 0), ZoneLabel::Knowledge);
    assert_eq!(map.zone_at(6, 0), ZoneLabel::Family);
    assert_eq!(map.zone_at(9, 9), ZoneLabel::Fame);
}

#[test]
fn test_tiny_grid_has_no_empty_bands() {
    let map = ZoneMap::new(Grid::new(2, 2).unwrap());
    assert_eq!(map.zone_at(0, 0), ZoneLabel::Career);
    assert_eq!(map.zone_at(1, 1), ZoneLabel::Health);
}

#[test]
fn test_zone_uses_footprint_center() {
    let catalog = ObjectCatalog::standard();
    let map = ZoneMap::new(Grid::new(144, 144).unwrap());

    // Anchor sits in career, the center (80, 30) in knowledge
    let bed = Placement::new("bed", 40, 0);
    assert_eq!(map.zone_at(bed.x, bed.y), ZoneLabel::Career);
    assert_eq!(map.get_zone(&catalog, &bed), ZoneLabel::Knowledge);
}

#[test]
fn test_rank_values_cover_one_to_nine() {
    let prefs = default_preferences();
    let values = rank_values(&prefs["desk"], &ZoneWeights::default());
    let mut sorted: Vec<f32> = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(sorted, (1..=9).map(|v| v as f32).collect::<Vec<_>>());
    assert_eq!(values[ZoneLabel::Career.index()], 9.0);
    assert_eq!(values[ZoneLabel::Relationships.index()], 1.0);
}

#[test]
fn test_zone_label_names() {
    assert_eq!(ZoneLabel::HelpfulPeople.to_string(), "helpful_people");
    assert_eq!(ZoneLabel::from_str("wealth").unwrap(), ZoneLabel::Wealth);
}
