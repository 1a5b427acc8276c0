use dartgust::error::DartError;
use dartgust::geometry::{default_bonus_zones, Arena, BonusZone, Point};
use dartgust::resolver::{self, ForcedZone};
use dartgust::scorer::Scorer;
use rstest::rstest;

fn zone(id: &str, x: f64, y: f64, radius: f64, bonus: u32) -> BonusZone {
    BonusZone {
        id: id.to_string(),
        center: Point::new(x, y),
        radius,
        bonus,
    }
}

// --- RING TESTS ---
#[rstest]
#[case(350.0, 195.0, 20)] // Dead center
#[case(365.0, 195.0, 20)] // Bullseye edge is inclusive
#[case(365.01, 195.0, 10)]
#[case(350.0, 235.0, 10)] // Inner edge
#[case(350.0, 125.0, 5)] // Outer edge
#[case(420.5, 195.0, 0)]
#[case(0.0, 0.0, 0)]
fn test_ring_score(#[case] x: f64, #[case] y: f64, #[case] expected: u32) {
    let scorer = Scorer::from_arena(&Arena::standard());
    assert_eq!(scorer.ring_score(Point::new(x, y)), expected);
}

// --- BONUS ZONE TESTS ---
#[rstest]
#[case(620.0, 70.0, Some("TR50"), 50)]
#[case(675.0, 70.0, Some("TR50"), 50)] // Edge is inclusive
#[case(676.0, 70.0, None, 0)]
#[case(620.0, 390.0, Some("BR80"), 80)]
#[case(560.0, 390.0, Some("BR80"), 80)]
#[case(80.0, 70.0, None, 0)] // No mirrored zone on the left
fn test_bonus_zones(
    #[case] x: f64,
    #[case] y: f64,
    #[case] expected_zone: Option<&str>,
    #[case] expected_bonus: u32,
) {
    let scorer = Scorer::from_arena(&Arena::standard());
    let details = scorer.score(Point::new(x, y));
    assert_eq!(details.bonus_zone.as_deref(), expected_zone);
    assert_eq!(details.bonus, expected_bonus);
    assert_eq!(details.base, 0);
    assert_eq!(details.total, expected_bonus);
}

#[test]
fn test_ring_and_zone_stack() {
    let arena = Arena::standard();
    let scorer = Scorer::new(
        arena.target.clone(),
        vec![zone("MID", 350.0, 195.0, 10.0, 30)],
    );
    let details = scorer.score(Point::new(352.0, 195.0));
    assert_eq!(details.base, 20);
    assert_eq!(details.bonus, 30);
    assert_eq!(details.total, 50);
}

#[test]
fn test_overlapping_zones_use_declaration_order() {
    let arena = Arena::standard();
    let a = zone("A", 100.0, 100.0, 10.0, 5);
    let b = zone("B", 105.0, 100.0, 10.0, 7);
    let shared = Point::new(104.0, 100.0);

    let first_a = Scorer::new(arena.target.clone(), vec![a.clone(), b.clone()]);
    assert_eq!(first_a.score(shared).bonus_zone.as_deref(), Some("A"));
    assert_eq!(first_a.score(shared).bonus, 5);

    let first_b = Scorer::new(arena.target.clone(), vec![b, a]);
    assert_eq!(first_b.score(shared).bonus_zone.as_deref(), Some("B"));
    assert_eq!(first_b.score(shared).bonus, 7);
}

#[test]
fn test_huge_bonus_on_bullseye_saturates() {
    let arena = Arena::standard();
    let scorer = Scorer::new(
        arena.target.clone(),
        vec![zone("BIG", 350.0, 195.0, 5.0, u32::MAX)],
    );
    let details = scorer.score(Point::new(350.0, 195.0));
    assert_eq!(details.base, 20);
    assert_eq!(details.bonus, u32::MAX);
    assert_eq!(details.total, u32::MAX);
}

#[test]
fn test_scoring_is_deterministic() {
    let scorer = Scorer::from_arena(&Arena::standard());
    let p = Point::new(371.3, 210.9);
    assert_eq!(scorer.score(p), scorer.score(p));
}

// --- RESOLVER TESTS ---
#[test]
fn test_forced_zone_lookup() {
    let forced = ForcedZone::lookup(&default_bonus_zones(), "BR80").unwrap();
    assert_eq!(forced.center, Point::new(620.0, 390.0));

    let missing = ForcedZone::lookup(&default_bonus_zones(), "TL99");
    assert!(matches!(missing, Err(DartError::Config(_))));
}

#[rstest]
#[case(Point::new(350.0, 195.0))]
#[case(Point::new(0.0, 0.0))]
#[case(Point::new(620.0, 390.0))]
fn test_forced_landing_ignores_aim(#[case] intended: Point) {
    let forced = ForcedZone::lookup(&default_bonus_zones(), "TR50").unwrap();
    let landing = resolver::resolve(intended, Some(&forced));
    assert!(landing.forced);
    assert_eq!(landing.intended, intended);
    assert_eq!(landing.landing, Point::new(620.0, 70.0));
    assert_eq!(landing.forced_zone.as_deref(), Some("TR50"));

    let free = resolver::resolve(intended, None);
    assert!(!free.forced);
    assert_eq!(free.landing, intended);
    assert_eq!(free.forced_zone, None);
}
