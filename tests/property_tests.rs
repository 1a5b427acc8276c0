use dartgust::config::GestureParams;
use dartgust::geometry::{default_bonus_zones, Arena, Point};
use dartgust::gesture::{self, Rejection, ThrowGesture};
use dartgust::leaderboard::Leaderboard;
use dartgust::resolver::{self, ForcedZone};
use dartgust::result::TrialOutcome;
use dartgust::scorer::Scorer;
use dartgust::session::ParticipantId;
use proptest::prelude::*;
use std::collections::HashSet;

// --- STRATEGIES ---

prop_compose! {
    fn arb_point()(x in -100.0..800.0f64, y in -100.0..550.0f64) -> Point {
        Point::new(x, y)
    }
}

prop_compose! {
    fn arb_submission()(id in 0u32..15, score in 0u32..600) -> (ParticipantId, u32) {
        (ParticipantId::parse(&id.to_string()), score)
    }
}

proptest! {
    #[test]
    fn prop_gust_landing_is_always_the_forced_center(
        intended in arb_point(),
        zone_idx in 0usize..2,
    ) {
        let zones = default_bonus_zones();
        let forced = ForcedZone::lookup(&zones, &zones[zone_idx].id).unwrap();
        let landing = resolver::resolve(intended, Some(&forced));

        prop_assert!(landing.forced);
        prop_assert_eq!(landing.landing, zones[zone_idx].center);
        prop_assert_eq!(landing.intended, intended);
    }

    #[test]
    fn prop_total_comes_from_final_landing(intended in arb_point(), gust in any::<bool>()) {
        let arena = Arena::standard();
        let scorer = Scorer::from_arena(&arena);
        let forced = ForcedZone::lookup(&arena.bonus_zones, "TR50").unwrap();

        let landing = resolver::resolve(intended, gust.then_some(&forced));
        let outcome = TrialOutcome::new(landing.clone(), scorer.score(landing.landing));

        prop_assert_eq!(outcome.total(), scorer.score(outcome.landing).total);
        prop_assert_eq!(outcome.score.total, outcome.score.base + outcome.score.bonus);
        prop_assert!([0, 5, 10, 20].contains(&outcome.score.base));
        prop_assert!([0, 50, 80].contains(&outcome.score.bonus));
        if gust {
            prop_assert_eq!(outcome.total(), 50);
        }
    }

    #[test]
    fn prop_strength_is_bounded(dy in -2000.0..2000.0f64) {
        let s = gesture::strength(dy, 180.0);
        prop_assert!((0.2..=1.0).contains(&s));
    }

    #[test]
    fn prop_intended_stays_on_surface_and_near_release(
        release in arb_point(),
        strength in 0.2..=1.0f64,
        seed in any::<u64>(),
    ) {
        let arena = Arena::standard();
        let mut rng = fastrand::Rng::with_seed(seed);
        let p = gesture::intended_landing(release, strength, 18.0, &arena.surface, &mut rng);
        let base = arena.surface.clamp(release);
        let noise = (1.0 - strength) * 18.0;

        prop_assert!((0.0..=arena.surface.width).contains(&p.x));
        prop_assert!((0.0..=arena.surface.height).contains(&p.y));
        prop_assert!((p.x - base.x).abs() <= noise + 1e-9);
        prop_assert!((p.y - base.y).abs() <= noise + 1e-9);
    }

    #[test]
    fn prop_quick_releases_are_too_short(
        to in arb_point(),
        held in 0.0..249.9f64,
    ) {
        let start = Point::new(350.0, 405.0);
        let mut g = ThrowGesture::open(start, 1000.0);
        g.drag_to(to);
        let metrics = g.close(1000.0 + held);

        prop_assert_eq!(
            gesture::validate(&metrics, &GestureParams::default()),
            Err(Rejection::TooShort)
        );
    }

    #[test]
    fn prop_leaderboard_invariants(
        submissions in proptest::collection::vec(arb_submission(), 0..40)
    ) {
        let mut board = Leaderboard::seeded();
        for (id, score) in &submissions {
            board.update(id, *score);

            let entries = board.entries();
            prop_assert!(entries.len() <= 5);
            prop_assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
            let ids: HashSet<_> = entries.iter().map(|e| e.id.clone()).collect();
            prop_assert_eq!(ids.len(), entries.len());
        }
    }
}
