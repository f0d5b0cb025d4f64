use std::collections::HashSet;

use arcana_engine::cards::{CardDefinition, CardRegistry, Suit};
use arcana_engine::draw::{draw, DrawEngine, DrawRequest, Orientation};
use arcana_engine::errors::DrawError;
use arcana_engine::seed::SeedInput;
use arcana_engine::spreads::{SpreadDefinition, SpreadRegistry};

#[test]
fn every_valid_count_yields_contiguous_indices() {
    for count in 1..=78 {
        let result = draw(&DrawRequest::new(count).seed(count as u64)).unwrap();
        assert_eq!(result.cards.len(), count);
        assert_eq!(result.meta.num_cards, count);
        for (i, card) in result.cards.iter().enumerate() {
            assert_eq!(card.index, i, "count {count}");
        }
    }
}

#[test]
fn drawn_cards_are_distinct_registry_members() {
    let registry = CardRegistry::standard();
    for seed in 0..200u64 {
        let result = draw(&DrawRequest::new(10).seed(seed)).unwrap();
        let ids: HashSet<_> = result.cards.iter().map(|c| c.card_id.as_str()).collect();
        assert_eq!(ids.len(), 10, "seed {seed} drew a duplicate");
        for card in &result.cards {
            let def = registry.get(&card.card_id).expect("registered card");
            assert_eq!(card.card_name, def.name);
            assert_eq!(card.suit, def.suit);
            assert_eq!(card.rank, def.rank);
        }
    }
}

#[test]
fn same_integer_seed_is_bit_identical() {
    let req = DrawRequest::new(10)
        .spread("celtic_cross")
        .seed(987_654_321u64)
        .orientation_prob(0.4);
    let a = draw(&req).unwrap();
    let b = draw(&req).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn same_text_seed_is_bit_identical() {
    let req = DrawRequest::new(3)
        .spread("three_card")
        .seed("demo-seed")
        .orientation_prob(0.5);
    let a = draw(&req).unwrap();
    let b = draw(&req).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.seed, SeedInput::from("demo-seed").normalize());
    let positions: Vec<_> = a.cards.iter().map(|c| c.position.clone().unwrap()).collect();
    assert_eq!(positions, ["past", "present", "future"]);
}

/// Fixed outputs for fixed seeds. These only change if the generator, the
/// shuffle walk or the orientation roll changes, which breaks every saved seed.
#[test]
fn demo_seed_draw_is_pinned() {
    let result = draw(
        &DrawRequest::new(3)
            .spread("three_card")
            .seed("demo-seed")
            .orientation_prob(0.5),
    )
    .unwrap();
    assert_eq!(result.seed, Some(6_819_273_548_528_238_952));
    let drawn: Vec<_> = result
        .cards
        .iter()
        .map(|c| (c.card_id.as_str(), c.orientation))
        .collect();
    assert_eq!(
        drawn,
        [
            ("major_10_wheel_of_fortune", Orientation::Upright),
            ("major_15_the_devil", Orientation::Upright),
            ("minor_pentacles_10", Orientation::Upright),
        ]
    );
}

#[test]
fn integer_seed_draw_is_pinned() {
    let result = draw(&DrawRequest::new(3).seed(42u64).orientation_prob(0.5)).unwrap();
    let drawn: Vec<_> = result
        .cards
        .iter()
        .map(|c| (c.card_id.as_str(), c.orientation))
        .collect();
    assert_eq!(
        drawn,
        [
            ("minor_wands_page", Orientation::Upright),
            ("minor_cups_ace", Orientation::Reversed),
            ("major_14_temperance", Orientation::Upright),
        ]
    );
}

#[test]
fn text_and_equivalent_integer_seed_agree() {
    let text = SeedInput::from("demo-user-002");
    let as_int = text.normalize().unwrap();
    let a = draw(&DrawRequest::new(5).seed(text)).unwrap();
    let b = draw(&DrawRequest::new(5).seed(as_int)).unwrap();
    assert_eq!(a.cards, b.cards);
}

#[test]
fn different_seeds_change_the_draw() {
    let a = draw(&DrawRequest::new(10).seed("alpha")).unwrap();
    let b = draw(&DrawRequest::new(10).seed("beta")).unwrap();
    assert_ne!(a.cards, b.cards);
}

#[test]
fn prefix_of_a_larger_draw_matches_a_smaller_draw_order() {
    // Orientation rolls come after the whole shuffle, so card order only depends on the seed
    let small = draw(&DrawRequest::new(3).seed(77u64)).unwrap();
    let large = draw(&DrawRequest::new(20).seed(77u64)).unwrap();
    let small_ids: Vec<_> = small.cards.iter().map(|c| &c.card_id).collect();
    let large_ids: Vec<_> = large.cards.iter().take(3).map(|c| &c.card_id).collect();
    assert_eq!(small_ids, large_ids);
    for (s, l) in small.cards.iter().zip(&large.cards) {
        assert_eq!(s.orientation, l.orientation);
    }
}

#[test]
fn spread_positions_are_bound_by_index() {
    let spreads = SpreadRegistry::standard();
    for spread in spreads.list() {
        let result = draw(
            &DrawRequest::new(spread.card_count())
                .spread(spread.id.clone())
                .seed(3u64),
        )
        .unwrap();
        assert_eq!(result.spread.as_deref(), Some(spread.id.as_str()));
        for (i, card) in result.cards.iter().enumerate() {
            assert_eq!(card.position.as_deref(), Some(spread.positions[i].as_str()));
        }
    }
}

#[test]
fn no_spread_means_null_positions() {
    let result = draw(&DrawRequest::new(7).seed(1u64)).unwrap();
    assert_eq!(result.spread, None);
    assert!(result.cards.iter().all(|c| c.position.is_none()));
}

#[test]
fn full_deck_draw_returns_every_card() {
    let result = draw(&DrawRequest::new(78).seed("whole deck")).unwrap();
    let ids: HashSet<_> = result.cards.iter().map(|c| c.card_id.as_str()).collect();
    let all: HashSet<_> = CardRegistry::standard().ids().into_iter().collect();
    assert_eq!(ids, all);
}

#[test]
fn count_boundaries() {
    for bad in [0usize, 79] {
        let err = draw(&DrawRequest::new(bad)).unwrap_err();
        assert!(
            matches!(err, DrawError::InvalidParameter(_)),
            "count {bad}: {err:?}"
        );
    }
}

#[test]
fn probability_boundaries() {
    for bad in [-0.01, 1.01, f64::INFINITY] {
        let err = draw(&DrawRequest::new(1).orientation_prob(bad)).unwrap_err();
        assert!(matches!(err, DrawError::InvalidParameter(_)), "{bad}");
    }
    assert!(draw(&DrawRequest::new(1).orientation_prob(0.0)).is_ok());
    assert!(draw(&DrawRequest::new(1).orientation_prob(1.0)).is_ok());
}

#[test]
fn spread_errors() {
    let err = draw(&DrawRequest::new(5).spread("three_card")).unwrap_err();
    assert_eq!(
        err,
        DrawError::SpreadCardCountMismatch {
            spread: "three_card".into(),
            expected: 3,
            actual: 5
        }
    );

    let err = draw(&DrawRequest::new(3).spread("horseshoe")).unwrap_err();
    assert_eq!(err, DrawError::SpreadNotFound("horseshoe".into()));
}

#[test]
fn orientation_extremes() {
    for seed in 0..50u64 {
        let upright = draw(&DrawRequest::new(78).seed(seed).orientation_prob(0.0)).unwrap();
        assert!(upright
            .cards
            .iter()
            .all(|c| c.orientation == Orientation::Upright));

        let reversed = draw(&DrawRequest::new(78).seed(seed).orientation_prob(1.0)).unwrap();
        assert!(reversed
            .cards
            .iter()
            .all(|c| c.orientation == Orientation::Reversed));
    }
}

#[test]
fn orientation_rate_tracks_probability() {
    let mut reversed = 0;
    let mut total = 0;
    for seed in 0..200u64 {
        let result = draw(&DrawRequest::new(78).seed(seed).orientation_prob(0.25)).unwrap();
        total += result.cards.len();
        reversed += result
            .cards
            .iter()
            .filter(|c| c.orientation == Orientation::Reversed)
            .count();
    }
    let rate = reversed as f64 / total as f64;
    assert!((0.22..0.28).contains(&rate), "reversed rate {rate}");
}

#[test]
fn unseeded_draws_are_still_valid() {
    let result = draw(&DrawRequest::new(10).spread("celtic_cross")).unwrap();
    assert_eq!(result.seed, None);
    assert_eq!(result.cards.len(), 10);
}

#[test]
fn engine_accepts_caller_owned_registries() {
    let spreads = SpreadRegistry::from_definitions(vec![SpreadDefinition::new(
        "pair",
        "Pair",
        &["left", "right"],
    )])
    .unwrap();
    let cards = CardRegistry::rider_waite_smith().unwrap();
    let engine = DrawEngine::new(&cards, &spreads);

    let result = engine
        .draw(&DrawRequest::new(2).spread("pair").seed(8u64))
        .unwrap();
    assert_eq!(result.cards[1].position.as_deref(), Some("right"));
    assert!(matches!(
        engine.draw(&DrawRequest::new(3).spread("three_card")),
        Err(DrawError::SpreadNotFound(_))
    ));
}

#[test]
fn registry_rejects_tampered_catalog() {
    let mut cards = arcana_engine::cards::rider_waite_smith();
    cards.push(CardDefinition {
        id: "major_22_the_extra".into(),
        name: "The Extra".into(),
        suit: Suit::Major,
        rank: "22".into(),
    });
    assert!(CardRegistry::from_definitions(cards).is_err());
}
