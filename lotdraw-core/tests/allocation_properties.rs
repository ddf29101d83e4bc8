use std::collections::HashSet;

use lotdraw_core::prelude::*;
use proptest::prelude::*;

const SLOTS: u32 = 13;
const TOPICS: u32 = 7;
const RESERVED_SLOT: u32 = 10;
const RESERVED_TOPIC: u32 = 5;
const ADMIN: &str = "Admin";

fn engine(seed: u64) -> Engine {
    let catalog = TopicCatalog::new(
        (1..=TOPICS)
            .map(|id| Topic::new(id, format!("topic {id}")))
            .collect(),
    )
    .unwrap();
    let settings = EngineSettings {
        slot_count: SLOTS,
        admin_name: ADMIN.into(),
        reserved_slot: RESERVED_SLOT,
        reserved_topic: RESERVED_TOPIC,
    };
    Engine::new(settings, catalog, seeded_rng(Some(seed))).unwrap()
}

/// Distinct lowercase names, so none of them collides with the admin name.
fn names(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set("[a-z]{1,8}", 0..max).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn distinct_names_get_distinct_slots(seed in any::<u64>(), names in names(20), admin_at in 0usize..20) {
        let mut engine = engine(seed);
        let mut slots = HashSet::new();

        for (i, name) in names.iter().enumerate() {
            if i == admin_at {
                let admin = engine.draw(ADMIN).unwrap();
                prop_assert!(slots.insert(admin.sequence_number));
            }
            match engine.draw(name) {
                Ok(a) => {
                    prop_assert_eq!(a.kind, DrawKind::Fresh);
                    prop_assert_ne!(a.sequence_number, RESERVED_SLOT);
                    prop_assert!(slots.insert(a.sequence_number));
                }
                Err(DrawError::NoEligibleSlot { .. }) | Err(DrawError::AllSlotsFilled { .. }) => {
                    prop_assert!(engine.remaining_slots() <= 1);
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }

    #[test]
    fn topics_are_unique_until_pool_runs_out(seed in any::<u64>(), names in names(12)) {
        let mut engine = engine(seed);
        engine.draw(ADMIN).unwrap();

        let mut topics = HashSet::from([RESERVED_TOPIC]);
        for name in names.iter().take((TOPICS - 1) as usize) {
            let a = engine.draw(name).unwrap();
            prop_assert!(topics.insert(a.topic.id), "topic {} repeated", a.topic.id);
        }
    }

    #[test]
    fn normal_draws_cover_the_whole_catalog_before_repeating(seed in any::<u64>(), names in names(12)) {
        let mut engine = engine(seed);
        let mut topics = HashSet::new();
        for name in names.iter().take(TOPICS as usize) {
            let a = engine.draw(name).unwrap();
            prop_assert!(topics.insert(a.topic.id), "topic {} repeated", a.topic.id);
        }
    }

    #[test]
    fn restore_reproduces_slots_and_drawn_topics(
        seed in any::<u64>(),
        names in names(20),
        admin_at in 0usize..20,
    ) {
        let mut engine = engine(seed);
        for (i, name) in names.iter().enumerate() {
            if i == admin_at {
                engine.draw(ADMIN).unwrap();
            }
            // Refusals past a full table leave state alone.
            let _ = engine.draw(name);
        }

        let restored = Engine::restore(
            engine.settings().clone(),
            engine.catalog().clone(),
            seeded_rng(None),
            engine.records(),
        )
        .unwrap();
        prop_assert_eq!(restored.current_state(), engine.current_state());
        prop_assert_eq!(restored.drawn_topics(), engine.drawn_topics());
    }

    #[test]
    fn repeat_draw_is_stable(seed in any::<u64>(), names in names(12), pick in any::<prop::sample::Index>()) {
        prop_assume!(!names.is_empty());
        let mut engine = engine(seed);
        let mut first = Vec::new();
        for name in &names {
            first.push(engine.draw(name).unwrap());
        }

        let i = pick.index(names.len());
        let drawn = engine.drawn_topics().len();
        let again = engine.draw(&names[i]).unwrap();
        prop_assert_eq!(again.kind, DrawKind::Replay);
        prop_assert_eq!(again.sequence_number, first[i].sequence_number);
        prop_assert_eq!(&again.topic, &first[i].topic);
        prop_assert_eq!(engine.drawn_topics().len(), drawn);
    }

    #[test]
    fn admin_is_deterministic(seed in any::<u64>(), names in names(12)) {
        let mut engine = engine(seed);
        for name in &names {
            engine.draw(name).unwrap();
        }
        let admin = engine.draw(ADMIN).unwrap();
        prop_assert_eq!(admin.sequence_number, RESERVED_SLOT);
        prop_assert_eq!(admin.topic.id, RESERVED_TOPIC);
    }
}

#[test]
fn table_fills_then_refuses() {
    let mut engine = engine(42);
    assert_eq!(
        engine.draw(ADMIN).unwrap().sequence_number,
        RESERVED_SLOT
    );
    for i in 0..(SLOTS - 1) {
        engine.draw(&format!("participant-{i}")).unwrap();
    }
    assert!(matches!(
        engine.draw("Zed"),
        Err(DrawError::AllSlotsFilled { slot_count: SLOTS })
    ));

    let occupied: HashSet<u32> = engine
        .current_state()
        .iter()
        .filter(|s| s.is_occupied())
        .map(|s| s.sequence_number)
        .collect();
    assert_eq!(occupied.len(), SLOTS as usize);
}

#[test]
fn reset_allows_topics_again() {
    let mut engine = engine(3);
    for i in 0..(TOPICS - 1) {
        engine.draw(&format!("p{i}")).unwrap();
    }
    assert_eq!(engine.drawn_topics().len(), (TOPICS - 1) as usize);

    engine.reset();
    assert!(engine
        .current_state()
        .iter()
        .all(|s| s.occupant.is_none() && s.topic.is_none()));

    let mut topics = HashSet::new();
    for i in 0..(TOPICS - 1) {
        topics.insert(engine.draw(&format!("q{i}")).unwrap().topic.id);
    }
    assert_eq!(topics.len(), (TOPICS - 1) as usize);
}
