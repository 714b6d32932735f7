use std::sync::Arc;

use proptest::prelude::*;
use sil_core::{GameData, GameRng};
use sil_core::player::{
    GradeChain, TimedDescriptor, TimedEffect, TimedGrade, inc_timed, set_timed,
};
use sil_core::world::{MessageType, Redraw, World};
use strum::IntoEnumIterator;

fn world() -> World {
    World::new(Arc::new(GameData::standard()), GameRng::new(99))
}

fn graded_effects(w: &World) -> Vec<TimedEffect> {
    TimedEffect::iter()
        .filter(|&e| e != TimedEffect::Food)
        .filter(|&e| matches!(w.data.timed.get(e).chain, GradeChain::Graded(_)))
        .collect()
}

#[test]
fn test_first_band_fires_up_message() {
    let w = world();
    for effect in graded_effects(&w) {
        let mut w = world();
        let GradeChain::Graded(grades) = &w.data.timed.get(effect).chain else {
            unreachable!()
        };
        let expected = grades[1].up_msg.clone();
        assert!(set_timed(&mut w, effect, 1, false, false), "{effect}");
        assert_eq!(w.messages.last_text(), expected.as_deref(), "{effect}");
    }
}

#[test]
fn test_maxed_effect_stays_put() {
    for effect in TimedEffect::iter() {
        let mut w = world();
        let top = w.data.timed.get(effect).max_value();
        assert!(set_timed(&mut w, effect, top, false, false), "{effect}");
        assert!(!set_timed(&mut w, effect, top, true, true), "{effect}");
        assert!(!set_timed(&mut w, effect, top + 10, true, true), "{effect}");
        assert!(!inc_timed(&mut w, effect, 1, true, true, false), "{effect}");
        assert_eq!(w.player.timed(effect), top, "{effect}");
    }
}

#[test]
fn test_ending_always_notifies_on_recover() {
    for effect in TimedEffect::iter().filter(|&e| e != TimedEffect::Food) {
        let mut w = world();
        set_timed(&mut w, effect, 30, false, false);
        let before = w.messages.len();
        assert!(set_timed(&mut w, effect, 0, false, false), "{effect}");
        assert_eq!(w.player.timed(effect), 0);
        if w.data.timed.get(effect).on_end.is_some() {
            assert_eq!(w.messages.len(), before + 1);
            assert_eq!(w.messages.last().unwrap().typ, MessageType::Recover, "{effect}");
        }
    }
}

/// Three bands: off, dazed and stunned
fn custom_stun() -> TimedDescriptor {
    let band = |max: i32, name: &str, up: Option<&str>| TimedGrade {
        max,
        name: name.to_string(),
        color: 0,
        up_msg: up.map(String::from),
        down_msg: None,
    };
    TimedDescriptor {
        name: String::from("Stun"),
        on_end: Some(String::from("You can think clearly again.")),
        on_increase: None,
        on_decrease: None,
        msg_type: MessageType::Stun,
        fail: None,
        temp_resist: None,
        este: false,
        save: false,
        floor: 0,
        redraw: Redraw::STUN,
        chain: GradeChain::Graded(vec![
            band(50, "Off", None),
            band(150, "Dazed", Some("You are dazed.")),
            band(10000, "Stunned", Some("You are badly stunned.")),
        ]),
    }
}

#[test]
fn test_custom_band_walkthrough() {
    let mut data = GameData::standard();
    data.timed.set(TimedEffect::Stun, custom_stun()).unwrap();
    let mut w = World::new(Arc::new(data), GameRng::new(3));

    assert!(set_timed(&mut w, TimedEffect::Stun, 60, false, false));
    assert_eq!(w.player.timed(TimedEffect::Stun), 60);
    assert_eq!(w.messages.last_text(), Some("You are dazed."));
    assert_eq!(w.upkeep.disturb_count, 0);

    w.upkeep.redraw = Redraw::empty();
    assert!(!set_timed(&mut w, TimedEffect::Stun, 60, true, true));
    assert!(w.upkeep.redraw.is_empty());

    assert!(set_timed(&mut w, TimedEffect::Stun, 0, false, true));
    let last = w.messages.last().unwrap();
    assert_eq!(last.text, "You can think clearly again.");
    assert_eq!(last.typ, MessageType::Recover);
    assert_eq!(w.upkeep.disturb_count, 1);
}

#[test]
fn test_bad_descriptor_rejected() {
    let mut data = GameData::standard();
    let mut desc = custom_stun();
    if let GradeChain::Graded(bands) = &mut desc.chain {
        bands.swap(1, 2);
    }
    assert!(data.timed.set(TimedEffect::Stun, desc).is_err());
}

proptest! {
    #[test]
    fn same_value_is_silent(
        idx in 0usize..17,
        v in 1i32..400,
        notify in any::<bool>(),
        disturb in any::<bool>(),
    ) {
        let effect = TimedEffect::iter().nth(idx).unwrap();
        let mut w = world();
        set_timed(&mut w, effect, v, false, false);
        let current = w.player.timed(effect);
        let disturbs = w.upkeep.disturb_count;
        let messages = w.messages.len();
        w.upkeep.redraw = Redraw::empty();

        prop_assert!(!set_timed(&mut w, effect, current, notify, disturb));
        prop_assert_eq!(w.player.timed(effect), current);
        prop_assert_eq!(w.upkeep.disturb_count, disturbs);
        prop_assert_eq!(w.messages.len(), messages);
        prop_assert!(w.upkeep.redraw.is_empty());
    }
}
