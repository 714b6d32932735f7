use std::sync::Arc;

use sil_core::combat::{RollEvent, Source, crit_bonus, hit_roll, skill_check};
use sil_core::dungeon::{Feat, Loc};
use sil_core::monster::{Monster, MonsterId};
use sil_core::player::Skill;
use sil_core::world::World;
use sil_core::{GameData, GameRng};

fn world(rolls: &[u32]) -> World {
    let mut w = World::new(Arc::new(GameData::standard()), GameRng::fixed(rolls));
    w.cave.fill(Loc::new(1, 1), Loc::new(8, 8), Feat::Floor);
    w.place_player(Loc::new(4, 4));
    w
}

fn place(w: &mut World, name: &str) -> MonsterId {
    let race = w.data.race_by_name(name).unwrap();
    w.place_monster(Monster {
        race,
        hp: 20,
        maxhp: 20,
        grid: Loc::new(4, 5),
        ml: true,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_baseline_player_attack() {
    // d20s show 15 and 5, d10s show 8 and 3
    let mut w = world(&[14, 4, 7, 2]);
    let wolf = place(&mut w, "wolf");
    let evn = w.monster_race(wolf).unwrap().evn;

    let margin = hit_roll(&mut w, 10, evn, Source::Player, Source::Monster(wolf), true);
    assert_eq!(margin, (10 + 15) - (4 + 5));
    // (16 * 10 + 4) / (70 + 30)
    let race = w.monster_race(wolf).cloned();
    assert_eq!(
        crit_bonus(&w, Source::Player, margin, 30, race.as_ref(), Skill::Melee, false),
        1
    );
    assert_eq!(skill_check(&mut w, Source::Player, 6, 4, Source::Monster(wolf)), (6 + 8) - (4 + 3));
    assert_eq!(w.rng.fixed_remaining(), 0);
}

#[test]
fn test_cursed_player_takes_worse_roll() {
    // attacker 15 then a reroll of 3; the monster's 5 stands
    let mut w = world(&[14, 4, 2]);
    w.player.cursed = true;
    let wolf = place(&mut w, "wolf");
    let margin = hit_roll(&mut w, 10, 4, Source::Player, Source::Monster(wolf), false);
    assert_eq!(margin, (10 + 3) - (4 + 5));

    // defending: the monster keeps 15, the player drops from 5 to 3
    let mut w = world(&[14, 4, 2]);
    w.player.cursed = true;
    let wolf = place(&mut w, "wolf");
    let margin = hit_roll(&mut w, 10, 4, Source::Monster(wolf), Source::Player, false);
    assert_eq!(margin, (10 + 15) - (4 + 3));

    // a reroll never improves things
    let mut w = world(&[0, 4, 19]);
    w.player.cursed = true;
    let wolf = place(&mut w, "wolf");
    let margin = hit_roll(&mut w, 10, 4, Source::Player, Source::Monster(wolf), false);
    assert_eq!(margin, (10 + 1) - (4 + 5));
}

#[test]
fn test_crit_resistant_monster_halves_dice() {
    let w = world(&[]);
    let wolf = w.data.race_by_name("wolf").unwrap();
    let gorgol = w.data.race_by_name("Gorgol the Cleaver").unwrap();
    let plain = w.race(wolf).unwrap();
    let tough = w.race(gorgol).unwrap();
    // (35 * 10 + 4) / 100 = 3, halved to 1
    assert_eq!(crit_bonus(&w, Source::Player, 35, 30, Some(plain), Skill::Melee, false), 3);
    assert_eq!(crit_bonus(&w, Source::Player, 35, 30, Some(tough), Skill::Melee, false), 1);
}

#[test]
fn test_elf_bane_helps_monster() {
    // both d10s show 6
    let mut w = world(&[5, 5]);
    w.player.race = 0;
    let gorgol = place(&mut w, "Gorgol the Cleaver");
    assert_eq!(skill_check(&mut w, Source::Monster(gorgol), 5, 5, Source::Player), 3);

    let mut w = world(&[5, 5]);
    w.player.race = 3;
    let gorgol = place(&mut w, "Gorgol the Cleaver");
    assert_eq!(skill_check(&mut w, Source::Monster(gorgol), 5, 5, Source::Player), 0);
}

#[test]
fn test_roll_event_for_front_end() {
    let mut w = world(&[14, 4]);
    let wolf = place(&mut w, "wolf");
    hit_roll(&mut w, 10, 4, Source::Player, Source::Monster(wolf), true);

    let json = serde_json::to_value(w.roll_events[0]).unwrap();
    assert_eq!(json["attacker"], "Player");
    assert_eq!(json["defender"]["Monster"], wolf.0);
    assert_eq!(json["attack_roll"], 15);
    assert_eq!(json["result"], 16);
    let back: RollEvent = serde_json::from_value(json).unwrap();
    assert_eq!(back, w.roll_events[0]);
}
