//! Whole-game save and load through the filesystem

use std::sync::Arc;

use sil_core::dungeon::{Feat, Loc, SquareFlags, Trap, TrapFlags, chunk_capture};
use sil_core::monster::{Bane, Monster, MonsterId};
use sil_core::object::{Object, object_prep};
use sil_core::player::{EquipSlot, Song, TimedEffect};
use sil_core::world::{GameOption, HistoryFlags, MessageType};
use sil_core::{GameData, GameRng, World};
use sil_save::{savefile_load, savefile_save};

fn item(world: &mut World, kind: u16, inscription: &str) -> Object {
    let mut obj = object_prep(&world.data.kinds, kind).unwrap();
    obj.inscription = world.quarks.add(inscription);
    obj
}

fn wolf(grid: Loc) -> Monster {
    Monster {
        race: 1,
        grid,
        hp: 11,
        maxhp: 14,
        alertness: -3,
        energy: 40,
        mspeed: 2,
        ..Default::default()
    }
}

fn populated_world() -> World {
    let mut w = World::new(Arc::new(GameData::standard()), GameRng::new(1234));
    w.cave.depth = 4;
    w.cave.fill(Loc::new(1, 1), Loc::new(40, 60), Feat::Floor);
    w.cave.set_feat(Loc::new(3, 9), Feat::Rubble);
    w.cave.on(Loc::new(2, 2), SquareFlags::GLOW | SquareFlags::WASSEEN);
    w.place_player(Loc::new(5, 5));

    let p = &mut w.player;
    p.name = String::from("Beren");
    p.history = String::from("You are the son of Barahir.");
    p.stat_base = [2, 1, -1, 0];
    p.stat_cur = [2, 0, -1, 0];
    p.skill_base = [3, 4, 0, 1, 2, 0, 5, 1];
    p.exp = 1500;
    p.mhp = 31;
    p.chp = 17;
    p.depth = 4;
    p.max_depth = 6;
    p.stage = 4;
    p.timed[TimedEffect::Poisoned as usize] = 7;
    p.timed[TimedEffect::Food as usize] = 4500;
    p.song1 = Song::Elbereth;
    p.song_duration = 3;
    p.player_hp[..3].copy_from_slice(&[20, 25, 31]);
    p.bane = Some(Bane::Orc);
    p.silmarils = 1;

    let mut dagger = item(&mut w, 1, "@w1");
    dagger.bonus_stat[0] = -5;
    w.player.equipment[EquipSlot::Weapon as usize] = Some(dagger);
    let potion = item(&mut w, 2, "!q");
    w.player.inventory.push(potion.clone());
    w.player.inventory.push(potion);
    let flask = item(&mut w, 3, "");
    w.player.inventory.push(flask);

    let id = w.place_monster(wolf(Loc::new(6, 6))).unwrap();
    let lembas = item(&mut w, 6, "");
    w.monster_carry(id, lembas);
    for kind in [9, 10] {
        let obj = item(&mut w, kind, "");
        w.floor_carry(Loc::new(7, 7), obj);
    }
    w.traps.place(Trap {
        kind: 1,
        grid: Loc::new(8, 8),
        flags: TrapFlags::TRAP | TrapFlags::PIT,
        xtra: 0,
    });

    // stash a region with its own wolf and pile in the chunk list
    w.place_monster(wolf(Loc::new(22, 22))).unwrap();
    let inscribed = item(&mut w, 10, "@w1");
    w.floor_carry(Loc::new(23, 21), inscribed);
    let chunk = chunk_capture(&mut w, Loc::new(20, 20));
    let r#gen = w.gen_locs.gen_loc_make(1, 0, 0, 99);
    w.gen_locs.add_change(r#gen, Loc::new(4, 4), Feat::Rubble);
    w.chunks.chunk_store(0, 0, 1, 2, r#gen as u32, Some(Box::new(chunk)));
    w.chunks.chunk_store(0, 0, 0, 2, 0, None);

    w.messages.add("You feel better.", MessageType::Recover);
    w.messages.add("The wolf bites you.", MessageType::Hit);
    w.messages.add("The wolf bites you.", MessageType::Hit);
    w.history.add(HistoryFlags::PLAYER_BIRTH, 0, 1, "Began the quest.");
    w.lore[1].sights = 3;
    w.lore[1].saw_blow(0);
    w.knowledge[2].aware = true;
    w.knowledge[9].ignore = true;
    w.artifacts[1].seen = true;
    w.options.set(GameOption::CenterPlayer, true);
    w.options.delay_factor = 1;
    w.turn = 5000;
    w.player_turn = 480;
    w.seed_flavor = 0xfeed;
    w
}

fn fresh_world() -> World {
    World::new(Arc::new(GameData::standard()), GameRng::new(1))
}

#[test]
fn test_full_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Beren");
    let mut saved = populated_world();
    assert!(savefile_save(&mut saved, &path));

    let mut loaded = fresh_world();
    assert!(savefile_load(&mut loaded, &path), "{:?}", loaded.messages.last_text());

    assert_eq!(loaded.player, saved.player);
    assert_eq!(loaded.monsters, saved.monsters);
    assert_eq!(loaded.objects, saved.objects);
    assert_eq!(loaded.traps, saved.traps);
    assert_eq!(loaded.cave, saved.cave);
    assert_eq!(loaded.messages, saved.messages);
    assert_eq!(loaded.history, saved.history);
    assert_eq!(loaded.lore, saved.lore);
    assert_eq!(loaded.knowledge, saved.knowledge);
    assert_eq!(loaded.artifacts, saved.artifacts);
    assert_eq!(loaded.quests, saved.quests);
    assert_eq!(loaded.options, saved.options);
    assert_eq!(loaded.gen_locs, saved.gen_locs);
    assert!(loaded.chunks.iter().eq(saved.chunks.iter()));
    assert!(loaded.chunks.adjacency_consistent());
    assert_eq!(loaded.turn, 5000);
    assert_eq!(loaded.player_turn, 480);
    assert_eq!(loaded.seed_flavor, 0xfeed);

    for _ in 0..10 {
        assert_eq!(loaded.rng.randint0(1 << 20), saved.rng.randint0(1 << 20));
    }
}

#[test]
fn test_bonus_wraparound_and_inscriptions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save");
    let mut saved = populated_world();
    assert!(savefile_save(&mut saved, &path));
    let mut loaded = fresh_world();
    assert!(savefile_load(&mut loaded, &path));

    let weapon = loaded.player.equipment[EquipSlot::Weapon as usize]
        .as_ref()
        .unwrap();
    assert_eq!(weapon.bonus_stat[0], -5);
    assert_eq!(loaded.quarks.get(weapon.inscription), "@w1");

    let pack = &loaded.player.inventory;
    assert_eq!(pack[0].inscription, pack[1].inscription);
    assert_eq!(loaded.quarks.get(pack[1].inscription), "!q");
    assert_eq!(loaded.quarks.get(pack[2].inscription), "");
}

#[test]
fn test_level_grids_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save");
    let mut saved = populated_world();
    assert!(savefile_save(&mut saved, &path));
    let mut loaded = fresh_world();
    assert!(savefile_load(&mut loaded, &path));

    let m_idx = loaded.cave.monster(Loc::new(6, 6));
    assert!(m_idx > 0);
    let wolf = loaded.monsters.get(MonsterId(m_idx as u16)).unwrap();
    assert_eq!(loaded.chain(wolf.hold_o_idx).len(), 1);
    assert_eq!(loaded.chain(loaded.cave.object(Loc::new(7, 7))).len(), 2);
    assert_eq!(loaded.cave.monster(Loc::new(5, 5)), sil_core::dungeon::PLAYER_OCCUPANT);
}

#[test]
fn test_second_save_replaces_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save");
    let mut w = populated_world();
    assert!(savefile_save(&mut w, &path));
    w.turn = 6000;
    assert!(savefile_save(&mut w, &path));

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, ["save"]);

    let mut loaded = fresh_world();
    assert!(savefile_load(&mut loaded, &path));
    assert_eq!(loaded.turn, 6000);
}

#[test]
fn test_unwritable_location_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("save");
    let mut w = populated_world();
    assert!(!savefile_save(&mut w, &path));
    assert!(w.messages.last_text().unwrap().starts_with("Failed to save"));
    assert!(!path.exists());
}

#[test]
fn test_missing_file_reports() {
    let dir = tempfile::tempdir().unwrap();
    let mut w = fresh_world();
    assert!(!savefile_load(&mut w, dir.path().join("nobody")));
    assert!(w.messages.last_text().unwrap().starts_with("Error loading savefile"));
}
