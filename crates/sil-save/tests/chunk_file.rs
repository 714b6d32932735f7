//! Chunks written to and read from their own files

use std::sync::Arc;

use sil_core::dungeon::{Feat, Loc, Trap, TrapFlags, chunk_capture, chunk_restore};
use sil_core::monster::Monster;
use sil_core::object::{QuarkTable, object_prep};
use sil_core::{GameData, GameRng, World};
use sil_save::{LoadError, chunk_load, chunk_save};

fn world_with_region() -> World {
    let mut w = World::new(Arc::new(GameData::standard()), GameRng::new(5));
    w.cave.fill(Loc::new(1, 1), Loc::new(30, 40), Feat::Floor);
    w.cave.set_feat(Loc::new(12, 13), Feat::Rubble);
    let id = w
        .place_monster(Monster {
            race: 4,
            grid: Loc::new(11, 11),
            hp: 5,
            maxhp: 5,
            ..Default::default()
        })
        .unwrap();
    let mut flask = object_prep(&w.data.kinds, 3).unwrap();
    flask.inscription = w.quarks.add("=g");
    w.monster_carry(id, flask);
    let torch = object_prep(&w.data.kinds, 9).unwrap();
    w.floor_carry(Loc::new(14, 10), torch);
    w.traps.place(Trap {
        kind: 3,
        grid: Loc::new(15, 15),
        flags: TrapFlags::TRAP | TrapFlags::WEB,
        xtra: 0,
    });
    w
}

#[test]
fn test_chunk_file_roundtrip() {
    let mut w = world_with_region();
    let chunk = chunk_capture(&mut w, Loc::new(10, 10));
    assert_eq!(chunk.monsters.count(), 1);
    assert_eq!(chunk.traps.len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chunk.0.0.0");
    chunk_save(&chunk, &w.quarks, &path).unwrap();

    let mut quarks = QuarkTable::new();
    let back = chunk_load(&path, &mut quarks, &w.data).unwrap();
    assert_eq!(back.cave.feat(Loc::new(2, 3)), Feat::Rubble);
    assert_eq!(back.traps, chunk.traps);
    assert_eq!(back.monsters, chunk.monsters);
    assert_eq!(back.cave, chunk.cave);

    let (_, held) = back.objects.iter().find(|(_, o)| !o.held_m_idx.is_none()).unwrap();
    assert_eq!(quarks.get(held.inscription), "=g");
}

#[test]
fn test_restored_chunk_matches_original_region() {
    let mut w = world_with_region();
    let chunk = chunk_capture(&mut w, Loc::new(10, 10));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chunk");
    chunk_save(&chunk, &w.quarks, &path).unwrap();

    let data = Arc::clone(&w.data);
    let back = chunk_load(&path, &mut w.quarks, &data).unwrap();
    chunk_restore(&mut w, back, Loc::new(10, 10));

    assert!(w.cave.monster(Loc::new(11, 11)) > 0);
    assert!(!w.cave.object(Loc::new(14, 10)).is_none());
    assert!(!w.traps.pit_at(Loc::new(15, 15)));
    assert_eq!(w.traps.at(Loc::new(15, 15)).count(), 1);
}

#[test]
fn test_missing_chunk_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut quarks = QuarkTable::new();
    let data = GameData::standard();
    let err = chunk_load(&dir.path().join("absent"), &mut quarks, &data).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}
