use std::sync::Arc;

use chrono::{Local, TimeZone};
use sil_core::world::topten::{ESCAPE_POINTS, HighScore, HighScoreTable, MORGOTH_POINTS};
use sil_core::world::{World, score_points};
use sil_core::{GameData, GameRng, MAX_SILMARILS};

fn entry(who: &str, turns: i64, silmarils: i64, depth: i64) -> HighScore {
    HighScore {
        what: "0.1.0".into(),
        who: who.into(),
        turns: turns.to_string(),
        silmarils: silmarils.to_string(),
        cur_dep: depth.to_string(),
        max_dep: depth.to_string(),
        escaped: "f".into(),
        morgoth_slain: "f".into(),
        ..Default::default()
    }
}

#[test]
fn test_silmarils_always_raise_score() {
    for depth in [1, 10, 20] {
        let mut last = score_points(&entry("a", 5000, 0, depth));
        for sil in 1..=MAX_SILMARILS as i64 {
            let now = score_points(&entry("a", 5000, sil, depth));
            assert!(now > last, "depth {depth}, {sil} silmarils");
            last = now;
        }
    }
}

#[test]
fn test_slow_games_score_lower() {
    let mut last = i64::MAX;
    for turns in (0..100_000).step_by(7919) {
        let now = score_points(&entry("a", turns, 0, 8));
        assert!(now < last, "turns {turns}");
        last = now;
    }
}

#[test]
fn test_morgoth_dominates() {
    let mut best = entry("a", 0, MAX_SILMARILS as i64, 0);
    best.escaped = "t".into();
    let mut slayer = entry("b", 99_999, 0, 1);
    slayer.morgoth_slain = "t".into();
    assert!(score_points(&slayer) > score_points(&best));
    assert!(MORGOTH_POINTS > ESCAPE_POINTS + MAX_SILMARILS as i64 * 10_000_000 + 21 * 100_000);
}

#[test]
fn test_table_sorted_whatever_the_insert_order() {
    let depths = [7, 2, 15, 11, 4, 19, 1];
    let mut table = HighScoreTable::new();
    for (i, d) in depths.iter().enumerate() {
        table.highscore_add(entry(&format!("p{i}"), 1000, 0, *d));
    }
    let points: Vec<i64> = table.entries().iter().map(score_points).collect();
    assert!(points.windows(2).all(|w| w[0] > w[1]));
    assert_eq!(table.len(), depths.len());
}

#[test]
fn test_equal_score_goes_first() {
    let mut table = HighScoreTable::new();
    table.highscore_add(entry("deep", 1000, 0, 12));
    table.highscore_add(entry("old", 1000, 0, 5));
    table.highscore_add(entry("shallow", 1000, 0, 2));
    assert_eq!(table.highscore_add(entry("new", 1000, 0, 5)), Some(1));
    let names: Vec<&str> = table.entries().iter().map(|e| e.who.as_str()).collect();
    assert_eq!(names, ["deep", "new", "old", "shallow"]);
}

#[test]
fn test_table_survives_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.raw");

    let mut w = World::new(Arc::new(GameData::standard()), GameRng::new(5));
    w.player.name = "Turin".into();
    w.player.depth = 9;
    w.player.max_depth = 9;
    w.player.died_from = "Glaurung".into();
    w.player_turn = 4321;
    let when = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let mut table = HighScoreTable::new();
    table.highscore_add(HighScore::from_world(&w, when));
    table.highscore_add(entry("other", 100, 0, 3));
    table.save(&path).unwrap();

    let loaded = HighScoreTable::load(&path).unwrap();
    assert_eq!(loaded, table);
    assert_eq!(loaded.entries()[0].who, "Turin");
    assert_eq!(loaded.entries()[0].day, "@20240301");
    assert_eq!(loaded.entries()[0].pts, score_points(&loaded.entries()[0]).to_string());
}
