//! The world context
//!
//! [`World`] owns every piece of live game state. Core routines take
//! `&mut World` instead of reaching for globals; cross references between
//! arrays are plain indices so they can be written out as integers.

mod history;
mod messages;
mod options;
mod quest;
pub mod topten;
mod upkeep;

pub use history::{History, HistoryEntry, HistoryFlags};
pub use messages::{Message, MessageLog, MessageType};
pub use options::{GameOption, OPT_WORDS, OptionSet, WINDOW_MAX, default_user_dir};
pub use quest::Quest;
pub use topten::{HighScore, HighScoreTable, ScoreError, score_points};
pub use upkeep::{Redraw, Update, Upkeep};

use std::sync::Arc;

use crate::combat::RollEvent;
use crate::consts::{DUNGEON_HGT, DUNGEON_WID};
use crate::data::GameData;
use crate::dungeon::{Cave, ChunkList, GenLocList, Loc, PLAYER_OCCUPANT, TrapList};
use crate::monster::{Monster, MonsterId, MonsterList, MonsterLore, MonsterRace};
use crate::object::{ArtifactState, KindKnowledge, Object, ObjectId, ObjectList, QuarkTable};
use crate::player::Player;
use crate::rng::GameRng;

pub struct World {
    pub data: Arc<GameData>,
    pub rng: GameRng,

    pub player: Player,
    pub monsters: MonsterList,
    pub objects: ObjectList,
    pub traps: TrapList,
    pub cave: Cave,
    pub chunks: ChunkList,
    pub gen_locs: GenLocList,

    pub messages: MessageLog,
    pub upkeep: Upkeep,
    pub options: OptionSet,

    pub lore: Vec<MonsterLore>,
    pub knowledge: Vec<KindKnowledge>,
    pub artifacts: Vec<ArtifactState>,
    pub quests: Vec<Quest>,
    pub history: History,
    pub quarks: QuarkTable,

    /// Game turn
    pub turn: i32,
    /// Turns the player has been active
    pub player_turn: i32,
    pub resting_turn: i32,
    pub seed_flavor: u32,
    pub seed_randart: u32,

    /// Monster currently taking its turn
    pub mon_current: Option<MonsterId>,
    /// Roll breakdowns recorded for the front end
    pub roll_events: Vec<RollEvent>,
    /// The Silmarils have been cut from Morgoth's crown
    pub crown_removed: bool,
    /// The live cave has been generated
    pub character_dungeon: bool,
}

impl World {
    pub fn new(data: Arc<GameData>, rng: GameRng) -> Self {
        let lore = vec![MonsterLore::default(); data.races.len()];
        let knowledge = vec![KindKnowledge::default(); data.kinds.len()];
        let artifacts = vec![ArtifactState::default(); data.artifacts.len()];
        let quests = data.quests.clone();
        Self {
            data,
            rng,
            player: Player::default(),
            monsters: MonsterList::new(),
            objects: ObjectList::new(),
            traps: TrapList::new(),
            cave: Cave::new(DUNGEON_HGT, DUNGEON_WID),
            chunks: ChunkList::new(),
            gen_locs: GenLocList::new(),
            messages: MessageLog::new(),
            upkeep: Upkeep::default(),
            options: OptionSet::default(),
            lore,
            knowledge,
            artifacts,
            quests,
            history: History::new(),
            quarks: QuarkTable::new(),
            turn: 1,
            player_turn: 0,
            resting_turn: 0,
            seed_flavor: 0,
            seed_randart: 0,
            mon_current: None,
            roll_events: Vec::new(),
            crown_removed: false,
            character_dungeon: false,
        }
    }

    /// Interrupt whatever the player is doing
    pub fn disturb(&mut self) {
        self.upkeep.disturb_count += 1;
        self.upkeep.resting = false;
        self.upkeep.repeating = 0;
    }

    pub fn msg(&mut self, text: impl Into<String>) {
        self.messages.add(text, MessageType::Generic);
    }

    pub fn race(&self, idx: u16) -> Option<&MonsterRace> {
        self.data.races.get(idx as usize)
    }

    /// Race of a live monster
    pub fn monster_race(&self, id: MonsterId) -> Option<&MonsterRace> {
        self.monsters.get(id).and_then(|m| self.race(m.race))
    }

    /// Move the player to a grid
    pub fn place_player(&mut self, grid: Loc) {
        if self.cave.monster(self.player.grid) == PLAYER_OCCUPANT {
            self.cave.set_monster(self.player.grid, 0);
        }
        self.player.grid = grid;
        self.cave.set_monster(grid, PLAYER_OCCUPANT);
    }

    /// Put a monster into the list and the cave
    pub fn place_monster(&mut self, mon: Monster) -> Option<MonsterId> {
        let grid = mon.grid;
        if self.cave.monster(grid) != 0 {
            return None;
        }
        let id = self.monsters.insert(mon)?;
        self.cave.set_monster(grid, id.0 as i16);
        Some(id)
    }

    /// Move a monster to an empty grid
    pub fn move_monster(&mut self, id: MonsterId, to: Loc) -> bool {
        if !self.cave.is_empty(to) {
            return false;
        }
        let Some(mon) = self.monsters.get_mut(id) else {
            return false;
        };
        let from = mon.grid;
        mon.grid = to;
        self.cave.set_monster(from, 0);
        self.cave.set_monster(to, id.0 as i16);
        true
    }

    /// Remove a monster, dropping what it carried at its feet
    pub fn delete_monster(&mut self, id: MonsterId) -> Option<Monster> {
        let mon = self.monsters.delete(id)?;
        if self.cave.monster(mon.grid) == id.0 as i16 {
            self.cave.set_monster(mon.grid, 0);
        }
        let mut cur = mon.hold_o_idx;
        while let Some(obj) = self.objects.delete(cur) {
            cur = obj.next_o_idx;
            self.floor_carry(mon.grid, obj);
        }
        Some(mon)
    }

    /// Add an object to the top of a floor pile
    pub fn floor_carry(&mut self, grid: Loc, mut obj: Object) -> Option<ObjectId> {
        obj.grid = grid;
        obj.held_m_idx = MonsterId::NONE;
        obj.next_o_idx = self.cave.object(grid);
        let id = self.objects.insert(obj)?;
        self.cave.set_object(grid, id);
        Some(id)
    }

    /// Give an object to a monster
    pub fn monster_carry(&mut self, mid: MonsterId, mut obj: Object) -> Option<ObjectId> {
        let head = self.monsters.get(mid)?.hold_o_idx;
        obj.held_m_idx = mid;
        obj.grid = Loc::default();
        obj.next_o_idx = head;
        let id = self.objects.insert(obj)?;
        if let Some(mon) = self.monsters.get_mut(mid) {
            mon.hold_o_idx = id;
        }
        Some(id)
    }

    /// Objects in a chain, head first
    pub fn chain(&self, head: ObjectId) -> Vec<ObjectId> {
        let mut ids = Vec::new();
        let mut cur = head;
        while let Some(obj) = self.objects.get(cur) {
            ids.push(cur);
            cur = obj.next_o_idx;
            if ids.len() > self.objects.o_max() {
                log::warn!("object chain loops at {}", cur.0);
                break;
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Feat;

    fn world() -> World {
        let mut w = World::new(Arc::new(GameData::standard()), GameRng::new(1));
        w.cave.fill(Loc::new(1, 1), Loc::new(10, 10), Feat::Floor);
        w
    }

    fn item(kind: u16) -> Object {
        Object {
            kind,
            number: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_floor_pile_order() {
        let mut w = world();
        let g = Loc::new(3, 3);
        let a = w.floor_carry(g, item(1)).unwrap();
        let b = w.floor_carry(g, item(2)).unwrap();
        assert_eq!(w.chain(w.cave.object(g)), vec![b, a]);
    }

    #[test]
    fn test_dead_monster_drops_items() {
        let mut w = world();
        let g = Loc::new(4, 4);
        let mid = w
            .place_monster(Monster { race: 1, hp: 5, maxhp: 5, grid: g, ..Default::default() })
            .unwrap();
        w.monster_carry(mid, item(3)).unwrap();
        w.delete_monster(mid);
        assert_eq!(w.cave.monster(g), 0);
        let pile = w.chain(w.cave.object(g));
        assert_eq!(pile.len(), 1);
        assert!(w.objects.get(pile[0]).unwrap().held_m_idx.is_none());
    }

    #[test]
    fn test_place_player_clears_old_square() {
        let mut w = world();
        w.place_player(Loc::new(2, 2));
        w.place_player(Loc::new(2, 3));
        assert_eq!(w.cave.monster(Loc::new(2, 2)), 0);
        assert_eq!(w.cave.monster(Loc::new(2, 3)), PLAYER_OCCUPANT);
    }
}
