//! The monster array, with slot recycling

use super::{Monster, MonsterId};
use crate::consts::MONSTER_MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterList {
    mons: Vec<Monster>,
    count: usize,
}

impl MonsterList {
    pub fn new() -> Self {
        Self {
            mons: vec![Monster::default()],
            count: 0,
        }
    }

    /// First free slot, growing the array if needed
    pub fn mon_pop(&mut self) -> Option<MonsterId> {
        if let Some(i) = self.mons.iter().skip(1).position(|m| !m.is_alive()) {
            return Some(MonsterId(i as u16 + 1));
        }
        if self.mons.len() >= MONSTER_MAX {
            return None;
        }
        self.mons.push(Monster::default());
        Some(MonsterId(self.mons.len() as u16 - 1))
    }

    pub fn insert(&mut self, mon: Monster) -> Option<MonsterId> {
        if !mon.is_alive() {
            return None;
        }
        let id = self.mon_pop()?;
        self.mons[id.0 as usize] = mon;
        self.count += 1;
        Some(id)
    }

    pub fn get(&self, id: MonsterId) -> Option<&Monster> {
        if id.is_none() {
            return None;
        }
        self.mons.get(id.0 as usize).filter(|m| m.is_alive())
    }

    pub fn get_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        if id.is_none() {
            return None;
        }
        self.mons.get_mut(id.0 as usize).filter(|m| m.is_alive())
    }

    pub fn delete(&mut self, id: MonsterId) -> Option<Monster> {
        if id.is_none() {
            return None;
        }
        let slot = self.mons.get_mut(id.0 as usize).filter(|m| m.is_alive())?;
        self.count -= 1;
        Some(std::mem::take(slot))
    }

    /// One past the highest slot ever used
    pub fn max(&self) -> usize {
        self.mons.len()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Place a monster at an exact slot, as when loading
    pub fn set_slot(&mut self, id: MonsterId, mon: Monster) -> bool {
        let idx = id.0 as usize;
        if idx == 0 || idx >= MONSTER_MAX {
            return false;
        }
        if idx >= self.mons.len() {
            self.mons.resize(idx + 1, Monster::default());
        }
        let was = self.mons[idx].is_alive();
        let now = mon.is_alive();
        self.mons[idx] = mon;
        match (was, now) {
            (false, true) => self.count += 1,
            (true, false) => self.count -= 1,
            _ => {}
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonsterId, &Monster)> {
        self.mons
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, m)| m.is_alive())
            .map(|(i, m)| (MonsterId(i as u16), m))
    }

    /// Ids of every live monster
    pub fn ids(&self) -> Vec<MonsterId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn clear(&mut self) {
        self.mons.truncate(1);
        self.count = 0;
    }
}

impl Default for MonsterList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orc() -> Monster {
        Monster {
            race: 4,
            hp: 10,
            maxhp: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_dead_slots_recycled() {
        let mut list = MonsterList::new();
        let a = list.insert(orc()).unwrap();
        let b = list.insert(orc()).unwrap();
        assert_eq!((a, b), (MonsterId(1), MonsterId(2)));
        list.delete(a);
        assert!(list.get(a).is_none());
        assert_eq!(list.insert(orc()), Some(a));
        assert_eq!(list.count(), 2);
    }

    #[test]
    fn test_dead_monster_not_inserted() {
        let mut list = MonsterList::new();
        assert!(list.insert(Monster::default()).is_none());
        assert_eq!(list.count(), 0);
    }
}
