//! Semi-persistent world chunks
//!
//! The surface is divided into fixed-size chunks. A [`ChunkRef`] records
//! where a chunk sits and which chunks surround it; its payload is only
//! present while the chunk is stored away from the live cave.

use hashbrown::HashMap;

use super::{Cave, DDX, DDY, Loc, Trap};
use crate::consts::{CHUNK_ADJ, CHUNK_EMPTY, CHUNK_HGT, CHUNK_WID, MAX_CHUNKS};
use crate::monster::{MonsterId, MonsterList};
use crate::object::{ObjectId, ObjectList};
use crate::world::World;

/// Adjacency slot for the chunk one level up
pub const ADJ_ABOVE: usize = 0;
/// Adjacency slot holding the chunk itself
pub const ADJ_SELF: usize = 5;
/// Adjacency slot for the chunk one level down
pub const ADJ_BELOW: usize = 10;

/// Offset (z, y, x) covered by an adjacency slot
///
/// Slots 1 to 9 follow the keypad on the same level.
pub const fn adjacent_offset(slot: usize) -> (i32, i32, i32) {
    match slot {
        ADJ_ABOVE => (-1, 0, 0),
        ADJ_BELOW => (1, 0, 0),
        s => (0, DDY[s], DDX[s]),
    }
}

/// A stored chunk payload
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub cave: Cave,
    pub objects: ObjectList,
    pub monsters: MonsterList,
    pub traps: Vec<Trap>,
}

impl Chunk {
    /// An empty payload of the standard chunk size
    pub fn new() -> Self {
        Self {
            cave: Cave::new(CHUNK_HGT, CHUNK_WID),
            objects: ObjectList::new(),
            monsters: MonsterList::new(),
            traps: Vec::new(),
        }
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry in the chunk list
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkRef {
    /// Stores since this chunk was last touched
    pub age: u16,
    pub region: u16,
    pub z: i32,
    pub y: i32,
    pub x: i32,
    /// Index into the generation location list
    pub gen_loc_idx: u32,
    /// Chunk list indices of the neighbours, or [`CHUNK_EMPTY`]
    pub adjacent: [u16; CHUNK_ADJ],
    pub chunk: Option<Box<Chunk>>,
}

impl Default for ChunkRef {
    fn default() -> Self {
        Self {
            age: 0,
            region: 0,
            z: 0,
            y: 0,
            x: 0,
            gen_loc_idx: 0,
            adjacent: [CHUNK_EMPTY; CHUNK_ADJ],
            chunk: None,
        }
    }
}

/// The master chunk list
#[derive(Debug, Clone, Default)]
pub struct ChunkList {
    refs: Vec<ChunkRef>,
}

impl ChunkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&ChunkRef> {
        self.refs.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut ChunkRef> {
        self.refs.get_mut(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChunkRef> {
        self.refs.iter()
    }

    pub fn clear(&mut self) {
        self.refs.clear();
    }

    /// Append a reference as read from a savefile
    pub fn push(&mut self, r: ChunkRef) -> bool {
        if self.refs.len() >= MAX_CHUNKS {
            return false;
        }
        self.refs.push(r);
        true
    }

    /// Index of the chunk at a position
    pub fn chunk_find(&self, z: i32, y: i32, x: i32) -> Option<usize> {
        self.refs
            .iter()
            .position(|r| r.z == z && r.y == y && r.x == x)
    }

    /// Record a chunk, replacing any existing entry for the same position.
    /// When the list is full the oldest entry is evicted.
    pub fn chunk_store(
        &mut self,
        z: i32,
        y: i32,
        x: i32,
        region: u16,
        gen_loc_idx: u32,
        chunk: Option<Box<Chunk>>,
    ) -> usize {
        for r in &mut self.refs {
            r.age = r.age.saturating_add(1);
        }
        let entry = ChunkRef {
            age: 0,
            region,
            z,
            y,
            x,
            gen_loc_idx,
            adjacent: [CHUNK_EMPTY; CHUNK_ADJ],
            chunk,
        };
        let idx = if let Some(i) = self.chunk_find(z, y, x) {
            self.refs[i] = entry;
            i
        } else if self.refs.len() < MAX_CHUNKS {
            self.refs.push(entry);
            self.refs.len() - 1
        } else {
            let oldest = self.oldest();
            log::debug!("evicting chunk {oldest} to make room");
            self.refs[oldest] = entry;
            oldest
        };
        self.chunk_fix_all();
        idx
    }

    /// Take a stored payload out of the list, leaving the reference
    pub fn take_chunk(&mut self, idx: usize) -> Option<Box<Chunk>> {
        let r = self.refs.get_mut(idx)?;
        r.age = 0;
        r.chunk.take()
    }

    fn oldest(&self) -> usize {
        self.refs
            .iter()
            .enumerate()
            .max_by_key(|(_, r)| r.age)
            .map_or(0, |(i, _)| i)
    }

    /// Rebuild every adjacency slot from chunk positions
    pub fn chunk_fix_all(&mut self) {
        let positions: HashMap<(i32, i32, i32), u16> = self
            .refs
            .iter()
            .enumerate()
            .map(|(i, r)| ((r.z, r.y, r.x), i as u16))
            .collect();
        for r in &mut self.refs {
            for slot in 0..CHUNK_ADJ {
                let (dz, dy, dx) = adjacent_offset(slot);
                let want = (r.z + dz, r.y + dy, r.x + dx);
                r.adjacent[slot] = positions.get(&want).copied().unwrap_or(CHUNK_EMPTY);
            }
        }
    }

    /// Check that adjacency slots refer to valid entries and mirror each other
    pub fn adjacency_consistent(&self) -> bool {
        self.refs.iter().enumerate().all(|(i, r)| {
            r.adjacent.iter().enumerate().all(|(slot, &a)| {
                if a == CHUNK_EMPTY {
                    return true;
                }
                let Some(other) = self.refs.get(a as usize) else {
                    return false;
                };
                other.adjacent[CHUNK_ADJ - 1 - slot] == i as u16
            })
        })
    }
}

/// Move the chunk-sized region at `top_left` out of the live cave
///
/// Terrain and flags are copied; monsters, their carried objects, floor
/// objects and traps are moved into the payload with fresh indices.
pub fn chunk_capture(world: &mut World, top_left: Loc) -> Chunk {
    let mut chunk = Chunk::new();
    for y in 0..CHUNK_HGT {
        for x in 0..CHUNK_WID {
            let local = Loc::new(y, x);
            let grid = top_left.offset(y, x);
            chunk.cave.set_feat(local, world.cave.feat(grid));
            chunk.cave.set_info(local, world.cave.info(grid));

            let m_idx = world.cave.monster(grid);
            if m_idx > 0 {
                if let Some(mut mon) = world.monsters.delete(MonsterId(m_idx as u16)) {
                    mon.grid = local;
                    mon.hold_o_idx =
                        move_chain(&mut world.objects, &mut chunk.objects, mon.hold_o_idx, None);
                    let held = mon.hold_o_idx;
                    if let Some(id) = chunk.monsters.insert(mon) {
                        relink_held(&mut chunk.objects, held, id);
                        chunk.cave.set_monster(local, id.0 as i16);
                    }
                }
                world.cave.set_monster(grid, 0);
            }

            let pile = world.cave.object(grid);
            if !pile.is_none() {
                let top = move_chain(&mut world.objects, &mut chunk.objects, pile, Some(local));
                chunk.cave.set_object(local, top);
                world.cave.set_object(grid, ObjectId::NONE);
            }
        }
    }
    chunk.traps = world.traps.drain_region(top_left, CHUNK_HGT, CHUNK_WID);
    chunk
}

/// Put a stored payload back into the live cave at `top_left`
pub fn chunk_restore(world: &mut World, mut chunk: Chunk, top_left: Loc) {
    for y in 0..CHUNK_HGT {
        for x in 0..CHUNK_WID {
            let local = Loc::new(y, x);
            let grid = top_left.offset(y, x);
            world.cave.set_feat(grid, chunk.cave.feat(local));
            world.cave.set_info(grid, chunk.cave.info(local));

            let m_idx = chunk.cave.monster(local);
            if m_idx > 0 {
                if let Some(mut mon) = chunk.monsters.delete(MonsterId(m_idx as u16)) {
                    mon.grid = grid;
                    mon.hold_o_idx =
                        move_chain(&mut chunk.objects, &mut world.objects, mon.hold_o_idx, None);
                    let held = mon.hold_o_idx;
                    if let Some(id) = world.monsters.insert(mon) {
                        relink_held(&mut world.objects, held, id);
                        world.cave.set_monster(grid, id.0 as i16);
                    }
                }
            }

            let pile = chunk.cave.object(local);
            if !pile.is_none() {
                let top = move_chain(&mut chunk.objects, &mut world.objects, pile, Some(grid));
                world.cave.set_object(grid, top);
            }
        }
    }
    for mut trap in chunk.traps.drain(..) {
        trap.grid = top_left.offset(trap.grid.y, trap.grid.x);
        world.traps.place(trap);
    }
}

/// Move a `next_o_idx` chain between object lists, returning the new head
fn move_chain(
    from: &mut ObjectList,
    to: &mut ObjectList,
    head: ObjectId,
    grid: Option<Loc>,
) -> ObjectId {
    let mut moved = Vec::new();
    let mut cur = head;
    while let Some(obj) = from.delete(cur) {
        cur = obj.next_o_idx;
        moved.push(obj);
    }
    let mut next = ObjectId::NONE;
    for mut obj in moved.into_iter().rev() {
        obj.next_o_idx = next;
        if let Some(g) = grid {
            obj.grid = g;
        }
        match to.insert(obj) {
            Some(id) => next = id,
            None => log::warn!("object list full, dropping object"),
        }
    }
    next
}

fn relink_held(objects: &mut ObjectList, head: ObjectId, owner: MonsterId) {
    let mut cur = head;
    while let Some(obj) = objects.get_mut(cur) {
        obj.held_m_idx = owner;
        cur = obj.next_o_idx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_offsets() {
        assert_eq!(adjacent_offset(ADJ_ABOVE), (-1, 0, 0));
        assert_eq!(adjacent_offset(ADJ_BELOW), (1, 0, 0));
        assert_eq!(adjacent_offset(ADJ_SELF), (0, 0, 0));
        assert_eq!(adjacent_offset(8), (0, -1, 0));
        assert_eq!(adjacent_offset(3), (0, 1, 1));
    }

    #[test]
    fn test_fix_all_is_mutual() {
        let mut list = ChunkList::new();
        list.chunk_store(0, 0, 0, 1, 0, None);
        list.chunk_store(0, 0, 1, 1, 0, None);
        list.chunk_store(0, 1, 1, 1, 0, None);
        list.chunk_store(1, 0, 0, 1, 0, None);
        let a = list.get(0).unwrap();
        assert_eq!(a.adjacent[6], 1);
        assert_eq!(a.adjacent[3], 2);
        assert_eq!(a.adjacent[ADJ_BELOW], 3);
        assert_eq!(a.adjacent[ADJ_SELF], 0);
        assert_eq!(a.adjacent[ADJ_ABOVE], CHUNK_EMPTY);
        assert!(list.adjacency_consistent());
    }

    #[test]
    fn test_fix_all_repairs_without_duplicating() {
        let mut list = ChunkList::new();
        list.chunk_store(0, 0, 0, 1, 0, None);
        list.chunk_store(0, 0, 1, 1, 0, None);
        list.get_mut(0).unwrap().adjacent = [7; CHUNK_ADJ];
        list.chunk_fix_all();
        assert!(list.adjacency_consistent());
        let linked = list.get(0).unwrap().adjacent.iter().filter(|&&a| a == 1).count();
        assert_eq!(linked, 1);
    }

    #[test]
    fn test_store_replaces_same_position() {
        let mut list = ChunkList::new();
        let i = list.chunk_store(0, 2, 2, 1, 0, None);
        let j = list.chunk_store(0, 2, 2, 4, 0, Some(Box::new(Chunk::new())));
        assert_eq!(i, j);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(i).unwrap().region, 4);
        assert!(list.take_chunk(i).is_some());
        assert!(list.get(i).unwrap().chunk.is_none());
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut list = ChunkList::new();
        for i in 0..MAX_CHUNKS as i32 {
            list.chunk_store(0, 0, i, 0, 0, None);
        }
        let idx = list.chunk_store(0, 5, 5, 0, 0, None);
        assert_eq!(idx, 0);
        assert_eq!(list.len(), MAX_CHUNKS);
        assert!(list.chunk_find(0, 0, 0).is_none());
    }
}
