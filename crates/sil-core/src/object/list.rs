//! The global object array
//!
//! Slot 0 is reserved as "none". Freed slots are reused by `o_pop`, so
//! indices stay stable for as long as an object lives and can be persisted
//! as plain integers.

use super::{Object, ObjectId};
use crate::consts::OBJECT_MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectList {
    objs: Vec<Object>,
    count: usize,
}

impl ObjectList {
    pub fn new() -> Self {
        Self {
            objs: vec![Object::default()],
            count: 0,
        }
    }

    /// First free index, growing the array if every slot is in use
    pub fn o_pop(&mut self) -> Option<ObjectId> {
        if let Some(i) = self.objs.iter().skip(1).position(Object::is_empty) {
            return Some(ObjectId(i as u16 + 1));
        }
        if self.objs.len() >= OBJECT_MAX {
            return None;
        }
        self.objs.push(Object::default());
        Some(ObjectId(self.objs.len() as u16 - 1))
    }

    /// Store an object in a free slot
    pub fn insert(&mut self, obj: Object) -> Option<ObjectId> {
        if obj.is_empty() {
            return None;
        }
        let id = self.o_pop()?;
        self.objs[id.0 as usize] = obj;
        self.count += 1;
        Some(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        if id.is_none() {
            return None;
        }
        self.objs.get(id.0 as usize).filter(|o| !o.is_empty())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        if id.is_none() {
            return None;
        }
        self.objs.get_mut(id.0 as usize).filter(|o| !o.is_empty())
    }

    /// Wipe a slot, returning what it held
    pub fn delete(&mut self, id: ObjectId) -> Option<Object> {
        let slot = self.objs.get_mut(id.0 as usize).filter(|o| !o.is_empty())?;
        self.count -= 1;
        Some(std::mem::take(slot))
    }

    /// High-water mark: one past the highest slot ever used
    pub fn o_max(&self) -> usize {
        self.objs.len()
    }

    /// Live objects
    pub fn count(&self) -> usize {
        self.count
    }

    /// Every slot, including the reserved and empty ones
    pub fn slots(&self) -> &[Object] {
        &self.objs
    }

    /// Place an object at an exact index, growing the array as needed.
    /// Used when rebuilding the array from a savefile.
    pub fn set_slot(&mut self, id: ObjectId, obj: Object) -> bool {
        let idx = id.0 as usize;
        if idx == 0 || idx >= OBJECT_MAX {
            return false;
        }
        if idx >= self.objs.len() {
            self.objs.resize(idx + 1, Object::default());
        }
        let was_empty = self.objs[idx].is_empty();
        let is_empty = obj.is_empty();
        self.objs[idx] = obj;
        match (was_empty, is_empty) {
            (true, false) => self.count += 1,
            (false, true) => self.count -= 1,
            _ => {}
        }
        true
    }

    /// Iterate over live objects
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objs
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, o)| !o.is_empty())
            .map(|(i, o)| (ObjectId(i as u16), o))
    }

    pub fn clear(&mut self) {
        self.objs.truncate(1);
        self.count = 0;
    }
}

impl Default for ObjectList {
    fn default() -> Self {
        Self::new()
    }
}
