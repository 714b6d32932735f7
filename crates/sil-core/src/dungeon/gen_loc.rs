//! Generation locations
//!
//! Each place the player has visited keeps the seed it was generated from
//! plus the terrain changes made since, so it can be rebuilt on return.

use serde::{Deserialize, Serialize};

use super::{Feat, Loc};
use crate::consts::GEN_LOC_INCR;

/// A persistent change to generated terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TerrainChange {
    pub grid: Loc,
    pub feat: Feat,
}

/// Terrain that must match across a chunk edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeEffect {
    pub grid: Loc,
    pub z: i32,
    pub feat: Feat,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenLoc {
    /// Landmark or location type
    pub kind: u32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub seed: u32,
    pub changes: Vec<TerrainChange>,
    pub effects: Vec<EdgeEffect>,
}

/// Growable list of generation locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenLocList {
    locs: Vec<GenLoc>,
    /// Allocated capacity, grown in fixed steps
    max: usize,
}

impl GenLocList {
    pub fn new() -> Self {
        Self {
            locs: Vec::with_capacity(GEN_LOC_INCR),
            max: GEN_LOC_INCR,
        }
    }

    pub fn len(&self) -> usize {
        self.locs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locs.is_empty()
    }

    /// Current capacity step
    pub fn max(&self) -> usize {
        self.max
    }

    /// Make room for at least `n` entries, growing by whole increments
    pub fn reserve_to(&mut self, n: usize) {
        while self.max < n {
            self.max += GEN_LOC_INCR;
        }
        self.locs.reserve(self.max - self.locs.len());
    }

    pub fn get(&self, idx: usize) -> Option<&GenLoc> {
        self.locs.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut GenLoc> {
        self.locs.get_mut(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenLoc> {
        self.locs.iter()
    }

    pub fn clear(&mut self) {
        self.locs.clear();
        self.max = GEN_LOC_INCR;
    }

    /// Index of the location at a position
    pub fn gen_loc_find(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        self.locs
            .iter()
            .position(|l| l.x == x && l.y == y && l.z == z)
    }

    /// Add a location, returning its index
    pub fn gen_loc_make(&mut self, x: i32, y: i32, z: i32, seed: u32) -> usize {
        self.push(GenLoc {
            x,
            y,
            z,
            seed,
            ..Default::default()
        })
    }

    pub fn push(&mut self, loc: GenLoc) -> usize {
        self.reserve_to(self.locs.len() + 1);
        self.locs.push(loc);
        self.locs.len() - 1
    }

    /// Record a terrain change at a location, replacing an earlier change
    /// to the same grid
    pub fn add_change(&mut self, idx: usize, grid: Loc, feat: Feat) {
        if let Some(loc) = self.locs.get_mut(idx) {
            match loc.changes.iter_mut().find(|c| c.grid == grid) {
                Some(c) => c.feat = feat,
                None => loc.changes.push(TerrainChange { grid, feat }),
            }
        }
    }
}

impl Default for GenLocList {
    fn default() -> Self {
        Self::new()
    }
}
