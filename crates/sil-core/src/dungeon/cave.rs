//! The live cave: per-square info flags, terrain and occupant indices

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use super::Loc;
use crate::bitset::byte_flags;
use crate::object::ObjectId;

bitflags! {
    /// Per-square info flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SquareFlags: u16 {
        /// Self-lit
        const GLOW = 1 << 0;
        /// Remembered by the player
        const MARK = 1 << 1;
        const VAULT = 1 << 2;
        const ROOM = 1 << 3;
        const SEEN = 1 << 4;
        const VIEW = 1 << 5;
        const TEMP = 1 << 6;
        const WALL = 1 << 7;
        const TRAP = 1 << 8;
        const INVIS = 1 << 9;
        const FEEL = 1 << 10;
        const WASSEEN = 1 << 11;
        const CHASM_EDGE = 1 << 12;
        const NO_MAP = 1 << 13;
    }
}

byte_flags!(SquareFlags, u16, crate::consts::SQUARE_SIZE);

/// Terrain feature
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    FromRepr,
)]
#[repr(u8)]
pub enum Feat {
    #[default]
    None = 0,
    Floor = 1,
    Closed = 2,
    Open = 3,
    Broken = 4,
    LessStair = 5,
    MoreStair = 6,
    LessShaft = 7,
    MoreShaft = 8,
    Secret = 9,
    Rubble = 10,
    Quartz = 11,
    Granite = 12,
    Perm = 13,
    Chasm = 14,
    Forge = 15,
}

impl Feat {
    /// Can be walked through
    pub const fn is_passable(self) -> bool {
        matches!(
            self,
            Feat::Floor
                | Feat::Open
                | Feat::Broken
                | Feat::LessStair
                | Feat::MoreStair
                | Feat::LessShaft
                | Feat::MoreShaft
                | Feat::Chasm
        )
    }

    /// Lets projections through
    pub const fn is_projectable(self) -> bool {
        self.is_passable()
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, Feat::Granite | Feat::Quartz | Feat::Perm | Feat::Secret)
    }
}

/// Occupant value marking the player in the monster grid
pub const PLAYER_OCCUPANT: i16 = -1;

/// A rectangular grid of squares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cave {
    pub height: i32,
    pub width: i32,
    pub depth: i32,
    info: Vec<SquareFlags>,
    feat: Vec<Feat>,
    m_idx: Vec<i16>,
    o_idx: Vec<ObjectId>,
}

impl Cave {
    /// A cave of solid granite
    pub fn new(height: i32, width: i32) -> Self {
        let n = (height.max(0) * width.max(0)) as usize;
        Self {
            height,
            width,
            depth: 0,
            info: vec![SquareFlags::empty(); n],
            feat: vec![Feat::Granite; n],
            m_idx: vec![0; n],
            o_idx: vec![ObjectId::NONE; n],
        }
    }

    pub fn in_bounds(&self, grid: Loc) -> bool {
        grid.y >= 0 && grid.x >= 0 && grid.y < self.height && grid.x < self.width
    }

    /// On the map and not on the outer wall
    pub fn in_bounds_fully(&self, grid: Loc) -> bool {
        grid.y > 0 && grid.x > 0 && grid.y < self.height - 1 && grid.x < self.width - 1
    }

    fn idx(&self, grid: Loc) -> Option<usize> {
        self.in_bounds(grid)
            .then(|| (grid.y * self.width + grid.x) as usize)
    }

    pub fn feat(&self, grid: Loc) -> Feat {
        self.idx(grid).map_or(Feat::None, |i| self.feat[i])
    }

    pub fn set_feat(&mut self, grid: Loc, feat: Feat) {
        if let Some(i) = self.idx(grid) {
            self.feat[i] = feat;
        }
    }

    pub fn info(&self, grid: Loc) -> SquareFlags {
        self.idx(grid).map_or(SquareFlags::empty(), |i| self.info[i])
    }

    pub fn set_info(&mut self, grid: Loc, info: SquareFlags) {
        if let Some(i) = self.idx(grid) {
            self.info[i] = info;
        }
    }

    pub fn has(&self, grid: Loc, flag: SquareFlags) -> bool {
        self.info(grid).contains(flag)
    }

    pub fn on(&mut self, grid: Loc, flag: SquareFlags) {
        if let Some(i) = self.idx(grid) {
            self.info[i].insert(flag);
        }
    }

    pub fn off(&mut self, grid: Loc, flag: SquareFlags) {
        if let Some(i) = self.idx(grid) {
            self.info[i].remove(flag);
        }
    }

    /// Monster index at a square: 0 for none, -1 for the player
    pub fn monster(&self, grid: Loc) -> i16 {
        self.idx(grid).map_or(0, |i| self.m_idx[i])
    }

    pub fn set_monster(&mut self, grid: Loc, m_idx: i16) {
        if let Some(i) = self.idx(grid) {
            self.m_idx[i] = m_idx;
        }
    }

    /// Top of the floor pile at a square
    pub fn object(&self, grid: Loc) -> ObjectId {
        self.idx(grid).map_or(ObjectId::NONE, |i| self.o_idx[i])
    }

    pub fn set_object(&mut self, grid: Loc, o_idx: ObjectId) {
        if let Some(i) = self.idx(grid) {
            self.o_idx[i] = o_idx;
        }
    }

    pub fn is_lit(&self, grid: Loc) -> bool {
        self.has(grid, SquareFlags::GLOW)
    }

    pub fn is_passable(&self, grid: Loc) -> bool {
        self.feat(grid).is_passable()
    }

    /// Passable and unoccupied
    pub fn is_empty(&self, grid: Loc) -> bool {
        self.is_passable(grid) && self.monster(grid) == 0
    }

    /// Row-major iteration over every square
    pub fn grids(&self) -> impl Iterator<Item = Loc> + use<> {
        let (h, w) = (self.height, self.width);
        (0..h).flat_map(move |y| (0..w).map(move |x| Loc::new(y, x)))
    }

    /// Whether a straight projection from `from` reaches `to` without
    /// passing through an impassable square
    pub fn projectable(&self, from: Loc, to: Loc) -> bool {
        let dy = to.y - from.y;
        let dx = to.x - from.x;
        let steps = dy.abs().max(dx.abs());
        for i in 1..steps {
            let y = from.y + (dy * i + dy.signum() * steps / 2) / steps;
            let x = from.x + (dx * i + dx.signum() * steps / 2) / steps;
            if !self.feat(Loc::new(y, x)).is_projectable() {
                return false;
            }
        }
        true
    }

    /// Fill a rectangle with one feature
    pub fn fill(&mut self, top_left: Loc, bottom_right: Loc, feat: Feat) {
        for y in top_left.y..=bottom_right.y {
            for x in top_left.x..=bottom_right.x {
                self.set_feat(Loc::new(y, x), feat);
            }
        }
    }
}
