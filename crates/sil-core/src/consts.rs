//! Engine-wide limits and dimensions
//!
//! Array bounds in this file double as the compiled maxima the savefile
//! loader checks declared sizes against.

/// Physical attributes: strength, dexterity, constitution, grace
pub const STAT_MAX: usize = 4;

/// Skill channels
pub const SKILL_MAX: usize = 8;

/// Abilities available under each skill (bits of a `u16`)
pub const ABILITIES_PER_SKILL: usize = 16;

/// Bytes of object flags
pub const OF_SIZE: usize = 8;
/// Bytes of curse flags
pub const CF_SIZE: usize = 4;
/// Bytes of identification flags
pub const IF_SIZE: usize = 4;
/// Bytes of trap flags
pub const TRF_SIZE: usize = 2;
/// Bytes of square info flags
pub const SQUARE_SIZE: usize = 2;
/// Bytes of monster race flags
pub const RF_SIZE: usize = 8;
/// Bytes of monster spell flags
pub const RSF_SIZE: usize = 4;
/// Bytes of history entry flags
pub const HIST_SIZE: usize = 2;

/// Percentage resistances carried by objects (one per element)
pub const MAX_P_RES: usize = 5;
/// Miscellaneous numeric bonuses carried by objects
pub const MAX_P_BONUS: usize = 6;
/// Slay multipliers carried by objects
pub const MAX_P_SLAY: usize = 8;
/// Brand multipliers carried by objects
pub const MAX_P_BRAND: usize = 5;

/// Equipment slots
pub const EQUIP_MAX: usize = 12;
/// Backpack capacity
pub const PACK_MAX: usize = 23;

/// Maximum monster blows
pub const MONSTER_BLOW_MAX: usize = 4;

/// Dungeon dimensions
pub const DUNGEON_HGT: i32 = 66;
pub const DUNGEON_WID: i32 = 198;

/// Chunk dimensions
pub const CHUNK_HGT: i32 = 16;
pub const CHUNK_WID: i32 = 16;

/// Adjacency slots of a chunk ref: up, the nine keypad directions, down
pub const CHUNK_ADJ: usize = 11;
/// Capacity of the chunk list
pub const MAX_CHUNKS: usize = 256;
/// Marker for an empty adjacency slot
pub const CHUNK_EMPTY: u16 = u16::MAX;
/// Growth increment of the generation-location array
pub const GEN_LOC_INCR: usize = 128;

/// Object array capacity (slot 0 is "none")
pub const OBJECT_MAX: usize = 1024;
/// Monster array capacity (slot 0 is "none")
pub const MONSTER_MAX: usize = 512;
/// Trap array capacity
pub const TRAP_MAX: usize = 256;

/// Messages kept in the log
pub const MESSAGE_MAX: usize = 2048;

/// Entries kept in the character history
pub const HISTORY_MAX: usize = 1024;

/// Entries of the hitpoint history table
pub const PY_MAX_LEVEL: usize = 50;

/// Deepest dungeon level (Morgoth's throne room)
pub const MAX_DEPTH: i32 = 21;

/// Silmarils in Morgoth's crown
pub const MAX_SILMARILS: i32 = 3;

/// High score table capacity
pub const MAX_HISCORES: usize = 100;

/// Energy needed to take a turn
pub const MOVE_ENERGY: u8 = 100;

/// Base separation for critical hits, in tenths of a pound
pub const CRIT_SEPARATION: i32 = 70;

/// Change in separation granted by a critical-hit ability
pub const CRIT_ABILITY_STEP: i32 = 10;

/// Weight monster blows count as for critical hits
pub const MONSTER_BLOW_WEIGHT: i32 = 20;

/// Stun added per critical die of a stunning blow
pub const STUN_PER_CRIT: i32 = 10;
