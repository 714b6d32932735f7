//! Object kind and artifact definitions (read-only tables)

use serde::{Deserialize, Serialize};

use super::{ObjFlags, Object, Tval};

/// Base definition shared by every instance of a kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectKind {
    pub name: String,
    pub tval: Tval,
    pub sval: u8,
    pub pval: i16,
    pub weight: i16,
    pub att: i16,
    pub dd: u8,
    pub ds: u8,
    pub evn: i16,
    pub pd: u8,
    pub ps: u8,
    pub flags: ObjFlags,
    pub level: u8,
    pub cost: i32,
}

/// Special named item definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub tval: Tval,
    pub sval: u8,
    pub flags: ObjFlags,
}

/// Per-game artifact status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtifactState {
    pub created: bool,
    pub seen: bool,
    pub everseen: bool,
    pub lost: bool,
}

/// Build a fresh single instance of kind `kidx`
pub fn object_prep(kinds: &[ObjectKind], kidx: u16) -> Option<Object> {
    let kind = kinds.get(kidx as usize)?;
    if kidx == 0 {
        return None;
    }
    Some(Object {
        kind: kidx,
        tval: kind.tval,
        sval: kind.sval,
        pval: kind.pval,
        number: 1,
        weight: kind.weight,
        att: kind.att,
        dd: kind.dd,
        ds: kind.ds,
        evn: kind.evn,
        pd: kind.pd,
        ps: kind.ps,
        flags: kind.flags,
        ..Default::default()
    })
}
