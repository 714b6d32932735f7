//! Object system
//!
//! Object instances, kinds, the global object array and interned inscriptions.

mod kind;
mod knowledge;
mod list;
mod obj;
mod quark;

pub use kind::{Artifact, ArtifactState, ObjectKind, object_prep};
pub use knowledge::KindKnowledge;
pub use list::ObjectList;
pub use obj::{CurseFlags, IdentFlags, ObjFlags, Object, ObjectId, Tval};
pub use quark::{Quark, QuarkTable};
