//! Interned inscription strings

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Handle to an interned string; `Quark::EMPTY` is the empty string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Quark(pub u16);

impl Quark {
    pub const EMPTY: Quark = Quark(0);
}

/// String interner; equal strings collapse to the same handle
#[derive(Debug, Clone)]
pub struct QuarkTable {
    strings: Vec<String>,
    lookup: HashMap<String, Quark>,
}

impl QuarkTable {
    pub fn new() -> Self {
        let mut lookup = HashMap::new();
        lookup.insert(String::new(), Quark::EMPTY);
        Self {
            strings: vec![String::new()],
            lookup,
        }
    }

    /// Intern a string, returning the existing handle if already known
    pub fn add(&mut self, s: &str) -> Quark {
        if let Some(q) = self.lookup.get(s) {
            return *q;
        }
        let q = Quark(self.strings.len() as u16);
        self.strings.push(s.to_string());
        self.lookup.insert(s.to_string(), q);
        q
    }

    /// Text of a handle; unknown handles read as empty
    pub fn get(&self, q: Quark) -> &str {
        self.strings.get(q.0 as usize).map(String::as_str).unwrap_or("")
    }

    /// Number of interned strings, including the empty one
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }
}

impl Default for QuarkTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_strings_share_handle() {
        let mut q = QuarkTable::new();
        let a = q.add("@w1");
        let b = q.add("@w1");
        let c = q.add("!d");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(q.get(c), "!d");
    }

    #[test]
    fn test_empty_is_reserved() {
        let mut q = QuarkTable::new();
        assert_eq!(q.add(""), Quark::EMPTY);
        assert_eq!(q.get(Quark::EMPTY), "");
        assert_eq!(q.get(Quark(999)), "");
    }
}
