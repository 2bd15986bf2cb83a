//! String Interner - Deduplicate tag and attribute names
//!
//! Form templates repeat the same handful of names ("div", "input",
//! "class", "name", "value") thousands of times once fieldsets are cloned,
//! so names are stored once and referenced by a 4-byte id.

use std::collections::HashMap;

/// Interned string ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// String interner for element and attribute names
#[derive(Debug)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    map: HashMap<Box<str>, u32>,
}

/// Names every form template uses
const PRE_INTERNED: &[&str] = &[
    "html", "head", "body", "form", "fieldset", "legend", "div", "span",
    "label", "input", "textarea", "select", "option", "button",
    "id", "class", "name", "value", "type", "hidden",
];

impl StringInterner {
    /// Create an interner with common form names pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(64),
            map: HashMap::with_capacity(64),
        };
        interner.intern("");
        for name in PRE_INTERNED {
            interner.intern(name);
        }
        interner
    }

    /// Intern a string, returning the existing id if already present
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&index) = self.map.get(s) {
            return InternedString(index);
        }
        let index = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), index);
        InternedString(index)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&index| InternedString(index))
    }

    /// Get the string for an interned id
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
