//! Diffable sequences
//!
//! The engine never looks at raw input directly. Every input is wrapped in a
//! [`Sequence`] which hands out its comparison keys once, up front:
//!
//! - `Elements::Hashes`: keys are already integers (character codes, token ids)
//!   and are compared directly.
//! - `Elements::Strings`: keys are strings; the engine hashes them with
//!   [`string_hash`] and falls back to exact string comparison on hash equality.
//!
//! A sequence may additionally expose a *strict* element per index, the exact
//! untransformed content, which the prettifier uses to avoid hiding a real
//! difference behind a normalized comparison key.

use std::borrow::Cow;

const STRING_HASH_SEED: i32 = 149_417;

/// Comparison keys of a sequence, decided once by the sequence itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Elements<'s> {
    Hashes(Cow<'s, [i32]>),
    Strings(Vec<&'s str>),
}

impl Elements<'_> {
    pub fn len(&self) -> usize {
        match self {
            Elements::Hashes(hashes) => hashes.len(),
            Elements::Strings(strings) => strings.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait Sequence {
    /// The comparison keys of every element, in order.
    fn elements(&self) -> Elements<'_>;

    /// The exact content of the element at `index`, if the sequence keeps one.
    fn strict_element(&self, _index: usize) -> Option<&str> {
        None
    }
}

fn number_hash(value: i32, hash: i32) -> i32 {
    hash.wrapping_mul(31).wrapping_add(value)
}

/// Multiplicative rolling hash over the characters of `s`, seeded with `hash`.
pub fn string_hash(s: &str, hash: i32) -> i32 {
    s.chars().fold(number_hash(STRING_HASH_SEED, hash), |hash, c| {
        number_hash(c as i32, hash)
    })
}

/// The characters of a single string, compared by code point.
#[derive(Debug, Clone)]
pub struct StringSequence {
    codes: Vec<i32>,
}

impl StringSequence {
    pub fn new(source: &str) -> Self {
        Self {
            codes: source.chars().map(|c| c as i32).collect(),
        }
    }
}

impl Sequence for StringSequence {
    fn elements(&self) -> Elements<'_> {
        Elements::Hashes(Cow::Borrowed(&self.codes))
    }
}

/// A plain list of strings, compared by hash and then exactly.
#[derive(Debug, Clone)]
pub struct StringArraySequence<'s> {
    items: Vec<&'s str>,
}

impl<'s> StringArraySequence<'s> {
    pub fn new<S: AsRef<str>>(items: &'s [S]) -> Self {
        Self {
            items: items.iter().map(AsRef::as_ref).collect(),
        }
    }
}

impl Sequence for StringArraySequence<'_> {
    fn elements(&self) -> Elements<'_> {
        Elements::Strings(self.items.clone())
    }

    fn strict_element(&self, index: usize) -> Option<&str> {
        self.items.get(index).copied()
    }
}
