//! Static vocabulary catalog.
//!
//! Words are grouped into three numbered units. Each unit has a *write* subset
//! (practiced in both quiz modes) and a *read-only* subset (Read mode only).
//! Unit data lives in `unit1.rs` .. `unit3.rs`; this module only combines them.

use std::collections::HashSet;
use std::sync::OnceLock;

mod unit1;
mod unit2;
mod unit3;

pub use unit1::{UNIT1_READ_ONLY_WORDS, UNIT1_WRITE_WORDS};
pub use unit2::{UNIT2_READ_ONLY_WORDS, UNIT2_WRITE_WORDS};
pub use unit3::{UNIT3_READ_ONLY_WORDS, UNIT3_WRITE_WORDS};

/// Identifier of a catalog word. Ids are unique across the whole catalog.
pub type WordId = &'static str;

/// One vocabulary entry. `hanzi` may hold more than one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Word {
    pub id: WordId,
    pub hanzi: &'static str,
    pub pinyin: &'static str,
    pub english: &'static str,
}

impl Word {
    pub const fn new(
        id: WordId,
        hanzi: &'static str,
        pinyin: &'static str,
        english: &'static str,
    ) -> Self {
        Self {
            id,
            hanzi,
            pinyin,
            english,
        }
    }

    /// Characters written one after another in Write mode.
    pub fn characters(&self) -> Vec<char> {
        self.hanzi.trim().chars().collect()
    }

    pub fn first_character(&self) -> Option<char> {
        self.hanzi.trim().chars().next()
    }
}

/// Numbered unit of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    One = 1,
    Two = 2,
    Three = 3,
}

pub const ALL_UNITS: [Unit; 3] = [Unit::One, Unit::Two, Unit::Three];

impl Unit {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Unit::One),
            2 => Some(Unit::Two),
            3 => Some(Unit::Three),
            _ => None,
        }
    }

    pub fn write_words(self) -> &'static [Word] {
        match self {
            Unit::One => &UNIT1_WRITE_WORDS,
            Unit::Two => &UNIT2_WRITE_WORDS,
            Unit::Three => &UNIT3_WRITE_WORDS,
        }
    }

    pub fn read_only_words(self) -> &'static [Word] {
        match self {
            Unit::One => &UNIT1_READ_ONLY_WORDS,
            Unit::Two => &UNIT2_READ_ONLY_WORDS,
            Unit::Three => &UNIT3_READ_ONLY_WORDS,
        }
    }
}

// Keeps first occurrence order; later duplicates of an id are dropped.
fn unique_by_id(words: impl IntoIterator<Item = &'static Word>) -> Vec<&'static Word> {
    let mut seen = HashSet::new();
    words.into_iter().filter(|w| seen.insert(w.id)).collect()
}

/// Words practiced in Read mode for the given units (write + read-only subsets).
pub fn read_words_for_units(units: &[Unit]) -> Vec<&'static Word> {
    unique_by_id(
        units
            .iter()
            .flat_map(|u| u.write_words().iter().chain(u.read_only_words())),
    )
}

/// Words practiced in Write mode for the given units.
pub fn write_words_for_units(units: &[Unit]) -> Vec<&'static Word> {
    unique_by_id(units.iter().flat_map(|u| u.write_words().iter()))
}

/// Every word in the catalog, in unit order.
pub fn all_words() -> &'static [&'static Word] {
    static WORDS: OnceLock<Vec<&'static Word>> = OnceLock::new();
    WORDS.get_or_init(|| read_words_for_units(&ALL_UNITS))
}

pub fn word_by_id(id: &str) -> Option<&'static Word> {
    all_words().iter().copied().find(|w| w.id == id)
}
