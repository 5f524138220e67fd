use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const DEFAULT_TOP_N: usize = 10;

/// Lowercases `text` and splits it on runs of separator characters.
///
/// Separators are Unicode whitespace plus the ASCII information separators
/// `\x1c`..=`\x1f`, which Python's `str.split()` also breaks on.
/// Punctuation stays attached to its token: `"cat."` and `"cat"` are distinct.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(is_separator)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Occurrence count per distinct token, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyTable {
    counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl WordFrequencyTable {
    pub fn from_text(text: &str) -> Self {
        let mut table = Self::default();
        for token in tokenize(text) {
            table.record(token);
        }
        table
    }

    fn record(&mut self, token: String) {
        let next_slot = self.counts.len();
        match self.index.entry(token) {
            Entry::Occupied(slot) => self.counts[*slot.get()].1 += 1,
            Entry::Vacant(slot) => {
                self.counts.push((slot.key().clone(), 1));
                slot.insert(next_slot);
            }
        }
    }

    pub fn distinct_tokens(&self) -> usize {
        self.counts.len()
    }

    pub fn total_tokens(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Selects at most `limit` entries by descending count.
    ///
    /// The sort is stable, so tied tokens keep the order in which they first appeared.
    pub fn top(&self, limit: usize) -> TopWords {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|left, right| right.1.cmp(&left.1));
        ranked.truncate(limit);
        TopWords { entries: ranked }
    }
}

/// Ranked `(token, count)` pairs. Serializes as a JSON object in ranking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopWords {
    entries: Vec<(String, u64)>,
}

impl TopWords {
    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == token)
            .map(|(_, count)| *count)
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, String> {
        serde_json::to_vec(self)
            .map_err(|error| format!("failed to serialize top words: {error}"))
    }
}

impl Serialize for TopWords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (token, count) in &self.entries {
            map.serialize_entry(token, count)?;
        }
        map.end()
    }
}
