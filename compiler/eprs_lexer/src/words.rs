//! Caller-registered word list with longest-match lookup.
//!
//! Words are bucketed by their first byte; each bucket is kept sorted
//! longest-first so the first hit is the longest match.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Index of literal words the lexer should emit as single `WORD` tokens.
#[derive(Clone, Debug, Default)]
pub struct WordList {
    words: Vec<Box<[u8]>>,
    by_first: FxHashMap<u8, SmallVec<[u32; 4]>>,
}

impl WordList {
    /// Build a word list. Empty words and duplicates are dropped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = WordList::default();
        for word in words {
            list.insert(word.as_ref());
        }
        list
    }

    fn insert(&mut self, word: &str) {
        let bytes = word.as_bytes();
        let Some(&first) = bytes.first() else {
            return;
        };
        if self.words.iter().any(|w| &**w == bytes) {
            return;
        }
        let Ok(id) = u32::try_from(self.words.len()) else {
            return;
        };
        self.words.push(bytes.into());

        let words = &self.words;
        let bucket = self.by_first.entry(first).or_default();
        bucket.push(id);
        bucket.sort_by_key(|&i| std::cmp::Reverse(words[i as usize].len()));
    }

    /// Number of registered words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if no words are registered.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length of the longest registered word that prefixes `rest`.
    #[inline]
    pub fn longest_match(&self, rest: &[u8]) -> Option<usize> {
        let first = rest.first()?;
        self.by_first
            .get(first)?
            .iter()
            .map(|&i| &self.words[i as usize])
            .find(|word| rest.starts_with(&word[..]))
            .map(|word| word.len())
    }
}
