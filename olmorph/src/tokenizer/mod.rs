//! Splitting a word into alphabet symbols.
//!
//! Symbols may span several codepoints (digraphs, multichar tags), so input
//! is matched against a trie of the alphabet with longest-match lookup.
mod letter_trie;

pub use self::letter_trie::LetterTrie;

/// A position in a word, counted in codepoints.
#[derive(Debug, Clone)]
pub struct InputCursor {
    chars: Vec<char>,
    index: usize,
}

impl InputCursor {
    /// A cursor at the start of `word`.
    pub fn new(word: &str) -> InputCursor {
        InputCursor {
            chars: word.chars().collect(),
            index: 0,
        }
    }

    /// Consumes one codepoint.
    #[inline(always)]
    pub fn next(&mut self) -> Option<char> {
        let c = self.chars.get(self.index).copied()?;
        self.index += 1;
        Some(c)
    }

    /// Steps back one codepoint.
    #[inline(always)]
    pub fn back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Codepoints consumed so far.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.index
    }

    /// Moves to `index`, clamped to the end of the word.
    #[inline(always)]
    pub fn set_position(&mut self, index: usize) {
        self.index = index.min(self.chars.len());
    }

    /// Whether every codepoint has been consumed.
    #[inline(always)]
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.chars.len()
    }
}
