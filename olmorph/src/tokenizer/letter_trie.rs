use hashbrown::HashMap;

use super::InputCursor;
use crate::transducer::TransducerAlphabet;
use crate::types::SymbolNumber;

#[derive(Debug, Default)]
struct LetterTrieNode {
    /// Symbols ending with the given codepoint at this depth.
    symbols: HashMap<char, SymbolNumber>,
    children: HashMap<char, LetterTrieNode>,
}

impl LetterTrieNode {
    fn add_string(&mut self, key: &[char], symbol: SymbolNumber) {
        match key {
            [] => {}
            [c] => {
                self.symbols.insert(*c, symbol);
            }
            [c, rest @ ..] => self.children.entry(*c).or_default().add_string(rest, symbol),
        }
    }

    fn find_key(&self, cursor: &mut InputCursor) -> Option<SymbolNumber> {
        let c = cursor.next()?;

        let child = match self.children.get(&c) {
            Some(child) => child,
            None => {
                let symbol = self.symbols.get(&c).copied();
                if symbol.is_none() {
                    cursor.back();
                }
                return symbol;
            }
        };

        let position = cursor.position();
        match child.find_key(cursor) {
            Some(symbol) => Some(symbol),
            None => match self.symbols.get(&c) {
                Some(&symbol) => {
                    cursor.set_position(position);
                    Some(symbol)
                }
                None => {
                    cursor.back();
                    None
                }
            },
        }
    }
}

/// Prefix tree over the alphabet's symbol strings.
#[derive(Debug, Default)]
pub struct LetterTrie {
    root: LetterTrieNode,
}

impl LetterTrie {
    /// An empty trie.
    pub fn new() -> LetterTrie {
        LetterTrie::default()
    }

    /// A trie of every printable symbol in `alphabet`.
    pub fn from_alphabet(alphabet: &TransducerAlphabet) -> LetterTrie {
        let mut trie = LetterTrie::new();

        for (i, key) in alphabet.key_table().iter().enumerate().skip(1) {
            if !key.is_empty() {
                trie.add_string(key, i as SymbolNumber);
            }
        }

        trie
    }

    /// Adds `key` as a spelling of `symbol`.
    pub fn add_string(&mut self, key: &str, symbol: SymbolNumber) {
        let chars = key.chars().collect::<Vec<_>>();
        self.root.add_string(&chars, symbol);
    }

    /// Reads the longest symbol at the cursor.
    ///
    /// On failure the cursor is left where it was, so callers can tell
    /// that tokenization stalled.
    #[inline]
    pub fn find_key(&self, cursor: &mut InputCursor) -> Option<SymbolNumber> {
        self.root.find_key(cursor)
    }

    /// Splits `word` into symbols, or `None` if some part of it is not in
    /// the alphabet.
    pub fn tokenize(&self, word: &str) -> Option<Vec<SymbolNumber>> {
        let mut cursor = InputCursor::new(word);
        let mut symbols = Vec::with_capacity(word.len());

        while !cursor.is_exhausted() {
            let position = cursor.position();
            match self.find_key(&mut cursor) {
                Some(symbol) if cursor.position() > position => symbols.push(symbol),
                _ => {
                    log::trace!("tokenization of {:?} stalled at {}", word, position);
                    return None;
                }
            }
        }

        Some(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie(symbols: &[&str]) -> LetterTrie {
        let mut trie = LetterTrie::new();
        for (i, s) in symbols.iter().enumerate() {
            trie.add_string(s, i as SymbolNumber + 1);
        }
        trie
    }

    #[test]
    fn longest_match_wins() {
        let t = trie(&["а", "аь"]);
        assert_eq!(t.tokenize("аь"), Some(vec![2]));
        assert_eq!(t.tokenize("аа"), Some(vec![1, 1]));
        assert_eq!(t.tokenize("ааь"), Some(vec![1, 2]));
    }

    #[test]
    fn falls_back_to_shorter_match() {
        let t = trie(&["a", "abc", "b"]);

        let mut cursor = InputCursor::new("abd");
        assert_eq!(t.find_key(&mut cursor), Some(1));
        assert_eq!(cursor.position(), 1);

        assert_eq!(t.tokenize("abd"), None);
        assert_eq!(t.tokenize("abcab"), Some(vec![2, 1, 3]));
    }

    #[test]
    fn unknown_input_leaves_cursor() {
        let t = trie(&["a", "abc"]);

        let mut cursor = InputCursor::new("xa");
        assert_eq!(t.find_key(&mut cursor), None);
        assert_eq!(cursor.position(), 0);

        // "ab" is only a prefix of "abc", and "a" then "b" has no "b" symbol
        let mut cursor = InputCursor::new("ab");
        assert_eq!(t.find_key(&mut cursor), Some(1));
        assert_eq!(t.find_key(&mut cursor), None);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn prefix_without_symbol() {
        let t = trie(&["abc"]);
        let mut cursor = InputCursor::new("ab");
        assert_eq!(t.find_key(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn empty_word_is_empty_sequence() {
        let t = trie(&["a"]);
        assert_eq!(t.tokenize(""), Some(vec![]));
    }

    #[test]
    fn multichar_tags() {
        let t = trie(&["k", "a", "t", "+N", "+Sg"]);
        assert_eq!(t.tokenize("kat+N+Sg"), Some(vec![1, 2, 3, 4, 5]));
    }
}
