//! Transducer is a Finite-State Automaton with two tapes / two symbols per
//! transition.
//!
//! The on-disk format is HFST's optimized lookup format: an index table that
//! gives constant-time access to the arcs of a state by input symbol, and a
//! transition table holding the arcs themselves. Indices at or above
//! [`TARGET_TABLE`](crate::constants::TARGET_TABLE) point into the
//! transition table, everything below into the index table.
pub mod alphabet;
pub mod flag_diacritics;
pub mod header;
pub mod index_table;
pub mod transition_table;

use std::fmt;
use std::io::{self, BufRead, BufReader, Cursor, Read};

pub use self::alphabet::{TransducerAlphabet, TransducerAlphabetParser};
pub use self::flag_diacritics::FlagDiacriticStateStack;
pub use self::header::TransducerHeader;
pub use self::index_table::IndexTable;
pub use self::transition_table::{SimpleTransitionTable, WeightedTransitionTable};
use crate::tokenizer::LetterTrie;
use crate::types::{SymbolNumber, TransitionTableIndex, Weight};

/// Error with transducer reading.
#[derive(Debug, thiserror::Error)]
pub enum TransducerError {
    /// The stream ended inside the named section.
    #[error("Unexpected end of stream while reading {0}")]
    EndOfStream(&'static str),
    /// Error with input/output.
    #[error("IO error")]
    Io(#[source] io::Error),
    /// The bytes do not describe a valid transducer.
    #[error("Invalid transducer")]
    Format(#[from] FormatError),
}

impl TransducerError {
    /// Wrap into i/o error.
    pub fn into_io_error(self) -> io::Error {
        match self {
            TransducerError::Io(v) => v,
            TransducerError::EndOfStream(section) => io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Unexpected end of stream while reading {}", section),
            ),
            TransducerError::Format(v) => io::Error::new(io::ErrorKind::InvalidData, v),
        }
    }
}

/// Structurally impossible header or alphabet contents.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The header declares no symbols, not even epsilon
    #[error("Alphabet has no symbols")]
    EmptyAlphabet,

    /// A table size is negative as a signed 32-bit value
    #[error("Negative {table} table size {size}")]
    NegativeTableSize {
        /// Which table
        table: &'static str,
        /// The size read as signed
        size: i32,
    },

    /// The byte after the preamble length was not NUL
    #[error("Expected NUL after header preamble length, got {0:#04x}")]
    InvalidPreamble(u8),

    /// More distinct flag diacritic values than the state encoding holds
    #[error("Too many distinct flag diacritic values")]
    TooManyFlagValues,

    /// A table's byte length does not fit in memory addresses
    #[error("{table} of {records} records is too large")]
    TableTooLarge {
        /// Which table
        table: &'static str,
        /// Records declared by the header
        records: usize,
    },

    /// An alphabet entry is not UTF-8
    #[error("Symbol {index} is not valid UTF-8")]
    InvalidSymbol {
        /// Position in the alphabet
        index: SymbolNumber,
        /// Decoding failure
        #[source]
        source: std::str::Utf8Error,
    },
}

pub(crate) fn read_error(section: &'static str) -> impl Fn(io::Error) -> TransducerError {
    move |e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            TransducerError::EndOfStream(section)
        } else {
            TransducerError::Io(e)
        }
    }
}

/// Reads `records` fixed-size records. The buffer only grows as data
/// arrives, so a header with absurd table sizes fails on the short read
/// instead of on allocation.
pub(crate) fn read_table<R: Read>(
    rdr: &mut R,
    records: usize,
    record_size: usize,
    section: &'static str,
) -> Result<Vec<u8>, TransducerError> {
    let len = records
        .checked_mul(record_size)
        .ok_or(FormatError::TableTooLarge {
            table: section,
            records,
        })?;

    let mut buf = Vec::with_capacity(len.min(1 << 20));
    rdr.take(len as u64)
        .read_to_end(&mut buf)
        .map_err(read_error(section))?;

    if buf.len() != len {
        return Err(TransducerError::EndOfStream(section));
    }

    Ok(buf)
}

/// Transition table contains the arcs of the automaton (and states).
pub trait TransitionTable: Sized {
    /// number of records.
    fn size(&self) -> TransitionTableIndex;
    /// get input symbol of a transition.
    fn input_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber>;
    /// get output symbol of a transition.
    fn output_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber>;
    /// get the target state in the index.
    fn target(&self, i: TransitionTableIndex) -> Option<TransitionTableIndex>;
    /// get the weight of the transition, or the final weight of a state.
    fn weight(&self, i: TransitionTableIndex) -> Option<Weight>;

    /// check if the state is a final state.
    #[inline(always)]
    fn is_final(&self, i: TransitionTableIndex) -> bool {
        self.input_symbol(i) == None && self.output_symbol(i) == None && self.target(i) == Some(1)
    }
}

pub(crate) enum TransitionTables {
    Simple(SimpleTransitionTable),
    Weighted(WeightedTransitionTable),
}

/// A loaded optimized-lookup transducer.
///
/// Immutable once loaded and safe to share between threads; each analysis
/// allocates its own traversal state.
pub struct HfstTransducer {
    header: TransducerHeader,
    alphabet: TransducerAlphabet,
    letter_trie: LetterTrie,
    pub(crate) index_table: IndexTable,
    pub(crate) transition_table: TransitionTables,
}

impl fmt::Debug for HfstTransducer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:?}", self.header)?;
        writeln!(f, "{:?}", self.alphabet)?;
        writeln!(f, "{:?}", self.index_table)?;
        match &self.transition_table {
            TransitionTables::Simple(t) => writeln!(f, "{:?}", t)?,
            TransitionTables::Weighted(t) => writeln!(f, "{:?}", t)?,
        }
        Ok(())
    }
}

impl HfstTransducer {
    /// Reads a transducer from the start of `rdr`.
    pub fn load<R: Read>(rdr: R) -> Result<HfstTransducer, TransducerError> {
        HfstTransducer::load_buffered(&mut BufReader::new(rdr))
    }

    /// Reads a transducer from an in-memory buffer.
    pub fn from_bytes(buf: &[u8]) -> Result<HfstTransducer, TransducerError> {
        HfstTransducer::load_buffered(&mut Cursor::new(buf))
    }

    fn load_buffered<R: BufRead>(rdr: &mut R) -> Result<HfstTransducer, TransducerError> {
        let header = TransducerHeader::read(rdr)?;
        let alphabet = TransducerAlphabetParser::parse(rdr, header.symbol_count())?;
        let weighted = header.is_weighted();

        let index_table = IndexTable::read(rdr, header.index_table_size(), weighted)?;
        let transition_table = if weighted {
            TransitionTables::Weighted(WeightedTransitionTable::read(
                rdr,
                header.target_table_size(),
            )?)
        } else {
            TransitionTables::Simple(SimpleTransitionTable::read(
                rdr,
                header.target_table_size(),
            )?)
        };

        let letter_trie = LetterTrie::from_alphabet(&alphabet);

        log::debug!(
            "loaded {} transducer: {} symbols, {} index records, {} transitions",
            if weighted { "weighted" } else { "unweighted" },
            header.symbol_count(),
            header.index_table_size(),
            header.target_table_size()
        );

        Ok(HfstTransducer {
            header,
            alphabet,
            letter_trie,
            index_table,
            transition_table,
        })
    }

    /// Whether the transducer carries weights.
    #[inline(always)]
    pub fn is_weighted(&self) -> bool {
        self.header.is_weighted()
    }

    /// The parsed header.
    #[inline(always)]
    pub fn header(&self) -> &TransducerHeader {
        &self.header
    }

    /// The symbol table.
    #[inline(always)]
    pub fn alphabet(&self) -> &TransducerAlphabet {
        &self.alphabet
    }

    /// The index table.
    #[inline(always)]
    pub fn index_table(&self) -> &IndexTable {
        &self.index_table
    }

    /// The trie used by [`tokenize`](Self::tokenize).
    #[inline(always)]
    pub fn letter_trie(&self) -> &LetterTrie {
        &self.letter_trie
    }

    /// Splits `word` into symbol numbers of this transducer's alphabet.
    #[inline]
    pub fn tokenize(&self, word: &str) -> Option<Vec<SymbolNumber>> {
        self.letter_trie.tokenize(word)
    }
}
