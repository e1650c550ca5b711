//! The optional preamble and fixed header.
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Cursor, Read};

use super::{read_error, FormatError, TransducerError};
use crate::constants::{HEADER_SIZE, HFST_MAGIC, TARGET_TABLE};
use crate::types::{HeaderFlag, SymbolNumber, TransitionTableIndex};

/// The fixed header of an optimized-lookup transducer.
#[derive(Debug, Clone)]
pub struct TransducerHeader {
    symbols: SymbolNumber,
    input_symbols: SymbolNumber,
    trans_index_table: TransitionTableIndex,
    trans_target_table: TransitionTableIndex,
    states: TransitionTableIndex,
    transitions: TransitionTableIndex,

    properties: [bool; 9],
    header_size: usize,
}

#[allow(clippy::len_without_is_empty)]
impl TransducerHeader {
    /// Reads the optional `HFST\0` preamble and the fixed header that follows.
    ///
    /// Without the preamble, the bytes consumed while probing for it are the
    /// start of the fixed header.
    pub fn read<R: Read>(rdr: &mut R) -> Result<TransducerHeader, TransducerError> {
        let mut buf = [0u8; HEADER_SIZE];
        let mut header_size = HEADER_SIZE;

        rdr.read_exact(&mut buf[..HFST_MAGIC.len()])
            .map_err(read_error("header"))?;

        if &buf[..HFST_MAGIC.len()] == HFST_MAGIC {
            let meta_len = rdr
                .read_u16::<LittleEndian>()
                .map_err(read_error("header preamble"))?;

            let separator = rdr.read_u8().map_err(read_error("header preamble"))?;
            if separator != 0 {
                return Err(FormatError::InvalidPreamble(separator).into());
            }

            // Metadata key/value pairs are of no use for lookup.
            let skipped = io::copy(&mut rdr.by_ref().take(u64::from(meta_len)), &mut io::sink())
                .map_err(read_error("header metadata"))?;
            if skipped != u64::from(meta_len) {
                return Err(TransducerError::EndOfStream("header metadata"));
            }

            header_size += HFST_MAGIC.len() + 3 + meta_len as usize;
            rdr.read_exact(&mut buf).map_err(read_error("header"))?;
        } else {
            rdr.read_exact(&mut buf[HFST_MAGIC.len()..])
                .map_err(read_error("header"))?;
        }

        let header = TransducerHeader::parse(&buf, header_size)?;
        log::debug!("{:?}", header);
        Ok(header)
    }

    fn parse(buf: &[u8; HEADER_SIZE], header_size: usize) -> Result<TransducerHeader, TransducerError> {
        let mut rdr = Cursor::new(&buf[..]);
        let read = read_error("header");

        let input_symbols = rdr.read_u16::<LittleEndian>().map_err(&read)?;
        let symbols = rdr.read_u16::<LittleEndian>().map_err(&read)?;
        let trans_index_table = rdr.read_u32::<LittleEndian>().map_err(&read)?;
        let trans_target_table = rdr.read_u32::<LittleEndian>().map_err(&read)?;
        let states = rdr.read_u32::<LittleEndian>().map_err(&read)?;
        let transitions = rdr.read_u32::<LittleEndian>().map_err(&read)?;

        let mut props = [false; 9];

        for prop in props.iter_mut() {
            let v = rdr.read_u32::<LittleEndian>().map_err(&read)?;
            *prop = v != 0
        }

        if symbols == 0 {
            return Err(FormatError::EmptyAlphabet.into());
        }

        for (table, size) in [("index", trans_index_table), ("transition", trans_target_table)] {
            // Sizes are signed on disk, and anything at or past the target
            // table offset is unaddressable anyway.
            if size >= TARGET_TABLE {
                return Err(FormatError::NegativeTableSize {
                    table,
                    size: size as i32,
                }
                .into());
            }
        }

        Ok(TransducerHeader {
            symbols,
            input_symbols,
            trans_index_table,
            trans_target_table,
            states,
            transitions,
            properties: props,
            header_size,
        })
    }

    /// Symbols in the alphabet, including flags.
    pub fn symbol_count(&self) -> SymbolNumber {
        self.symbols
    }

    /// Symbols that occur on the input side.
    pub fn input_symbol_count(&self) -> SymbolNumber {
        self.input_symbols
    }

    /// Records in the index table.
    pub fn index_table_size(&self) -> TransitionTableIndex {
        self.trans_index_table
    }

    /// Records in the transition table.
    pub fn target_table_size(&self) -> TransitionTableIndex {
        self.trans_target_table
    }

    /// Whether the header sets `flag`.
    pub fn has_flag(&self, flag: HeaderFlag) -> bool {
        self.properties[flag as usize]
    }

    /// Whether the transducer carries weights.
    pub fn is_weighted(&self) -> bool {
        self.has_flag(HeaderFlag::Weighted)
    }

    /// State count as recorded by the compiler.
    pub fn states(&self) -> TransitionTableIndex {
        self.states
    }

    /// Transition count as recorded by the compiler.
    pub fn transitions(&self) -> TransitionTableIndex {
        self.transitions
    }

    /// All property flags, indexed like [`HeaderFlag`].
    pub fn properties(&self) -> &[bool; 9] {
        &self.properties
    }

    /// Number of bytes consumed, preamble included.
    pub fn len(&self) -> usize {
        self.header_size
    }
}
