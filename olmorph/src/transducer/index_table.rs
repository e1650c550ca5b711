//! Index table records.
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;
use std::io::Read;
use std::mem;

use super::{read_table, TransducerError};
use crate::constants::{INDEX_TABLE_SIZE, NO_SYMBOL_NUMBER, NO_TABLE_INDEX};
use crate::types::{SymbolNumber, TransitionTableIndex, Weight};

/// The index table shares one record layout between simple and weighted
/// transducers; only the meaning of a final slot's target differs.
pub struct IndexTable {
    size: TransitionTableIndex,
    buf: Vec<u8>,
    weighted: bool,
}

impl fmt::Debug for IndexTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Index table index: {}", self.size)?;
        Ok(())
    }
}

#[allow(clippy::len_without_is_empty)]
impl IndexTable {
    /// Reads `size` records.
    pub fn read<R: Read>(
        rdr: &mut R,
        size: TransitionTableIndex,
        weighted: bool,
    ) -> Result<IndexTable, TransducerError> {
        let buf = read_table(rdr, size as usize, INDEX_TABLE_SIZE, "index table")?;
        Ok(IndexTable {
            size,
            buf,
            weighted,
        })
    }

    /// Size of the table in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Number of records.
    #[inline(always)]
    pub fn size(&self) -> TransitionTableIndex {
        self.size
    }

    #[inline(always)]
    fn offset(&self, i: TransitionTableIndex) -> Option<usize> {
        if i >= self.size {
            None
        } else {
            Some(INDEX_TABLE_SIZE * i as usize)
        }
    }

    /// Input symbol of slot `i`, `None` for an empty slot or one out of range.
    #[inline(always)]
    pub fn input_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        let index = self.offset(i)?;
        let input_symbol = LittleEndian::read_u16(&self.buf[index..]);

        if input_symbol == NO_SYMBOL_NUMBER {
            None
        } else {
            Some(input_symbol)
        }
    }

    /// Target of slot `i`.
    #[inline(always)]
    pub fn target(&self, i: TransitionTableIndex) -> Option<TransitionTableIndex> {
        let index = self.offset(i)? + mem::size_of::<SymbolNumber>();
        let target = LittleEndian::read_u32(&self.buf[index..]);

        if target == NO_TABLE_INDEX {
            None
        } else {
            Some(target)
        }
    }

    // Final weight reads from the same position as target, but for a different tuple
    /// Final weight of slot `i`: the target bits as `f32` when weighted, `0.0` otherwise.
    #[inline(always)]
    pub fn final_weight(&self, i: TransitionTableIndex) -> Option<Weight> {
        let index = self.offset(i)? + mem::size_of::<SymbolNumber>();

        if self.weighted {
            Some(LittleEndian::read_f32(&self.buf[index..]))
        } else {
            Some(0.0)
        }
    }

    /// Whether slot `i` marks a final state.
    #[inline(always)]
    pub fn is_final(&self, i: TransitionTableIndex) -> bool {
        self.input_symbol(i) == None && self.target(i) != None
    }
}
