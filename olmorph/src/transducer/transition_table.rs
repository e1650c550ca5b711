//! Transition table records, unweighted and weighted.
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;
use std::io::Read;
use std::mem;

use super::{read_table, TransducerError, TransitionTable};
use crate::constants::{
    NO_SYMBOL_NUMBER, NO_TABLE_INDEX, TRANS_TABLE_SIZE, WEIGHTED_TRANS_TABLE_SIZE,
};
use crate::types::{SymbolNumber, TransitionTableIndex, Weight};

/// Raw transition records of one fixed size.
struct Records {
    size: TransitionTableIndex,
    buf: Vec<u8>,
    record_size: usize,
}

impl Records {
    fn read<R: Read>(
        rdr: &mut R,
        size: TransitionTableIndex,
        record_size: usize,
    ) -> Result<Records, TransducerError> {
        let buf = read_table(rdr, size as usize, record_size, "transition table")?;
        Ok(Records {
            size,
            buf,
            record_size,
        })
    }

    #[inline(always)]
    fn offset(&self, i: TransitionTableIndex, field: usize) -> Option<usize> {
        if i >= self.size {
            None
        } else {
            Some(self.record_size * i as usize + field)
        }
    }

    #[inline(always)]
    fn symbol(&self, i: TransitionTableIndex, field: usize) -> Option<SymbolNumber> {
        let index = self.offset(i, field)?;
        let x = LittleEndian::read_u16(&self.buf[index..]);
        if x == NO_SYMBOL_NUMBER {
            None
        } else {
            Some(x)
        }
    }

    #[inline(always)]
    fn input_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        self.symbol(i, 0)
    }

    #[inline(always)]
    fn output_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        self.symbol(i, mem::size_of::<SymbolNumber>())
    }

    #[inline(always)]
    fn target(&self, i: TransitionTableIndex) -> Option<TransitionTableIndex> {
        let index = self.offset(i, 2 * mem::size_of::<SymbolNumber>())?;
        let x = LittleEndian::read_u32(&self.buf[index..]);
        if x == NO_TABLE_INDEX {
            None
        } else {
            Some(x)
        }
    }
}

/// Transition table of an unweighted transducer, 8 bytes per record.
pub struct SimpleTransitionTable(Records);

impl fmt::Debug for SimpleTransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Transition table index: {}", self.0.size)?;
        Ok(())
    }
}

impl SimpleTransitionTable {
    /// Reads `size` records.
    pub fn read<R: Read>(
        rdr: &mut R,
        size: TransitionTableIndex,
    ) -> Result<SimpleTransitionTable, TransducerError> {
        Records::read(rdr, size, TRANS_TABLE_SIZE).map(SimpleTransitionTable)
    }
}

impl TransitionTable for SimpleTransitionTable {
    #[inline(always)]
    fn size(&self) -> TransitionTableIndex {
        self.0.size
    }

    #[inline(always)]
    fn input_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        self.0.input_symbol(i)
    }

    #[inline(always)]
    fn output_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        self.0.output_symbol(i)
    }

    #[inline(always)]
    fn target(&self, i: TransitionTableIndex) -> Option<TransitionTableIndex> {
        self.0.target(i)
    }

    #[inline(always)]
    fn weight(&self, i: TransitionTableIndex) -> Option<Weight> {
        if i >= self.0.size {
            None
        } else {
            Some(0.0)
        }
    }
}

/// Transition table of a weighted transducer, 12 bytes per record.
pub struct WeightedTransitionTable(Records);

impl fmt::Debug for WeightedTransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Weighted transition table index: {}", self.0.size)?;
        Ok(())
    }
}

impl WeightedTransitionTable {
    /// Reads `size` records.
    pub fn read<R: Read>(
        rdr: &mut R,
        size: TransitionTableIndex,
    ) -> Result<WeightedTransitionTable, TransducerError> {
        Records::read(rdr, size, WEIGHTED_TRANS_TABLE_SIZE).map(WeightedTransitionTable)
    }
}

impl TransitionTable for WeightedTransitionTable {
    #[inline(always)]
    fn size(&self) -> TransitionTableIndex {
        self.0.size
    }

    #[inline(always)]
    fn input_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        self.0.input_symbol(i)
    }

    #[inline(always)]
    fn output_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        self.0.output_symbol(i)
    }

    #[inline(always)]
    fn target(&self, i: TransitionTableIndex) -> Option<TransitionTableIndex> {
        self.0.target(i)
    }

    #[inline(always)]
    fn weight(&self, i: TransitionTableIndex) -> Option<Weight> {
        let index = self.0.offset(
            i,
            2 * mem::size_of::<SymbolNumber>() + mem::size_of::<TransitionTableIndex>(),
        )?;
        Some(LittleEndian::read_f32(&self.0.buf[index..]))
    }
}
