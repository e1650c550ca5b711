use crate::types::{SymbolNumber, TransitionTableIndex};

/// Bytes per index table record.
pub const INDEX_TABLE_SIZE: usize = 6;
/// Bytes per unweighted transition record.
pub const TRANS_TABLE_SIZE: usize = 8;
/// Bytes per weighted transition record.
pub const WEIGHTED_TRANS_TABLE_SIZE: usize = 12;
/// Targets at or above this address the transition table.
pub const TARGET_TABLE: TransitionTableIndex = 2_147_483_648;

/// Empty symbol slot.
pub const NO_SYMBOL_NUMBER: SymbolNumber = SymbolNumber::MAX;
/// Empty target slot.
pub const NO_TABLE_INDEX: TransitionTableIndex = TransitionTableIndex::MAX;

/// Size of the fixed part of the header, after any HFST preamble.
pub const HEADER_SIZE: usize = 56;
/// Magic bytes opening the optional header preamble.
pub const HFST_MAGIC: &[u8; 5] = b"HFST\0";

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;

    #[test]
    fn test_INDEX_TABLE_SIZE() {
        use crate::types::*;
        use std::mem;

        let c = mem::size_of::<SymbolNumber>() + mem::size_of::<TransitionTableIndex>();

        assert!(INDEX_TABLE_SIZE == c);
    }

    #[test]
    fn test_TRANS_TABLE_SIZE() {
        use crate::types::*;
        use std::mem;

        let c = 2 * mem::size_of::<SymbolNumber>() + mem::size_of::<TransitionTableIndex>();

        assert!(TRANS_TABLE_SIZE == c);
        assert!(WEIGHTED_TRANS_TABLE_SIZE == c + mem::size_of::<Weight>());
    }

    #[test]
    fn test_HEADER_SIZE() {
        use crate::types::*;
        use std::mem;

        let c = 2 * mem::size_of::<SymbolNumber>() + 4 * mem::size_of::<TransitionTableIndex>() + 9 * 4;

        assert!(HEADER_SIZE == c);
    }
}
