//! The symbol table and its flag diacritics.
use std::io::BufRead;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{read_error, FormatError, TransducerError};
use crate::types::{
    FlagDiacriticOperation, FlagDiacriticOperator, OperationsMap, SymbolNumber, ValueNumber,
};

/// The symbol table of a transducer.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransducerAlphabet {
    pub(crate) key_table: Vec<SmolStr>,
    pub(crate) flag_state_size: SymbolNumber,
    pub(crate) length: usize,
    pub(crate) string_to_symbol: HashMap<SmolStr, SymbolNumber>,
    pub(crate) operations: OperationsMap,
}

impl TransducerAlphabet {
    /// Concatenates the printable form of `syms`. Flags print as nothing.
    #[inline(always)]
    pub fn string_from_symbols(&self, syms: &[SymbolNumber]) -> SmolStr {
        syms.iter()
            .filter_map(|s| self.key_table.get(*s as usize))
            .map(|s| &**s)
            .collect()
    }

    /// Printable symbol strings, by symbol number.
    #[inline(always)]
    pub fn key_table(&self) -> &Vec<SmolStr> {
        &self.key_table
    }

    /// Number of distinct flag diacritic features.
    #[inline(always)]
    pub fn state_size(&self) -> SymbolNumber {
        self.flag_state_size
    }

    /// Flag diacritic operations by symbol.
    #[inline(always)]
    pub fn operations(&self) -> &OperationsMap {
        &self.operations
    }

    /// Symbol numbers of the non-flag, non-empty symbols.
    #[inline(always)]
    pub fn string_to_symbol(&self) -> &HashMap<SmolStr, SymbolNumber> {
        &self.string_to_symbol
    }

    /// Whether `symbol` is a flag diacritic.
    #[inline(always)]
    pub fn is_flag(&self, symbol: SymbolNumber) -> bool {
        self.operations.contains_key(&symbol)
    }

    /// Bytes the alphabet occupied on disk.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether nothing was read.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Builds a [`TransducerAlphabet`] from the NUL-separated symbol list.
pub struct TransducerAlphabetParser {
    key_table: Vec<SmolStr>,
    length: usize,
    string_to_symbol: HashMap<SmolStr, SymbolNumber>,
    operations: OperationsMap,
    feature_bucket: HashMap<SmolStr, SymbolNumber>,
    value_bucket: HashMap<SmolStr, ValueNumber>,
}

impl std::default::Default for TransducerAlphabetParser {
    fn default() -> Self {
        TransducerAlphabetParser {
            key_table: Vec::with_capacity(64),
            length: 0,
            string_to_symbol: HashMap::new(),
            operations: HashMap::new(),
            feature_bucket: HashMap::new(),
            value_bucket: HashMap::new(),
        }
    }
}

impl TransducerAlphabetParser {
    /// An empty parser.
    pub fn new() -> TransducerAlphabetParser {
        Self::default()
    }

    /// Splits `@OP.FEATURE[.VALUE]@` into its parts, or `None` if `key` is an
    /// ordinary symbol.
    fn flag_parts(key: &str) -> Option<(FlagDiacriticOperator, &str, &str)> {
        use std::str::FromStr;

        let mut chars = key.chars();
        let op = chars.nth(1)?;

        if key.chars().count() <= 4
            || !key.starts_with('@')
            || !key.ends_with('@')
            || chars.next()? != '.'
        {
            return None;
        }

        let operation = FlagDiacriticOperator::from_str(op.encode_utf8(&mut [0; 4])).ok()?;
        let body = &key[1..key.len() - 1];
        let parts = body.split('.').collect::<Vec<_>>();

        match parts[..] {
            [_, feature] => Some((operation, feature, "")),
            [_, feature, value] => Some((operation, feature, value)),
            _ => None,
        }
    }

    fn intern_feature(&mut self, feature: &str) -> SymbolNumber {
        let next = self.feature_bucket.len() as SymbolNumber;
        *self.feature_bucket.entry(feature.into()).or_insert(next)
    }

    fn intern_value(&mut self, value: &str) -> Result<ValueNumber, FormatError> {
        if let Some(&number) = self.value_bucket.get(value) {
            return Ok(number);
        }

        // 0 is reserved for an unset feature, and negated ids must stay
        // representable
        let next = ValueNumber::try_from(self.value_bucket.len() + 1)
            .map_err(|_| FormatError::TooManyFlagValues)?;
        self.value_bucket.insert(value.into(), next);
        Ok(next)
    }

    fn handle_symbol(&mut self, i: SymbolNumber, key: SmolStr) -> Result<(), FormatError> {
        if i == 0 {
            self.key_table.push(SmolStr::default());
            return Ok(());
        }

        if let Some((operation, feature, value)) = Self::flag_parts(&key) {
            let op = FlagDiacriticOperation {
                operation,
                feature: feature.into(),
                value: value.into(),
                feature_number: self.intern_feature(feature),
                value_number: self.intern_value(value)?,
            };

            self.operations.insert(i, op);
            self.key_table.push(SmolStr::default());
            return Ok(());
        }

        if !key.is_empty() {
            self.string_to_symbol.insert(key.clone(), i);
        }
        self.key_table.push(key);
        Ok(())
    }

    fn parse_inner<R: BufRead>(
        &mut self,
        rdr: &mut R,
        symbols: SymbolNumber,
    ) -> Result<(), TransducerError> {
        let mut buf = Vec::with_capacity(32);

        for i in 0..symbols {
            buf.clear();
            let n = rdr
                .read_until(b'\0', &mut buf)
                .map_err(read_error("alphabet"))?;

            if buf.last() != Some(&b'\0') {
                return Err(TransducerError::EndOfStream("alphabet"));
            }

            self.length += n;
            buf.pop();

            let key = std::str::from_utf8(&buf)
                .map_err(|source| FormatError::InvalidSymbol { index: i, source })?;
            self.handle_symbol(i, key.into())?;
        }

        Ok(())
    }

    /// Reads `symbols` NUL-terminated strings from `rdr`.
    pub fn parse<R: BufRead>(
        rdr: &mut R,
        symbols: SymbolNumber,
    ) -> Result<TransducerAlphabet, TransducerError> {
        let mut p = TransducerAlphabetParser::new();
        p.parse_inner(rdr, symbols)?;

        log::trace!(
            "alphabet: {} symbols, {} flag diacritics over {} features",
            p.key_table.len(),
            p.operations.len(),
            p.feature_bucket.len()
        );

        Ok(TransducerAlphabet {
            key_table: p.key_table,
            length: p.length,
            flag_state_size: p.feature_bucket.len() as SymbolNumber,
            string_to_symbol: p.string_to_symbol,
            operations: p.operations,
        })
    }
}
