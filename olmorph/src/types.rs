use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Index into the alphabet.
pub type SymbolNumber = u16;
/// Interned flag diacritic value; the sign carries polarity.
pub type ValueNumber = i16;
/// Index into the index or transition table.
pub type TransitionTableIndex = u32;
/// Weight as stored on disk.
pub type Weight = f32;

/// One slot per flag feature: `0` is unset, `+v` positively set to value
/// `v`, `-v` negatively set to value `v`.
pub type FlagDiacriticState = Rc<Vec<ValueNumber>>;
/// Flag diacritic operations by symbol.
pub type OperationsMap = hashbrown::HashMap<SymbolNumber, FlagDiacriticOperation>;

/// The operator letter of a flag diacritic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagDiacriticOperator {
    /// `P`: set the feature to the value
    PositiveSet,
    /// `N`: set the feature to anything but the value
    NegativeSet,
    /// `R`: require the value, or any value if none is given
    Require,
    /// `D`: forbid the value, or any value if none is given
    Disallow,
    /// `C`: unset the feature
    Clear,
    /// `U`: set the feature if compatible with its current value
    Unification,
}

impl std::str::FromStr for FlagDiacriticOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(FlagDiacriticOperator::PositiveSet),
            "N" => Ok(FlagDiacriticOperator::NegativeSet),
            "R" => Ok(FlagDiacriticOperator::Require),
            "D" => Ok(FlagDiacriticOperator::Disallow),
            "C" => Ok(FlagDiacriticOperator::Clear),
            "U" => Ok(FlagDiacriticOperator::Unification),
            _ => Err(()),
        }
    }
}

/// Header property flags, in on-disk order.
#[derive(Debug, Clone, Copy)]
pub enum HeaderFlag {
    /// Arcs and final states carry weights
    Weighted,
    /// No state has two arcs with the same label pair
    Deterministic,
    /// No state has two arcs with the same input
    InputDeterministic,
    /// The automaton is minimal
    Minimized,
    /// The automaton has cycles
    Cyclic,
    /// Some arc has epsilon on both sides
    HasEpsilonEpsilonTransitions,
    /// Some arc has epsilon on the input side
    HasInputEpsilonTransitions,
    /// Some cycle consumes no input
    HasInputEpsilonCycles,
    /// Some cycle consumes no input and carries no weight
    HasUnweightedInputEpsilonCycles,
}

/// A flag diacritic such as `@U.CASE.NOM@`.
///
/// `feature` and `value` keep the textual form; `feature_number` and
/// `value_number` are the interned ids the state stack works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDiacriticOperation {
    /// Operator letter
    pub operation: FlagDiacriticOperator,
    /// Feature name
    pub feature: SmolStr,
    /// Value name, empty when the flag has none
    pub value: SmolStr,
    pub(crate) feature_number: SymbolNumber,
    pub(crate) value_number: ValueNumber,
}

impl FlagDiacriticOperation {
    /// Whether the flag names a value.
    #[inline(always)]
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    /// Interned feature id, an index into the flag state.
    #[inline(always)]
    pub fn feature_number(&self) -> SymbolNumber {
        self.feature_number
    }

    /// Interned value id, starting at 1.
    #[inline(always)]
    pub fn value_number(&self) -> ValueNumber {
        self.value_number
    }
}
