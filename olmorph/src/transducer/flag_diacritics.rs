//! Flag diacritic constraint evaluation.
//!
//! The stack keeps one state vector per accepted flag on the current path.
//! Layers that do not change a binding share their parent's vector, and a
//! binding change clones the parent before writing, so popping always
//! restores the exact state the path had before the flag.
use std::rc::Rc;

use crate::types::{FlagDiacriticOperation, FlagDiacriticOperator, FlagDiacriticState};

/// Flag states along the current path, one layer per accepted flag.
#[derive(Debug, Clone)]
pub struct FlagDiacriticStateStack {
    stack: Vec<FlagDiacriticState>,
}

impl FlagDiacriticStateStack {
    /// A stack holding only the all-unset base layer.
    pub fn new(state_size: usize) -> FlagDiacriticStateStack {
        let mut stack = Vec::with_capacity(16);
        stack.push(Rc::new(vec![0; state_size]));
        FlagDiacriticStateStack { stack }
    }

    #[inline(always)]
    fn top(&self) -> &FlagDiacriticState {
        // The base layer is never popped.
        &self.stack[self.stack.len() - 1]
    }

    /// Evaluates `op` against the current state, pushing a new layer and
    /// returning `true` if the path may continue.
    pub fn push(&mut self, op: &FlagDiacriticOperation) -> bool {
        let feature = op.feature_number as usize;
        let value = op.value_number;
        let current = self.top().get(feature).copied().unwrap_or(0);

        let next = match op.operation {
            FlagDiacriticOperator::PositiveSet => Some(value),
            FlagDiacriticOperator::NegativeSet => Some(-value),
            FlagDiacriticOperator::Require => {
                let res = if op.has_value() {
                    current == value
                } else {
                    current != 0
                };

                if !res {
                    return false;
                }
                None
            }
            FlagDiacriticOperator::Disallow => {
                let res = if op.has_value() {
                    current != value
                } else {
                    current == 0
                };

                if !res {
                    return false;
                }
                None
            }
            FlagDiacriticOperator::Clear => Some(0),
            FlagDiacriticOperator::Unification => {
                // if the feature is unset OR the feature is to this value already OR
                // the feature is negatively set to something else than this value
                if current == 0 || current == value || (current < 0 && -current != value) {
                    Some(value)
                } else {
                    return false;
                }
            }
        };

        let layer = match next {
            Some(v) if v != current => {
                let mut state = Vec::clone(self.top());
                if let Some(slot) = state.get_mut(feature) {
                    *slot = v;
                }
                Rc::new(state)
            }
            _ => Rc::clone(self.top()),
        };

        self.stack.push(layer);
        true
    }

    /// Undoes the last successful [`push`](Self::push).
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Number of layers above the base.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// The current value of every feature.
    #[inline(always)]
    pub fn state(&self) -> &[i16] {
        self.top()
    }
}
