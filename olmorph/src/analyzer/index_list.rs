use crate::types::SymbolNumber;

/// A growable symbol buffer with a cursor; reads and writes are relative to
/// the cursor. Positions never written read as `None`.
#[derive(Debug, Clone, Default)]
pub struct IndexList {
    items: Vec<Option<SymbolNumber>>,
    cursor: usize,
}

impl IndexList {
    /// An empty buffer with room for `capacity` symbols.
    pub fn with_capacity(capacity: usize) -> IndexList {
        IndexList {
            items: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    #[inline(always)]
    fn position(&self, offset: isize) -> Option<usize> {
        self.cursor.checked_add_signed(offset)
    }

    /// Symbol at `offset` from the cursor.
    #[inline(always)]
    pub fn get(&self, offset: isize) -> Option<SymbolNumber> {
        self.position(offset)
            .and_then(|i| self.items.get(i).copied())
            .flatten()
    }

    /// Writes at `offset` from the cursor, growing the buffer. Positions before the start are ignored.
    #[inline(always)]
    pub fn put(&mut self, value: Option<SymbolNumber>, offset: isize) {
        let i = match self.position(offset) {
            Some(i) => i,
            None => return,
        };

        if i >= self.items.len() {
            self.items.resize(i + 1, None);
        }
        self.items[i] = value;
    }

    /// Writes at the cursor and steps past it.
    #[inline(always)]
    pub fn push(&mut self, value: Option<SymbolNumber>) {
        self.put(value, 0);
        self.cursor += 1;
    }

    /// Moves the cursor forward.
    #[inline(always)]
    pub fn advance(&mut self, n: usize) {
        self.cursor += n;
    }

    /// Moves the cursor back, stopping at the start.
    #[inline(always)]
    pub fn retreat(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
    }

    /// Absolute cursor position.
    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to the start.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Symbols from the start of the buffer up to the first unset slot.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolNumber> + '_ {
        self.items.iter().map_while(|s| *s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_addressing() {
        let mut list = IndexList::default();
        list.push(Some(3));
        list.push(Some(4));

        assert_eq!(list.cursor(), 2);
        assert_eq!(list.get(-1), Some(4));
        assert_eq!(list.get(-2), Some(3));
        assert_eq!(list.get(-3), None);
        assert_eq!(list.get(0), None);
        assert_eq!(list.get(100), None);

        list.put(Some(9), 3);
        assert_eq!(list.get(3), Some(9));
        assert_eq!(list.get(1), None);
    }

    #[test]
    fn symbols_stop_at_sentinel() {
        let mut list = IndexList::default();
        for s in [1, 2, 3] {
            list.push(Some(s));
        }
        list.retreat(1);
        list.put(None, 0);

        assert_eq!(list.symbols().collect::<Vec<_>>(), vec![1, 2]);

        list.reset();
        assert_eq!(list.get(0), Some(1));
        list.retreat(5);
        assert_eq!(list.cursor(), 0);
    }
}
