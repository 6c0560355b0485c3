//! Bit-packed row selection snapshot used across view rebuilds

use std::ops::{BitAnd, BitOrAssign, Shl};

/// Fixed-width word a [`SelectionBitset`] packs rows into
pub trait BitWord:
    Copy + Default + PartialEq + BitAnd<Output = Self> + BitOrAssign + Shl<u32, Output = Self>
{
    /// log2 of the word width
    const SHIFT: u32;
    const ONE: Self;
    const ZERO: Self;
}

impl BitWord for u32 {
    const SHIFT: u32 = 5;
    const ONE: Self = 1;
    const ZERO: Self = 0;
}

impl BitWord for u64 {
    const SHIFT: u32 = 6;
    const ONE: Self = 1;
    const ZERO: Self = 0;
}

/// One bit per row: word `row >> SHIFT`, bit `row % width`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionBitset<W: BitWord = u64> {
    words: Vec<W>,
    row_count: usize,
}

impl<W: BitWord> SelectionBitset<W> {
    const MASK: usize = (1 << W::SHIFT) - 1;

    /// Capture the selection state of rows `0..row_count`
    pub fn snapshot<F>(row_count: usize, is_selected: F) -> Self
    where
        F: Fn(usize) -> bool,
    {
        let word_count = (row_count + Self::MASK) >> W::SHIFT;
        let mut words = vec![W::ZERO; word_count];

        for row in (0..row_count).filter(|&row| is_selected(row)) {
            words[row >> W::SHIFT] |= W::ONE << (row & Self::MASK) as u32;
        }

        Self { words, row_count }
    }

    /// Row count at snapshot time
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn contains(&self, row: usize) -> bool {
        if row >= self.row_count {
            return false;
        }
        let word = self.words[row >> W::SHIFT];
        word & (W::ONE << (row & Self::MASK) as u32) != W::ZERO
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == W::ZERO)
    }

    /// Selected rows in ascending order, bounded by the snapshot row count
    pub fn selected_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.row_count).filter(move |&row| self.contains(row))
    }

    /// Replay the selection. Only rows below the snapshot row count are
    /// visited.
    pub fn restore<F>(&self, mut set_selected: F)
    where
        F: FnMut(usize),
    {
        for row in self.selected_rows() {
            set_selected(row);
        }
    }

    /// Replay the selection through an old-to-new row mapping. Rows that map
    /// to `None`, or fall outside the mapping, are not restored.
    pub fn restore_mapped<F>(&self, mapping: &[Option<usize>], mut set_selected: F)
    where
        F: FnMut(usize),
    {
        for row in self.selected_rows() {
            if let Some(Some(new_row)) = mapping.get(row) {
                set_selected(*new_row);
            }
        }
    }
}
