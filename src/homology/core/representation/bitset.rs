//! 稠密位集列存储（Z/2Z）
//!
//! 每列是长度为 N 的位向量，第 i 位对应 `words[i / 64]` 的第 `i % 64` 位。
//! pivot 在每次修改后重新计算并缓存，查询为 O(1)。

use std::fmt;

use super::super::super::types::Index;
use super::{ColumnStore, Entry};

/// 单列位向量
#[derive(Clone, PartialEq, Eq)]
struct BitColumn {
    words: Vec<u64>,
    /// 最高置位（缓存）
    pivot: Option<Index>,
}

impl BitColumn {
    fn zeros(len: usize) -> Self {
        Self {
            words: vec![0; (len + 63) / 64],
            pivot: None,
        }
    }

    #[inline]
    fn set(&mut self, i: usize) {
        self.words[i / 64] |= 1u64 << (i % 64);
    }

    fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
        self.pivot = None;
    }

    fn xor_assign(&mut self, other: &BitColumn) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a ^= b;
        }
        self.update_pivot();
    }

    fn update_pivot(&mut self) {
        self.pivot = self
            .words
            .iter()
            .enumerate()
            .rev()
            .find(|&(_, &w)| w != 0)
            .map(|(idx, &w)| idx * 64 + 63 - w.leading_zeros() as usize);
    }

    fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(idx, &word)| {
            let mut w = word;
            std::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let bit = w.trailing_zeros() as usize;
                w &= w - 1;
                Some(idx * 64 + bit)
            })
        })
    }

    fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// 稠密位集列存储
#[derive(Clone, Default)]
pub struct BitsetColumns {
    columns: Vec<BitColumn>,
}

impl BitsetColumns {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for BitsetColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitsetColumns({} columns)", self.columns.len())
    }
}

impl ColumnStore for BitsetColumns {
    fn set_num_columns(&mut self, n: Index) {
        self.columns = vec![BitColumn::zeros(n); n];
    }

    fn num_columns(&self) -> Index {
        self.columns.len()
    }

    fn set_column(&mut self, column: Index, entries: &[Entry]) {
        let col = &mut self.columns[column];
        col.clear();
        for &(row, coeff) in entries {
            if coeff & 1 == 1 {
                col.set(row);
            }
        }
        col.update_pivot();
    }

    fn column(&self, column: Index) -> Vec<Entry> {
        self.columns[column].ones().map(|row| (row, 1)).collect()
    }

    fn clear_column(&mut self, column: Index) {
        self.columns[column].clear();
    }

    fn add_columns(&mut self, source: Index, target: Index) {
        if source == target {
            self.columns[target].clear();
            return;
        }

        if source < target {
            let (left, right) = self.columns.split_at_mut(target);
            right[0].xor_assign(&left[source]);
        } else {
            let (left, right) = self.columns.split_at_mut(source);
            left[target].xor_assign(&right[0]);
        }
    }

    #[inline]
    fn maximum_index(&self, column: Index) -> Option<Index> {
        self.columns[column].pivot
    }

    fn column_len(&self, column: Index) -> usize {
        self.columns[column].count_ones()
    }

    fn characteristic(&self) -> u16 {
        2
    }

    fn empty_like(&self) -> Box<dyn ColumnStore> {
        Box::new(BitsetColumns::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot_across_word_boundary() {
        let mut store = BitsetColumns::new();
        store.set_num_columns(130);
        store.set_column(129, &[(3, 1), (64, 1), (128, 1)]);

        assert_eq!(store.maximum_index(129), Some(128));
        assert_eq!(store.column(129), vec![(3, 1), (64, 1), (128, 1)]);
        assert_eq!(store.column_len(129), 3);
    }

    #[test]
    fn test_xor_updates_cached_pivot() {
        let mut store = BitsetColumns::new();
        store.set_num_columns(100);
        store.set_column(90, &[(10, 1), (70, 1)]);
        store.set_column(95, &[(5, 1), (70, 1)]);

        store.add_columns(90, 95);
        assert_eq!(store.maximum_index(95), Some(10));

        // 反向（source > target）同样有效
        store.add_columns(95, 90);
        assert_eq!(store.column(90), vec![(5, 1), (70, 1)]);
    }
}
