/*!
 * 列存储
 *
 * 边界矩阵按列存储。归约算法只需要以下操作：
 *
 * - 设置 / 读取 / 清空一列
 * - 列加法 `column[target] += factor * column[source]`
 * - 查询 pivot（列中最大的行索引）
 *
 * 三种实现共享同一个接口，通过 `RepresentationKind` 在运行时选择：
 *
 * | 实现 | pivot 查询 | 列加法 | 系数域 |
 * |------|-----------|--------|--------|
 * | `BitsetColumns` | O(1)（缓存） | O(N/64) | 仅 Z/2Z |
 * | `ListColumns` | O(1) | O(\|s\| + \|t\|) 归并 | 任意 |
 * | `MapColumns` | O(log k) | O(\|s\| log \|t\|) | 任意 |
 */

use std::fmt;

use super::super::config::{Coefficients, RepresentationKind};
use super::super::error::{HomologyError, Result};
use super::super::types::{Coefficient, Index};
use super::field::{Field, PrimeField, Z2};

mod bitset;
mod list;
mod map;

pub use bitset::BitsetColumns;
pub use list::ListColumns;
pub use map::MapColumns;

/// 列中的一个非零元素：(行索引, 系数)
pub type Entry = (Index, Coefficient);

/// 列存储接口
///
/// 实现者不检查三角性，这由 `BoundaryMatrix` 负责。
pub trait ColumnStore: Send + fmt::Debug {
    /// 设置列数，所有列清空
    fn set_num_columns(&mut self, n: Index);

    fn num_columns(&self) -> Index;

    /// 整体替换一列
    ///
    /// `entries` 必须按行索引严格升序，且系数非零
    fn set_column(&mut self, column: Index, entries: &[Entry]);

    /// 按行索引升序返回一列的非零元素
    fn column(&self, column: Index) -> Vec<Entry>;

    fn clear_column(&mut self, column: Index);

    /// `column[target] += factor * column[source]`
    ///
    /// factor 的选取使 target 中 source 的 pivot 行被消去；
    /// 若 target 不含该行，则执行普通的减法。Z/2Z 下即对称差。
    fn add_columns(&mut self, source: Index, target: Index);

    /// pivot：列中最大的行索引，空列返回 None
    fn maximum_index(&self, column: Index) -> Option<Index>;

    /// 一列中非零元素的个数
    fn column_len(&self, column: Index) -> usize;

    /// 系数域的特征
    fn characteristic(&self) -> u16;

    /// 相同实现、相同系数域的空存储
    fn empty_like(&self) -> Box<dyn ColumnStore>;
}

/// 根据配置创建列存储
///
/// # Errors
///
/// 系数域无效，或位集存储搭配非 Z/2Z 系数时返回 `UnsupportedCoefficients`
pub fn new_store(
    kind: RepresentationKind,
    coefficients: Coefficients,
) -> Result<Box<dyn ColumnStore>> {
    coefficients.validate()?;

    let store: Box<dyn ColumnStore> = match (kind, coefficients.is_binary()) {
        (RepresentationKind::Bitset, true) => Box::new(BitsetColumns::new()),
        (RepresentationKind::Bitset, false) => {
            return Err(HomologyError::UnsupportedCoefficients(format!(
                "bitset columns only support Z/2Z, got Z/{}Z",
                coefficients.characteristic()
            )))
        }
        (RepresentationKind::SparseList, true) => Box::new(ListColumns::new(Z2)),
        (RepresentationKind::SparseList, false) => Box::new(ListColumns::new(PrimeField::new(
            coefficients.characteristic(),
        )?)),
        (RepresentationKind::SparseMap, true) => Box::new(MapColumns::new(Z2)),
        (RepresentationKind::SparseMap, false) => Box::new(MapColumns::new(PrimeField::new(
            coefficients.characteristic(),
        )?)),
    };

    Ok(store)
}

/// 计算消元系数
///
/// 若 target 在 source 的 pivot 行上有系数 t，source 的 pivot 系数为 s，
/// 则 factor = -t/s；否则 factor = -1。
#[inline]
fn elimination_factor<F: Field>(
    field: &F,
    source_pivot: Option<Entry>,
    target_coefficient: Option<Coefficient>,
) -> Coefficient {
    match (source_pivot, target_coefficient) {
        (Some((_, s)), Some(t)) => field.neg(field.mul(t, field.inv(s))),
        _ => field.neg(field.one()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_stores() -> Vec<Box<dyn ColumnStore>> {
        vec![
            new_store(RepresentationKind::Bitset, Coefficients::Binary).unwrap(),
            new_store(RepresentationKind::SparseList, Coefficients::Binary).unwrap(),
            new_store(RepresentationKind::SparseMap, Coefficients::Binary).unwrap(),
        ]
    }

    #[test]
    fn test_stores_agree_on_binary_field() {
        for mut store in all_stores() {
            store.set_num_columns(6);
            assert_eq!(store.num_columns(), 6);

            store.set_column(4, &[(0, 1), (1, 1), (3, 1)]);
            store.set_column(5, &[(1, 1), (2, 1), (3, 1)]);
            assert_eq!(store.maximum_index(4), Some(3));

            store.add_columns(4, 5);
            assert_eq!(store.column(5), vec![(0, 1), (2, 1)], "{:?}", store);
            assert_eq!(store.maximum_index(5), Some(2));
            assert_eq!(store.column_len(5), 2);

            store.clear_column(5);
            assert_eq!(store.maximum_index(5), None);
            assert!(store.column(5).is_empty());
        }
    }

    #[test]
    fn test_add_column_to_itself() {
        for mut store in all_stores() {
            store.set_num_columns(3);
            store.set_column(2, &[(0, 1), (1, 1)]);
            store.add_columns(2, 2);
            assert_eq!(store.maximum_index(2), None);
        }
    }

    #[test]
    fn test_prime_field_elimination() {
        for kind in [RepresentationKind::SparseList, RepresentationKind::SparseMap] {
            let mut store = new_store(kind, Coefficients::Prime(3)).unwrap();
            store.set_num_columns(4);

            // ∂{0,1} = v1 - v0, 系数在 Z/3Z 中 -1 = 2
            store.set_column(2, &[(0, 2), (1, 1)]);
            store.set_column(3, &[(0, 1), (1, 2)]);

            // target 在行 1 的系数为 2，source 为 1，factor = -2 = 1
            store.add_columns(2, 3);
            assert_eq!(store.column(3), Vec::<Entry>::new());
            assert_eq!(store.characteristic(), 3);
        }
    }

    #[test]
    fn test_bitset_rejects_prime_field() {
        let result = new_store(RepresentationKind::Bitset, Coefficients::Prime(5));
        assert!(result.is_err());
    }
}
