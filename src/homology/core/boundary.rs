/*!
 * 边界矩阵
 *
 * `BoundaryMatrix` 是列存储之上的一层薄封装，负责：
 *
 * - 三角性检查：第 j 列只能引用行 < j
 * - 每列的 simplex 维度
 * - 对偶（余边界矩阵）模式，以及对偶索引与原始 filtration 索引之间的转换
 *
 * # 对偶
 *
 * 余边界矩阵是边界矩阵的反转置：原矩阵第 j 列第 i 行的元素移动到
 * 第 N-1-i 列第 N-1-j 行。反转置仍然是严格上三角的，所以归约算法
 * 不需要知道矩阵的方向。
 *
 * 在对偶矩阵上得到的配对 (pivot, column) 对应原始索引
 * (N-1-column, N-1-pivot)。
 */

use super::super::config::{Coefficients, RepresentationKind};
use super::super::error::{HomologyError, Result};
use super::super::types::{Coefficient, Index};
use super::complex::SimplicialComplex;
use super::field::{Field, PrimeField};
use super::representation::{new_store, ColumnStore, Entry};

/// 边界矩阵（或余边界矩阵）
#[derive(Debug)]
pub struct BoundaryMatrix {
    store: Box<dyn ColumnStore>,

    /// 每列对应 simplex 的维度（按矩阵列顺序）
    dimensions: Vec<usize>,

    /// 是否为余边界矩阵
    dualized: bool,
}

impl BoundaryMatrix {
    /// 使用指定的列存储创建空矩阵
    ///
    /// # Errors
    ///
    /// 系数域无效或与存储不兼容时返回 `UnsupportedCoefficients`
    pub fn new(kind: RepresentationKind, coefficients: Coefficients) -> Result<Self> {
        Ok(Self::with_store(new_store(kind, coefficients)?))
    }

    pub fn with_store(store: Box<dyn ColumnStore>) -> Self {
        Self {
            store,
            dimensions: Vec::new(),
            dualized: false,
        }
    }

    /// 从单纯复形构建边界矩阵
    ///
    /// 第 j 列是第 j 个 simplex 的边界，第 i 个面的系数为 (-1)^i。
    ///
    /// # Arguments
    ///
    /// * `complex` - 按 filtration 排序的单纯复形
    /// * `kind` - 列存储实现
    /// * `coefficients` - 系数域
    ///
    /// # Errors
    ///
    /// - `MissingFace`: 某个面不在复形中
    /// - `Triangularity`: 某个面出现在余面之后
    /// - `UnsupportedCoefficients`: 系数域无效
    pub fn from_complex(
        complex: &SimplicialComplex,
        kind: RepresentationKind,
        coefficients: Coefficients,
    ) -> Result<Self> {
        let mut matrix = Self::new(kind, coefficients)?;
        let field = PrimeField::new(matrix.store.characteristic())?;
        matrix.set_num_columns(complex.len());

        let mut entries: Vec<Entry> = Vec::new();
        for (j, simplex) in complex.iter().enumerate() {
            entries.clear();
            for (positive, face) in simplex.faces() {
                let row = complex
                    .index_of(&face)
                    .ok_or(HomologyError::MissingFace { simplex: j, face })?;
                entries.push((row, field.from_sign(positive)));
            }

            matrix.set_column_with_coefficients(j, &entries)?;
            matrix.set_dimension(j, simplex.dimension());
        }

        Ok(matrix)
    }

    // ========================================================================
    // 列操作
    // ========================================================================

    /// 设置列数 N，所有列清空，维度置零
    pub fn set_num_columns(&mut self, n: Index) {
        self.store.set_num_columns(n);
        self.dimensions = vec![0; n];
    }

    #[inline]
    pub fn num_columns(&self) -> Index {
        self.store.num_columns()
    }

    /// 用行索引集合整体替换第 j 列（系数均为 1）
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange`: 列索引越界
    /// - `Triangularity`: 某个行索引 >= j
    pub fn set_column(&mut self, column: Index, rows: &[Index]) -> Result<()> {
        let entries: Vec<Entry> = rows.iter().map(|&row| (row, 1)).collect();
        self.set_column_with_coefficients(column, &entries)
    }

    /// 用 (行, 系数) 整体替换第 j 列
    ///
    /// 行索引可以乱序；重复的行系数相加，系数为零的元素被丢弃。
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange`: 列索引越界
    /// - `Triangularity`: 某个行索引 >= j
    pub fn set_column_with_coefficients(&mut self, column: Index, entries: &[Entry]) -> Result<()> {
        self.check_column(column)?;

        if let Some(&(row, _)) = entries.iter().find(|&&(row, _)| row >= column) {
            return Err(HomologyError::Triangularity { column, row });
        }

        let p = self.store.characteristic() as u32;
        let mut sorted = entries.to_vec();
        sorted.sort_unstable_by_key(|e| e.0);

        let mut normalized: Vec<Entry> = Vec::with_capacity(sorted.len());
        for (row, coeff) in sorted {
            let coeff = (coeff as u32 % p) as Coefficient;
            match normalized.last_mut() {
                Some(last) if last.0 == row => {
                    last.1 = ((last.1 as u32 + coeff as u32) % p) as Coefficient;
                }
                _ => normalized.push((row, coeff)),
            }
        }
        normalized.retain(|e| e.1 != 0);

        self.store.set_column(column, &normalized);
        Ok(())
    }

    /// 第 j 列的行索引（升序）
    pub fn column(&self, column: Index) -> Vec<Index> {
        self.store.column(column).into_iter().map(|e| e.0).collect()
    }

    /// 第 j 列的 (行, 系数)（按行升序）
    pub fn column_entries(&self, column: Index) -> Vec<Entry> {
        self.store.column(column)
    }

    pub fn clear_column(&mut self, column: Index) {
        self.store.clear_column(column);
    }

    /// `column[target] += factor * column[source]`，使 target 的 pivot 被消去
    #[inline]
    pub fn add_columns(&mut self, source: Index, target: Index) {
        self.store.add_columns(source, target);
    }

    /// pivot：第 j 列中最大的行索引
    #[inline]
    pub fn maximum_index(&self, column: Index) -> Option<Index> {
        self.store.maximum_index(column)
    }

    /// 系数域的特征
    pub fn characteristic(&self) -> u16 {
        self.store.characteristic()
    }

    fn check_column(&self, column: Index) -> Result<()> {
        let len = self.num_columns();
        if column >= len {
            return Err(HomologyError::IndexOutOfRange { index: column, len });
        }
        Ok(())
    }

    // ========================================================================
    // 维度
    // ========================================================================

    /// 设置第 j 列（矩阵列顺序）的 simplex 维度
    pub fn set_dimension(&mut self, column: Index, dimension: usize) {
        self.dimensions[column] = dimension;
    }

    /// 第 j 列（矩阵列顺序）的 simplex 维度
    #[inline]
    pub fn dimension_of(&self, column: Index) -> usize {
        self.dimensions[column]
    }

    /// 矩阵中 simplex 的最高维度
    pub fn dimension(&self) -> usize {
        self.dimensions.iter().copied().max().unwrap_or(0)
    }

    /// 原始 filtration 索引对应 simplex 的维度
    pub fn simplex_dimension(&self, index: Index) -> usize {
        self.dimensions[self.to_matrix_index(index)]
    }

    /// 第 j 列在给定同调维度范围内是否需要归约
    ///
    /// 边界矩阵中，维度 d 的列产生 (d-1) 维配对并决定 d 维 simplex 是否为
    /// destroyer，所以需要维度 [min, max+1]。余边界矩阵中，维度 d 的列产生
    /// d 维配对，需要维度 [min-1, max]。
    pub fn column_in_bounds(&self, column: Index, min: usize, max: usize) -> bool {
        let d = self.dimensions[column];
        if self.dualized {
            d >= min.saturating_sub(1) && d <= max
        } else {
            d >= min && d <= max.saturating_add(1)
        }
    }

    // ========================================================================
    // 对偶
    // ========================================================================

    pub fn set_dualized(&mut self, dualized: bool) {
        self.dualized = dualized;
    }

    #[inline]
    pub fn is_dualized(&self) -> bool {
        self.dualized
    }

    /// 返回反转置后的矩阵，对偶标志取反
    pub fn dualize(&self) -> Self {
        let n = self.num_columns();

        let mut columns: Vec<Vec<Entry>> = vec![Vec::new(); n];
        for j in 0..n {
            for (i, coeff) in self.store.column(j) {
                columns[n - 1 - i].push((n - 1 - j, coeff));
            }
        }

        let mut store = self.store.empty_like();
        store.set_num_columns(n);
        for (c, mut entries) in columns.into_iter().enumerate() {
            // 按 j 升序插入，行 n-1-j 是降序的
            entries.reverse();
            store.set_column(c, &entries);
        }

        let mut dimensions = self.dimensions.clone();
        dimensions.reverse();

        Self {
            store,
            dimensions,
            dualized: !self.dualized,
        }
    }

    /// 把矩阵坐标中的配对 (pivot, column) 转换为原始的 (creator, destroyer)
    #[inline]
    pub fn to_original_pair(&self, pivot: Index, column: Index) -> (Index, Index) {
        if self.dualized {
            let n = self.num_columns();
            (n - 1 - column, n - 1 - pivot)
        } else {
            (pivot, column)
        }
    }

    /// 把原始 filtration 索引转换为矩阵列索引
    #[inline]
    pub fn to_matrix_index(&self, index: Index) -> Index {
        if self.dualized {
            self.num_columns() - 1 - index
        } else {
            index
        }
    }
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::super::types::Simplex;
    use super::*;

    fn triangle_boundary() -> SimplicialComplex {
        SimplicialComplex::from_simplices(vec![
            Simplex::vertex(0, 0.0),
            Simplex::vertex(1, 0.0),
            Simplex::vertex(2, 0.0),
            Simplex::new([0, 1], 1.0),
            Simplex::new([1, 2], 1.0),
            Simplex::new([0, 2], 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_complex() {
        let m = BoundaryMatrix::from_complex(
            &triangle_boundary(),
            RepresentationKind::SparseList,
            Coefficients::Binary,
        )
        .unwrap();

        assert_eq!(m.num_columns(), 6);
        assert!(m.column(0).is_empty());
        assert_eq!(m.column(3), vec![0, 1]);
        assert_eq!(m.column(5), vec![0, 2]);
        assert_eq!(m.maximum_index(4), Some(2));
        assert_eq!(m.dimension_of(5), 1);
        assert_eq!(m.dimension(), 1);
        assert!(!m.is_dualized());
    }

    #[test]
    fn test_signed_boundary() {
        let m = BoundaryMatrix::from_complex(
            &triangle_boundary(),
            RepresentationKind::SparseMap,
            Coefficients::Prime(3),
        )
        .unwrap();

        // ∂{0,1} = {1} - {0}
        assert_eq!(m.column_entries(3), vec![(0, 2), (1, 1)]);
    }

    #[test]
    fn test_triangularity_violation() {
        let mut m = BoundaryMatrix::new(RepresentationKind::SparseList, Coefficients::Binary)
            .unwrap();
        m.set_num_columns(4);

        assert!(m.set_column(3, &[2, 0]).is_ok());
        assert_eq!(m.column(3), vec![0, 2]);

        assert_eq!(
            m.set_column(2, &[0, 2]),
            Err(HomologyError::Triangularity { column: 2, row: 2 })
        );
        assert_eq!(
            m.set_column(4, &[0]),
            Err(HomologyError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_duplicate_rows_cancel() {
        let mut m = BoundaryMatrix::new(RepresentationKind::SparseList, Coefficients::Binary)
            .unwrap();
        m.set_num_columns(4);
        m.set_column(3, &[1, 0, 1]).unwrap();
        assert_eq!(m.column(3), vec![0]);
    }

    #[test]
    fn test_from_complex_missing_face() {
        let k = SimplicialComplex::from_simplices(vec![
            Simplex::vertex(0, 0.0),
            Simplex::new([0, 1], 1.0),
        ])
        .unwrap();

        let err = BoundaryMatrix::from_complex(&k, RepresentationKind::SparseList, Coefficients::Binary)
            .unwrap_err();
        assert_eq!(
            err,
            HomologyError::MissingFace {
                simplex: 1,
                face: vec![1],
            }
        );
    }

    #[test]
    fn test_dualize_anti_transpose() {
        for kind in [
            RepresentationKind::Bitset,
            RepresentationKind::SparseList,
            RepresentationKind::SparseMap,
        ] {
            let m = BoundaryMatrix::from_complex(&triangle_boundary(), kind, Coefficients::Binary)
                .unwrap();
            let d = m.dualize();

            assert!(d.is_dualized());
            assert_eq!(d.num_columns(), 6);

            // 顶点 0 的余边界 = 边 3 和边 5，对偶列 5，对偶行 2 和 0
            assert_eq!(d.column(5), vec![0, 2]);
            // 顶点 2 的余边界 = 边 4 和边 5，对偶列 3
            assert_eq!(d.column(3), vec![0, 1]);
            // 边没有余面
            assert!(d.column(0).is_empty());

            assert_eq!(d.dimension_of(0), 1);
            assert_eq!(d.dimension_of(5), 0);
            assert_eq!(d.simplex_dimension(0), 0);
            assert_eq!(d.to_original_pair(1, 4), (1, 4));

            let back = d.dualize();
            assert!(!back.is_dualized());
            for j in 0..6 {
                assert_eq!(back.column(j), m.column(j));
            }
        }
    }

    #[test]
    fn test_column_in_bounds() {
        let m = BoundaryMatrix::from_complex(
            &triangle_boundary(),
            RepresentationKind::SparseList,
            Coefficients::Binary,
        )
        .unwrap();

        // 0 维配对需要维度 0 和 1 的列
        assert!(m.column_in_bounds(0, 0, 0));
        assert!(m.column_in_bounds(3, 0, 0));
        assert!(!m.column_in_bounds(0, 1, 1));

        let d = m.dualize();
        assert!(d.column_in_bounds(5, 0, 0));
        assert!(!d.column_in_bounds(0, 0, 0));
        assert!(d.column_in_bounds(0, 1, 1));
        assert!(d.column_in_bounds(5, 1, 1));
    }
}
