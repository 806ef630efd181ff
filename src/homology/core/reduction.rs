/*!
 * 标准列归约
 *
 * 把边界矩阵原地归约为每个非零列 pivot 唯一的形式，并在每列确定
 * pivot 时记录一个持久性对。
 *
 * # 算法流程
 *
 * 1. 维护 `pivot_owner: 行 → 列`
 * 2. 按矩阵列顺序处理第 j 列（对偶矩阵即原始 filtration 的逆序）：
 *    - 查询 pivot，列为零则停止
 *    - 若 pivot 已属于更早的列 k，执行 `add_columns(k, j)` 后重试
 *    - 否则 `pivot_owner[pivot] = j`，记录 (pivot, j)
 * 3. 既不是 destroyer 也没有认领 pivot 的索引是 essential class
 *
 * 已经认领 pivot 的较早列总是胜出，filtration 顺序是唯一的 tie-break。
 * 归约本身不区分矩阵方向，对偶配对在 `BoundaryMatrix` 中转换回原始索引。
 */

use tracing::{debug, trace};

use super::super::config::ReductionConfig;
use super::super::types::{Index, PersistencePairing};
use super::boundary::BoundaryMatrix;

// ============================================================================
// 统计
// ============================================================================

/// 一次归约的统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReductionStats {
    /// 实际归约的列数
    pub columns: usize,

    /// 列加法次数
    pub column_additions: usize,

    /// 有限配对数（维度过滤之后）
    pub pairs: usize,

    /// 输出的未配对 creator 数
    pub essentials: usize,
}

// ============================================================================
// StandardReducer
// ============================================================================

/// 标准列归约算法
#[derive(Debug, Clone, Default)]
pub struct StandardReducer {
    min_dimension: usize,
    max_dimension: Option<usize>,
    include_all_unpaired_creators: bool,
}

impl StandardReducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ReductionConfig) -> Self {
        Self {
            min_dimension: config.min_dimension,
            max_dimension: config.max_dimension,
            include_all_unpaired_creators: config.include_all_unpaired_creators,
        }
    }

    /// 只输出 creator 维度在 [min, max] 内的配对
    ///
    /// max 为 None 时使用矩阵的最高维度
    pub fn with_dimension_bounds(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_dimension = min;
        self.max_dimension = max;
        self
    }

    /// 是否输出最高维度的未配对 creator
    pub fn with_include_all_unpaired_creators(mut self, include: bool) -> Self {
        self.include_all_unpaired_creators = include;
        self
    }

    /// 归约矩阵并返回配对（按 creator 排序）
    pub fn reduce(&self, matrix: &mut BoundaryMatrix) -> PersistencePairing {
        self.reduce_with_stats(matrix).0
    }

    /// 归约矩阵，同时返回统计信息
    ///
    /// # Arguments
    ///
    /// * `matrix` - 边界矩阵或余边界矩阵（原地归约）
    ///
    /// # Returns
    ///
    /// (配对, 统计)，配对中的索引都是原始 filtration 索引
    pub fn reduce_with_stats(
        &self,
        matrix: &mut BoundaryMatrix,
    ) -> (PersistencePairing, ReductionStats) {
        let n = matrix.num_columns();
        let top = matrix.dimension();
        let min = self.min_dimension;
        let max = self.max_dimension.unwrap_or(top);

        debug!(
            columns = n,
            dualized = matrix.is_dualized(),
            min_dimension = min,
            max_dimension = max,
            "reducing boundary matrix"
        );

        let mut stats = ReductionStats::default();
        let mut pivot_owner: Vec<Option<Index>> = vec![None; n];
        let mut raw_pairs: Vec<(Index, Index)> = Vec::new();

        for j in 0..n {
            if !matrix.column_in_bounds(j, min, max) {
                continue;
            }
            stats.columns += 1;

            while let Some(pivot) = matrix.maximum_index(j) {
                match pivot_owner[pivot] {
                    Some(owner) => {
                        trace!(column = j, pivot, owner, "pivot collision");
                        matrix.add_columns(owner, j);
                        stats.column_additions += 1;
                    }
                    None => {
                        pivot_owner[pivot] = Some(j);
                        raw_pairs.push((pivot, j));
                        break;
                    }
                }
            }
        }

        let mut pairing = PersistencePairing::new();
        let mut paired = vec![false; n];

        for (pivot, column) in raw_pairs {
            let (creator, destroyer) = matrix.to_original_pair(pivot, column);
            paired[creator] = true;
            paired[destroyer] = true;

            let dim = matrix.simplex_dimension(creator);
            if dim >= min && dim <= max {
                pairing.add(creator, destroyer);
            }
        }

        for index in (0..n).filter(|&i| !paired[i]) {
            let dim = matrix.simplex_dimension(index);
            if dim < min || dim > max {
                continue;
            }

            // 最高维度的未配对 simplex 没有余面可以消灭它
            if dim == top && top > 0 && !self.include_all_unpaired_creators {
                continue;
            }

            pairing.add_unpaired(index);
        }

        pairing.sort();
        stats.pairs = pairing.pairs().len();
        stats.essentials = pairing.unpaired().len();

        debug!(
            column_additions = stats.column_additions,
            pairs = stats.pairs,
            essentials = stats.essentials,
            "reduction finished"
        );

        (pairing, stats)
    }
}

/// 检查矩阵是否已归约：每个非零列的 pivot 互不相同
pub fn is_reduced(matrix: &BoundaryMatrix) -> bool {
    let n = matrix.num_columns();
    let mut seen = vec![false; n];

    for j in 0..n {
        if let Some(pivot) = matrix.maximum_index(j) {
            if seen[pivot] {
                return false;
            }
            seen[pivot] = true;
        }
    }

    true
}

// ============================================================================
// 单元测试
// ============================================================================
