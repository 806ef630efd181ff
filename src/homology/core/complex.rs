/*!
 * 单纯复形（filtration）
 *
 * 单纯复形是按 filtration 顺序排列的 simplex 序列，序列位置就是矩阵索引。
 *
 * # 不变量
 *
 * - 每个 simplex 的所有面都在它之前出现：index(face) < index(coface)
 * - 权重单调不减
 *
 * # 修改
 *
 * 只允许两种修改：
 * - `replace`: 用顶点集合相同、权重不同的 simplex 替换某个位置
 * - `sort_by_weight`: 按 (权重, 维度, 顶点字典序) 重新排序
 *
 * 顶点集合到索引的映射随复形一起维护，`push` 之后得到的索引在下一次
 * `sort_by_weight` 之前一直有效。
 */

use std::cmp::Ordering;
use std::collections::HashMap;

use super::super::error::{HomologyError, Result};
use super::super::types::{Index, Simplex, Value, Vertex};

/// 按 filtration 顺序排列的单纯复形
#[derive(Debug, Clone, Default)]
pub struct SimplicialComplex {
    simplices: Vec<Simplex>,
    lookup: HashMap<Vec<Vertex>, Index>,
}

impl SimplicialComplex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 simplex 序列创建复形（保持给定顺序）
    ///
    /// # Errors
    ///
    /// 顶点集合重复时返回 `DuplicateSimplex`
    pub fn from_simplices(simplices: impl IntoIterator<Item = Simplex>) -> Result<Self> {
        let mut complex = Self::new();
        for simplex in simplices {
            complex.push(simplex)?;
        }
        Ok(complex)
    }

    /// 在末尾追加一个 simplex，返回其索引
    pub fn push(&mut self, simplex: Simplex) -> Result<Index> {
        if let Some(&index) = self.lookup.get(simplex.vertices()) {
            return Err(HomologyError::DuplicateSimplex { index });
        }

        let index = self.simplices.len();
        self.lookup.insert(simplex.vertices().to_vec(), index);
        self.simplices.push(simplex);
        Ok(index)
    }

    /// 用权重不同的同一 simplex 替换位置 `index`
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange`: 索引越界
    /// - `VertexSetMismatch`: 顶点集合不同
    pub fn replace(&mut self, index: Index, simplex: Simplex) -> Result<()> {
        let len = self.simplices.len();
        let slot = self
            .simplices
            .get_mut(index)
            .ok_or(HomologyError::IndexOutOfRange { index, len })?;

        if slot.vertices() != simplex.vertices() {
            return Err(HomologyError::VertexSetMismatch { index });
        }

        *slot = simplex;
        Ok(())
    }

    /// 按 (权重, 维度, 顶点字典序) 稳定排序
    ///
    /// 相同权重时低维 simplex 在前，所以面总是在余面之前。
    pub fn sort_by_weight(&mut self) {
        self.simplices.sort_by(data_order);
        self.rebuild_lookup();
    }

    fn rebuild_lookup(&mut self) {
        self.lookup = self
            .simplices
            .iter()
            .enumerate()
            .map(|(i, s)| (s.vertices().to_vec(), i))
            .collect();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    #[inline]
    pub fn get(&self, index: Index) -> Option<&Simplex> {
        self.simplices.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Simplex> {
        self.simplices.iter()
    }

    /// 查找顶点集合对应的索引（顶点顺序任意）
    pub fn index_of(&self, vertices: &[Vertex]) -> Option<Index> {
        let mut key = vertices.to_vec();
        key.sort_unstable();
        key.dedup();
        self.lookup.get(&key).copied()
    }

    /// 最高维度（空复形返回 0）
    pub fn max_dimension(&self) -> usize {
        self.simplices
            .iter()
            .map(|s| s.dimension())
            .max()
            .unwrap_or(0)
    }

    /// 顶点（0-simplex）个数；顶点编号不要求连续
    pub fn vertex_count(&self) -> usize {
        self.simplices.iter().filter(|s| s.dimension() == 0).count()
    }

    /// 最大权重（空复形返回 None）
    pub fn max_weight(&self) -> Option<Value> {
        self.simplices
            .iter()
            .map(|s| s.weight())
            .fold(None, |acc: Option<Value>, w| {
                Some(acc.map_or(w, |m| m.max(w)))
            })
    }

    /// 检查权重单调不减
    ///
    /// # Errors
    ///
    /// 返回 `WeightOrder`，指出第一个违反单调性的位置
    pub fn check_monotonic(&self) -> Result<()> {
        for (index, pair) in self.simplices.windows(2).enumerate() {
            let (previous, current) = (pair[0].weight(), pair[1].weight());
            if previous > current {
                return Err(HomologyError::WeightOrder {
                    index: index + 1,
                    previous,
                    current,
                });
            }
        }
        Ok(())
    }

    /// 检查 filtration 的全部不变量
    ///
    /// # Errors
    ///
    /// - `WeightOrder`: 权重不单调
    /// - `MissingFace`: 某个面不在复形中
    /// - `FaceOrder`: 某个面出现在余面之后
    pub fn validate(&self) -> Result<()> {
        self.check_monotonic()?;

        for (index, simplex) in self.simplices.iter().enumerate() {
            for (_, face) in simplex.faces() {
                match self.lookup.get(&face) {
                    Some(&face_index) if face_index < index => {}
                    Some(&face_index) => {
                        return Err(HomologyError::FaceOrder {
                            face: face_index,
                            simplex: index,
                        })
                    }
                    None => {
                        return Err(HomologyError::MissingFace {
                            simplex: index,
                            face,
                        })
                    }
                }
            }
        }

        Ok(())
    }
}

impl std::ops::Index<Index> for SimplicialComplex {
    type Output = Simplex;

    fn index(&self, index: Index) -> &Simplex {
        &self.simplices[index]
    }
}

impl<'a> IntoIterator for &'a SimplicialComplex {
    type Item = &'a Simplex;
    type IntoIter = std::slice::Iter<'a, Simplex>;

    fn into_iter(self) -> Self::IntoIter {
        self.simplices.iter()
    }
}

/// 数据 filtration 顺序：权重，然后维度，然后顶点字典序
pub fn data_order(a: &Simplex, b: &Simplex) -> Ordering {
    a.weight()
        .total_cmp(&b.weight())
        .then_with(|| a.dimension().cmp(&b.dimension()))
        .then_with(|| a.vertices().cmp(b.vertices()))
}

// ============================================================================
// 单元测试
// ============================================================================
