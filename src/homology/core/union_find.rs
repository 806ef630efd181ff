/*!
 * 0 维持久同调（连通分量）
 *
 * 这个模块实现 0 维配对的快速路径：
 * - `UnionFind`: 记录分量 birth 和合并历史的并查集
 * - `UnionFindReducer`: 按 filtration 顺序处理顶点和边
 *
 * # 算法概览
 *
 * 1. 每个顶点成为独立分量，birth = 顶点的 filtration 索引
 * 2. 按 filtration 顺序遍历边 {u, v}：
 *    - 若 u 和 v 属于不同分量，较年轻的分量（较大的 birth）死亡（elder rule），
 *      记录 (较晚的 birth, 边索引) 并合并，保留较老的根
 *    - 若属于同一分量，这条边闭合了一个环，不产生 0 维配对
 * 3. 最终剩余的根是 essential class
 *
 * 结果与在同一 filtration 上做标准列归约得到的 0 维配对完全一致。
 */

use std::collections::HashMap;

use tracing::debug;

use super::super::error::{HomologyError, Result};
use super::super::types::{Index, PersistencePairing, Vertex};
use super::complex::SimplicialComplex;

// ============================================================================
// UnionFind - 并查集（支持 birth 追踪和成员查询）
// ============================================================================

/// UnionFind 数据结构
///
/// 扩展的并查集，额外追踪每个分量的 birth 以及合并历史。
///
/// # 特性
///
/// - **路径压缩**: `find` 时扁平化树结构
/// - **Elder rule**: 合并时保留 birth 较小的根，birth 相同时保留标签较小的元素；
///   因此根总是创建该分量的顶点
/// - **成员查询**: `get(root)` 返回分量的全部元素，对已被合并的历史根同样有效
/// - **稀疏标签**: `with_labels` 把任意元素标签映射到连续槽位，
///   所有公开方法都以标签作为输入和输出
///
/// # 示例
///
/// ```
/// use persistent_homology::homology::UnionFind;
///
/// let mut uf = UnionFind::new(4);
/// uf.union(0, 1);
/// uf.union(2, 3);
/// uf.union(1, 3);
/// assert_eq!(uf.find(3), 0);
/// assert_eq!(uf.get(2), vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// 父节点槽位（parent[i] = i 表示 i 是根）
    parent: Vec<usize>,

    /// 槽位的 birth（filtration 索引）
    birth: Vec<Index>,

    /// 被合并到该根下的旧根
    merged: Vec<Vec<usize>>,

    /// 槽位与元素标签的映射；None 时标签就是槽位
    labels: Option<Labels>,
}

#[derive(Debug, Clone)]
struct Labels {
    of_slot: Vec<usize>,
    slot_of: HashMap<usize, usize>,
}

impl UnionFind {
    /// 创建新的 UnionFind
    ///
    /// # Arguments
    ///
    /// * `n` - 元素数量
    ///
    /// # Returns
    ///
    /// 元素为 0..n，每个元素独立成一个集合，birth 等于元素编号
    pub fn new(n: usize) -> Self {
        Self::with_births((0..n).collect())
    }

    /// 使用给定 birth 创建 UnionFind，元素为 0..births.len()
    pub fn with_births(births: Vec<Index>) -> Self {
        let n = births.len();
        Self {
            parent: (0..n).collect(),
            birth: births,
            merged: vec![Vec::new(); n],
            labels: None,
        }
    }

    /// 使用任意元素标签创建 UnionFind
    ///
    /// 内存只与元素个数有关，与标签的取值范围无关。
    ///
    /// # Arguments
    ///
    /// * `labels` - 互不相同的元素标签
    /// * `births` - 对应元素的 birth
    ///
    /// # Panics
    ///
    /// 长度不一致或标签重复时 panic
    pub fn with_labels(labels: Vec<usize>, births: Vec<Index>) -> Self {
        assert_eq!(
            labels.len(),
            births.len(),
            "union-find needs one birth per label"
        );

        let slot_of: HashMap<usize, usize> = labels
            .iter()
            .enumerate()
            .map(|(slot, &label)| (label, slot))
            .collect();
        assert_eq!(slot_of.len(), labels.len(), "duplicate union-find label");

        let mut uf = Self::with_births(births);
        uf.labels = Some(Labels {
            of_slot: labels,
            slot_of,
        });
        uf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    #[inline]
    fn try_slot(&self, x: usize) -> Option<usize> {
        match &self.labels {
            None => (x < self.parent.len()).then_some(x),
            Some(labels) => labels.slot_of.get(&x).copied(),
        }
    }

    #[inline]
    fn slot(&self, x: usize) -> usize {
        match self.try_slot(x) {
            Some(slot) => slot,
            None => panic!(
                "vertex {} out of range for union-find over {} elements",
                x,
                self.parent.len()
            ),
        }
    }

    #[inline]
    fn label(&self, slot: usize) -> usize {
        match &self.labels {
            None => slot,
            Some(labels) => labels.of_slot[slot],
        }
    }

    fn find_slot(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // 路径压缩：将路径上的节点直接连接到根
        let mut node = slot;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// 合并两个槽位所在的集合，返回被合并掉的根槽位
    fn union_slots(&mut self, a: usize, b: usize) -> Option<usize> {
        let root_a = self.find_slot(a);
        let root_b = self.find_slot(b);

        if root_a == root_b {
            return None;
        }

        let key_a = (self.birth[root_a], self.label(root_a));
        let key_b = (self.birth[root_b], self.label(root_b));
        let (older, younger) = if key_a < key_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };

        self.parent[younger] = older;
        self.merged[older].push(younger);

        Some(younger)
    }

    /// 查找元素所属集合的根
    ///
    /// # Panics
    ///
    /// x 不是本结构的元素时 panic
    pub fn find(&mut self, x: usize) -> usize {
        let slot = self.slot(x);
        let root = self.find_slot(slot);
        self.label(root)
    }

    /// 合并两个集合
    ///
    /// # Returns
    ///
    /// 被合并掉的（较年轻的）根；两者已在同一集合时返回 None
    pub fn union(&mut self, x: usize, y: usize) -> Option<usize> {
        let (a, b) = (self.slot(x), self.slot(y));
        self.union_slots(a, b).map(|younger| self.label(younger))
    }

    /// 元素所在分量的 birth
    pub fn get_birth(&mut self, x: usize) -> Index {
        let slot = self.slot(x);
        let root = self.find_slot(slot);
        self.birth[root]
    }

    /// 设置元素的 birth
    ///
    /// 只应在元素参与任何合并之前调用
    pub fn set_birth(&mut self, x: usize, birth: Index) {
        let slot = self.slot(x);
        self.birth[slot] = birth;
    }

    #[inline]
    pub fn is_root(&self, x: usize) -> bool {
        let slot = self.slot(x);
        self.parent[slot] == slot
    }

    fn root_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.parent.len()).filter(move |&i| self.parent[i] == i)
    }

    /// 所有当前根（升序）
    pub fn get_roots(&self) -> Vec<usize> {
        let mut roots: Vec<usize> = self.root_slots().map(|slot| self.label(slot)).collect();
        roots.sort_unstable();
        roots
    }

    /// 分量数
    pub fn num_sets(&self) -> usize {
        self.root_slots().count()
    }

    /// 以 root 为根的分量的全部元素（升序）
    ///
    /// root 已被合并时，返回它被合并那一刻的成员。
    pub fn get(&self, root: usize) -> Vec<usize> {
        let mut members = Vec::new();
        let mut stack = vec![self.slot(root)];
        while let Some(node) = stack.pop() {
            members.push(self.label(node));
            stack.extend(self.merged[node].iter().copied());
        }

        members.sort_unstable();
        members
    }
}

// ============================================================================
// UnionFindReducer
// ============================================================================

/// 0 维持久同调的并查集算法
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionFindReducer;

impl UnionFindReducer {
    pub fn new() -> Self {
        Self
    }

    /// 计算单纯复形的 0 维配对
    ///
    /// 只处理顶点和边，更高维的 simplex 被跳过。顶点编号可以是稀疏的。
    ///
    /// # Arguments
    ///
    /// * `complex` - 按 filtration 排序的单纯复形
    ///
    /// # Returns
    ///
    /// (配对, 并查集)。配对按 creator 排序；并查集以顶点编号为元素，
    /// 根是各分量的创建顶点。
    ///
    /// # Errors
    ///
    /// 边的某个顶点没有出现在它之前时返回 `MissingFace`
    pub fn reduce(&self, complex: &SimplicialComplex) -> Result<(PersistencePairing, UnionFind)> {
        let (labels, births): (Vec<usize>, Vec<Index>) = complex
            .iter()
            .enumerate()
            .filter_map(|(index, simplex)| match simplex.vertices() {
                &[v] => Some((v as usize, index)),
                _ => None,
            })
            .unzip();
        let mut uf = UnionFind::with_labels(labels, births);
        let mut pairing = PersistencePairing::new();

        for (index, simplex) in complex.iter().enumerate() {
            if let &[u, v] = simplex.vertices() {
                let mut ends = [0usize; 2];
                for (end, w) in ends.iter_mut().zip([u, v]) {
                    match uf.try_slot(w as usize) {
                        Some(slot) if uf.birth[slot] < index => *end = slot,
                        _ => {
                            return Err(HomologyError::MissingFace {
                                simplex: index,
                                face: vec![w],
                            })
                        }
                    }
                }

                if let Some(younger) = uf.union_slots(ends[0], ends[1]) {
                    pairing.add(uf.birth[younger], index);
                }
            }
        }

        for root in uf.root_slots() {
            pairing.add_unpaired(uf.birth[root]);
        }

        pairing.sort();

        debug!(
            vertices = uf.len(),
            pairs = pairing.pairs().len(),
            components = pairing.unpaired().len(),
            "union-find reduction finished"
        );

        Ok((pairing, uf))
    }

    /// 计算边列表的 0 维配对
    ///
    /// 顶点 k 的 filtration 索引为 k，第 k 条边的索引为 `vertex_count + k`。
    ///
    /// # Panics
    ///
    /// 边引用了 >= vertex_count 的顶点时 panic
    pub fn reduce_edge_list(
        &self,
        vertex_count: usize,
        edges: &[(Vertex, Vertex)],
    ) -> (PersistencePairing, UnionFind) {
        let mut uf = UnionFind::new(vertex_count);
        let mut pairing = PersistencePairing::new();

        for (k, &(u, v)) in edges.iter().enumerate() {
            let (a, b) = (uf.slot(u as usize), uf.slot(v as usize));
            if let Some(younger) = uf.union_slots(a, b) {
                pairing.add(uf.birth[younger], vertex_count + k);
            }
        }

        for root in uf.root_slots() {
            pairing.add_unpaired(uf.birth[root]);
        }

        pairing.sort();
        (pairing, uf)
    }
}

// ============================================================================
// 单元测试
// ============================================================================
