/*!
 * 核心数据类型定义
 *
 * 这个模块定义了持久同调归约中使用的所有核心数据类型。
 *
 * # 核心类型
 *
 * - `Value`: 过滤值（simplex 权重）
 * - `Index`: filtration 索引（矩阵行/列索引）
 * - `Vertex`: 顶点标识符
 * - `Coefficient`: 系数域元素
 * - `Simplex`: 带权重的单纯形
 * - `PersistencePair` / `PersistencePairing`: 持久性配对
 */

use std::fmt;

// ============================================================================
// 基础类型别名
// ============================================================================

/// 过滤值类型（simplex 的权重）
pub type Value = f64;

/// filtration 索引类型
///
/// 同时用作边界矩阵的行索引和列索引，范围是 `0..N`。
pub type Index = usize;

/// 顶点标识符类型
pub type Vertex = u32;

/// 系数域元素类型
///
/// 用于 Z/pZ（p 为素数）。默认情况下 p=2（Z/2Z）。
pub type Coefficient = u16;

// ============================================================================
// Simplex
// ============================================================================

/// 带权重的单纯形
///
/// 顶点集合在构造时排序并去重，之后不可修改；只有权重可以被重新赋值。
///
/// # 示例
///
/// ```
/// use persistent_homology::homology::Simplex;
///
/// let edge = Simplex::new([2, 0], 1.5);
/// assert_eq!(edge.vertices(), &[0, 2]);
/// assert_eq!(edge.dimension(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Simplex {
    /// 顶点（升序排列）
    vertices: Vec<Vertex>,

    /// 过滤值
    weight: Value,
}

impl Simplex {
    /// 创建新的单纯形
    ///
    /// # Panics
    ///
    /// 顶点集合为空时 panic
    pub fn new(vertices: impl IntoIterator<Item = Vertex>, weight: Value) -> Self {
        let mut vertices: Vec<Vertex> = vertices.into_iter().collect();
        vertices.sort_unstable();
        vertices.dedup();
        assert!(!vertices.is_empty(), "a simplex needs at least one vertex");

        Self { vertices, weight }
    }

    /// 创建 0-simplex（顶点）
    #[inline]
    pub fn vertex(v: Vertex, weight: Value) -> Self {
        Self {
            vertices: vec![v],
            weight,
        }
    }

    /// 维度 = 顶点数 - 1
    #[inline]
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn weight(&self) -> Value {
        self.weight
    }

    /// 返回具有相同顶点集合、不同权重的副本
    pub fn with_weight(&self, weight: Value) -> Self {
        Self {
            vertices: self.vertices.clone(),
            weight,
        }
    }

    /// 枚举余维 1 的面及其定向符号
    ///
    /// 第 i 个面去掉第 i 个顶点，符号为 (-1)^i。0-simplex 没有面。
    pub fn faces(&self) -> impl Iterator<Item = (bool, Vec<Vertex>)> + '_ {
        let n = if self.vertices.len() > 1 {
            self.vertices.len()
        } else {
            0
        };

        (0..n).map(move |i| {
            let face: Vec<Vertex> = self
                .vertices
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != i)
                .map(|(_, &v)| v)
                .collect();
            (i % 2 == 0, face)
        })
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}} ({})", self.weight)
    }
}

// ============================================================================
// 持久性配对
// ============================================================================

/// 持久性对（creator, destroyer），均为 filtration 索引
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersistencePair {
    /// 创建拓扑特征的 simplex 索引
    pub creator: Index,

    /// 消灭该特征的 simplex 索引（总是大于 creator）
    pub destroyer: Index,
}

impl PersistencePair {
    #[inline]
    pub fn new(creator: Index, destroyer: Index) -> Self {
        Self { creator, destroyer }
    }
}

/// 一次归约得到的全部配对
///
/// 包含有限配对以及未配对的 creator（essential class）。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistencePairing {
    pairs: Vec<PersistencePair>,
    unpaired: Vec<Index>,
}

impl PersistencePairing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, creator: Index, destroyer: Index) {
        self.pairs.push(PersistencePair::new(creator, destroyer));
    }

    pub fn add_unpaired(&mut self, creator: Index) {
        self.unpaired.push(creator);
    }

    pub fn pairs(&self) -> &[PersistencePair] {
        &self.pairs
    }

    pub fn unpaired(&self) -> &[Index] {
        &self.unpaired
    }

    /// 有限配对与未配对 creator 的总数
    pub fn len(&self) -> usize {
        self.pairs.len() + self.unpaired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.unpaired.is_empty()
    }

    pub fn contains(&self, creator: Index, destroyer: Index) -> bool {
        self.pairs.contains(&PersistencePair::new(creator, destroyer))
    }

    /// 按 creator 索引排序，保证不同计算路径得到相同的输出顺序
    pub fn sort(&mut self) {
        self.pairs.sort_unstable();
        self.unpaired.sort_unstable();
    }

    /// 按 (creator, Option<destroyer>) 遍历全部配对
    pub fn iter(&self) -> impl Iterator<Item = (Index, Option<Index>)> + '_ {
        self.pairs
            .iter()
            .map(|p| (p.creator, Some(p.destroyer)))
            .chain(self.unpaired.iter().map(|&c| (c, None)))
    }
}

impl fmt::Display for PersistencePairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PersistencePairing {{")?;
        for pair in &self.pairs {
            writeln!(f, "  ({}, {})", pair.creator, pair.destroyer)?;
        }
        for creator in &self.unpaired {
            writeln!(f, "  ({}, ∞)", creator)?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// 单元测试
// ============================================================================
