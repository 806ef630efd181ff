/*!
 * 持久性图
 *
 * 把索引配对转换为按维度分组的 (birth, death) 点集：
 *
 * - 配对 (c, d) → (weight(c), weight(d))，维度为 creator 的维度
 * - 未配对 creator c → (weight(c), sentinel)，sentinel 默认为 +∞
 *
 * 每个点保留其 creator 的 filtration 索引，便于回溯到具体的 simplex。
 */

use std::collections::BTreeMap;
use std::fmt;

use ndarray::Array2;

use super::super::config::UnpairedValue;
use super::super::types::{Index, PersistencePairing, Value};
use super::complex::SimplicialComplex;

// ============================================================================
// Point
// ============================================================================

/// 持久性图中的一个点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub birth: Value,
    pub death: Value,

    /// creator 的 filtration 索引
    pub creator: Option<Index>,

    /// 是否来自未配对的 creator
    unpaired: bool,
}

impl Point {
    pub fn new(birth: Value, death: Value) -> Self {
        Self {
            birth,
            death,
            creator: None,
            unpaired: false,
        }
    }

    /// essential class 对应的点
    pub fn unpaired(birth: Value, death: Value) -> Self {
        Self {
            birth,
            death,
            creator: None,
            unpaired: true,
        }
    }

    pub fn with_creator(mut self, creator: Index) -> Self {
        self.creator = Some(creator);
        self
    }

    /// death - birth
    #[inline]
    pub fn persistence(&self) -> Value {
        self.death - self.birth
    }

    #[inline]
    pub fn is_unpaired(&self) -> bool {
        self.unpaired
    }

    /// birth == death 且不是 essential class
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        !self.unpaired && self.birth == self.death
    }
}

// ============================================================================
// PersistenceDiagram
// ============================================================================

/// 单个维度的持久性图
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceDiagram {
    dimension: usize,
    points: Vec<Point>,
}

impl PersistenceDiagram {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            points: Vec::new(),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// 删除 birth == death 的点（不删除 essential class），幂等
    pub fn remove_diagonal(&mut self) {
        self.points.retain(|p| !p.is_diagonal());
    }

    /// 把所有未配对点的 death 替换为 value
    pub fn map_unpaired(&mut self, value: Value) {
        self.points
            .iter_mut()
            .filter(|p| p.unpaired)
            .for_each(|p| p.death = value);
    }

    /// Betti 数：未配对点的个数
    pub fn betti(&self) -> usize {
        self.points.iter().filter(|p| p.unpaired).count()
    }

    /// 按 (birth, death) 排序
    pub fn sort(&mut self) {
        self.points.sort_by(|a, b| {
            a.birth
                .total_cmp(&b.birth)
                .then_with(|| a.death.total_cmp(&b.death))
        });
    }

    /// 转换为 (n, 2) 数组，每行为 [birth, death]
    pub fn to_array(&self) -> Array2<f64> {
        let mut array = Array2::<f64>::zeros((self.points.len(), 2));
        for (i, p) in self.points.iter().enumerate() {
            array[[i, 0]] = p.birth;
            array[[i, 1]] = p.death;
        }
        array
    }
}

impl<'a> IntoIterator for &'a PersistenceDiagram {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for PersistenceDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}\t{}", p.birth, p.death)?;
        }
        Ok(())
    }
}

// ============================================================================
// PersistenceDiagramBuilder
// ============================================================================

/// 从配对构建持久性图
#[derive(Debug, Clone)]
pub struct PersistenceDiagramBuilder<'a> {
    complex: &'a SimplicialComplex,
    unpaired_value: UnpairedValue,
}

impl<'a> PersistenceDiagramBuilder<'a> {
    pub fn new(complex: &'a SimplicialComplex) -> Self {
        Self {
            complex,
            unpaired_value: UnpairedValue::Infinity,
        }
    }

    pub fn with_unpaired_value(mut self, value: UnpairedValue) -> Self {
        self.unpaired_value = value;
        self
    }

    /// 未配对 creator 的 death 值
    pub fn sentinel(&self) -> Value {
        match self.unpaired_value {
            UnpairedValue::Infinity => Value::INFINITY,
            UnpairedValue::Finite(v) => v,
            UnpairedValue::MaxWeightMultiple(factor) => {
                factor * self.complex.max_weight().unwrap_or(0.0)
            }
        }
    }

    /// 按 creator 维度分组构建持久性图
    ///
    /// # Returns
    ///
    /// 每个出现过的维度一个图，按维度升序排列
    ///
    /// # Panics
    ///
    /// 配对中的索引超出复形范围时 panic
    pub fn build(&self, pairing: &PersistencePairing) -> Vec<PersistenceDiagram> {
        let sentinel = self.sentinel();
        let mut diagrams: BTreeMap<usize, PersistenceDiagram> = BTreeMap::new();

        for (creator, destroyer) in pairing.iter() {
            let sigma = &self.complex[creator];
            let dim = sigma.dimension();

            let point = match destroyer {
                Some(d) => Point::new(sigma.weight(), self.complex[d].weight()),
                None => Point::unpaired(sigma.weight(), sentinel),
            };

            diagrams
                .entry(dim)
                .or_insert_with(|| PersistenceDiagram::new(dim))
                .push(point.with_creator(creator));
        }

        diagrams.into_values().collect()
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

    fn triangle_pairing() -> PersistencePairing {
        let mut pairing = PersistencePairing::new();
        pairing.add(1, 3);
        pairing.add(2, 4);
        pairing.add_unpaired(0);
        pairing.add_unpaired(5);
        pairing
    }

    #[test]
    fn test_build_groups_by_dimension() {
        let k = triangle_boundary();
        let diagrams = PersistenceDiagramBuilder::new(&k).build(&triangle_pairing());

        assert_eq!(diagrams.len(), 2);

        let d0 = &diagrams[0];
        assert_eq!(d0.dimension(), 0);
        assert_eq!(d0.len(), 3);
        assert_eq!(d0.betti(), 1);
        assert_eq!(d0.points()[0], Point::new(0.0, 1.0).with_creator(1));

        let essential = d0.iter().find(|p| p.is_unpaired()).unwrap();
        assert_eq!(essential.birth, 0.0);
        assert!(essential.death.is_infinite());
        assert_eq!(essential.creator, Some(0));

        let d1 = &diagrams[1];
        assert_eq!(d1.dimension(), 1);
        assert_eq!(d1.len(), 1);
        assert_eq!(d1.points()[0].birth, 2.0);
    }

    #[test]
    fn test_sentinel_values() {
        let k = triangle_boundary();

        let builder =
            PersistenceDiagramBuilder::new(&k).with_unpaired_value(UnpairedValue::Finite(9.0));
        assert_eq!(builder.sentinel(), 9.0);

        let builder = PersistenceDiagramBuilder::new(&k)
            .with_unpaired_value(UnpairedValue::MaxWeightMultiple(2.0));
        assert_eq!(builder.sentinel(), 4.0);

        let diagrams = builder.build(&triangle_pairing());
        assert_eq!(diagrams[1].points()[0].death, 4.0);
    }

    #[test]
    fn test_remove_diagonal_idempotent() {
        let mut diagram = PersistenceDiagram::new(0);
        diagram.push(Point::new(1.0, 1.0));
        diagram.push(Point::new(1.0, 2.0));
        diagram.push(Point::unpaired(3.0, 3.0));

        diagram.remove_diagonal();
        assert_eq!(diagram.len(), 2);
        assert!(diagram.iter().all(|p| p.birth != p.death || p.is_unpaired()));

        let once = diagram.clone();
        diagram.remove_diagonal();
        assert_eq!(diagram, once);
    }

    #[test]
    fn test_map_unpaired_and_array() {
        let k = triangle_boundary();
        let mut diagrams = PersistenceDiagramBuilder::new(&k).build(&triangle_pairing());
        let d0 = &mut diagrams[0];

        d0.map_unpaired(2.0 * 2.0);
        d0.sort();

        let array = d0.to_array();
        assert_eq!(array.shape(), &[3, 2]);
        assert_eq!(array[[0, 0]], 0.0);
        assert_eq!(array[[0, 1]], 1.0);
        assert_eq!(array[[2, 1]], 4.0);
        assert_eq!(d0.points()[2].persistence(), 4.0);
    }

    #[test]
    fn test_display() {
        let mut diagram = PersistenceDiagram::new(0);
        diagram.push(Point::new(0.0, 1.0));
        diagram.push(Point::unpaired(0.5, Value::INFINITY));

        assert_eq!(diagram.to_string(), "0\t1\n0.5\tinf");
    }
}
