/*!
 * 持久同调 - 端到端实现
 *
 * 这个模块把核心组件串成完整的计算流程：
 *
 * 1. 检查配置和 filtration 权重单调性
 * 2. 从单纯复形构建边界矩阵（可选：反转置为余边界矩阵）
 * 3. 标准列归约，得到原始 filtration 索引上的配对
 * 4. 按维度构建持久性图
 *
 * 0 维的快速路径使用并查集，同时返回配对和分量成员信息。
 * 多个相互独立的复形可以用 rayon 并行计算。
 *
 * # 使用示例
 *
 * ```
 * use persistent_homology::homology::{
 *     calculate_persistence_diagrams, ReductionConfig, Simplex, SimplicialComplex,
 * };
 *
 * let complex = SimplicialComplex::from_simplices(vec![
 *     Simplex::vertex(0, 0.0),
 *     Simplex::vertex(1, 0.0),
 *     Simplex::new([0, 1], 1.0),
 * ])
 * .unwrap();
 *
 * let diagrams = calculate_persistence_diagrams(&complex, &ReductionConfig::default()).unwrap();
 * assert_eq!(diagrams[0].len(), 2);
 * ```
 */

use rayon::prelude::*;
use tracing::debug;

use super::super::config::ReductionConfig;
use super::super::error::Result;
use super::super::types::PersistencePairing;
use super::boundary::BoundaryMatrix;
use super::complex::SimplicialComplex;
use super::diagram::{PersistenceDiagram, PersistenceDiagramBuilder};
use super::reduction::{ReductionStats, StandardReducer};
use super::union_find::{UnionFind, UnionFindReducer};

// ============================================================================
// 0 维结果
// ============================================================================

/// 0 维持久同调的完整结果
#[derive(Debug, Clone)]
pub struct ZeroDimensionalPersistence {
    /// 0 维持久性图
    pub diagram: PersistenceDiagram,

    /// 索引配对
    pub pairing: PersistencePairing,

    /// 并查集，可通过 `get(root)` 查询每个分量的顶点
    pub union_find: UnionFind,
}

// ============================================================================
// 配对
// ============================================================================

/// 计算持久性配对及归约统计
///
/// # Arguments
///
/// * `complex` - 按 filtration 排序的单纯复形
/// * `config` - 归约配置
///
/// # Errors
///
/// - 配置无效：`InvalidDimensionBounds` / `UnsupportedCoefficients`
/// - filtration 无效：`WeightOrder` / `MissingFace` / `Triangularity`
pub fn calculate_persistence_pairing_with_stats(
    complex: &SimplicialComplex,
    config: &ReductionConfig,
) -> Result<(PersistencePairing, ReductionStats)> {
    config.validate()?;
    complex.check_monotonic()?;

    let mut matrix =
        BoundaryMatrix::from_complex(complex, config.representation, config.coefficients)?;
    if config.dualize {
        matrix = matrix.dualize();
    }

    let reducer = StandardReducer::from_config(config);
    Ok(reducer.reduce_with_stats(&mut matrix))
}

/// 计算持久性配对
///
/// # Errors
///
/// 同 [`calculate_persistence_pairing_with_stats`]
pub fn calculate_persistence_pairing(
    complex: &SimplicialComplex,
    config: &ReductionConfig,
) -> Result<PersistencePairing> {
    calculate_persistence_pairing_with_stats(complex, config).map(|(pairing, _)| pairing)
}

// ============================================================================
// 持久性图
// ============================================================================

/// 计算持久性图
///
/// # Arguments
///
/// * `complex` - 按 filtration 排序的单纯复形
/// * `config` - 归约配置
///
/// # Returns
///
/// 每个出现过的维度一个持久性图，按维度升序排列。
/// 对角线上的点不会被删除，调用方可自行调用 `remove_diagonal`。
///
/// # Errors
///
/// 同 [`calculate_persistence_pairing_with_stats`]
pub fn calculate_persistence_diagrams(
    complex: &SimplicialComplex,
    config: &ReductionConfig,
) -> Result<Vec<PersistenceDiagram>> {
    let (pairing, stats) = calculate_persistence_pairing_with_stats(complex, config)?;

    let diagrams = PersistenceDiagramBuilder::new(complex)
        .with_unpaired_value(config.unpaired_value)
        .build(&pairing);

    debug!(
        simplices = complex.len(),
        dualize = config.dualize,
        column_additions = stats.column_additions,
        diagrams = diagrams.len(),
        "persistence diagrams computed"
    );

    Ok(diagrams)
}

/// 并行计算多个独立复形的持久性图
///
/// 每个复形单独归约，互不共享可变状态。结果顺序与输入一致。
pub fn calculate_persistence_diagrams_batch(
    complexes: &[SimplicialComplex],
    config: &ReductionConfig,
) -> Vec<Result<Vec<PersistenceDiagram>>> {
    debug!(complexes = complexes.len(), "batch persistence computation");

    complexes
        .par_iter()
        .map(|complex| calculate_persistence_diagrams(complex, config))
        .collect()
}

// ============================================================================
// 0 维快速路径
// ============================================================================

/// 用并查集计算 0 维持久同调
///
/// 只使用 `config` 中的 `unpaired_value`；复形中高于 1 维的 simplex 被忽略。
///
/// # Errors
///
/// - `WeightOrder`: 权重不单调
/// - `MissingFace`: 边的顶点没有出现在它之前
pub fn calculate_zero_dimensional_persistence(
    complex: &SimplicialComplex,
    config: &ReductionConfig,
) -> Result<ZeroDimensionalPersistence> {
    complex.check_monotonic()?;

    let (pairing, union_find) = UnionFindReducer::new().reduce(complex)?;

    let diagram = PersistenceDiagramBuilder::new(complex)
        .with_unpaired_value(config.unpaired_value)
        .build(&pairing)
        .into_iter()
        .next()
        .unwrap_or_else(|| PersistenceDiagram::new(0));

    Ok(ZeroDimensionalPersistence {
        diagram,
        pairing,
        union_find,
    })
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::super::config::{Coefficients, RepresentationKind, UnpairedValue};
    use super::super::super::error::HomologyError;
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

    fn all_configs() -> Vec<ReductionConfig> {
        let mut configs = Vec::new();
        for dualize in [false, true] {
            for representation in [
                RepresentationKind::Bitset,
                RepresentationKind::SparseList,
                RepresentationKind::SparseMap,
            ] {
                configs.push(
                    ReductionConfig::new()
                        .with_dualize(dualize)
                        .with_representation(representation),
                );
            }
        }
        configs
    }

    #[test]
    fn test_triangle_diagrams_all_configurations() {
        let k = triangle_boundary();

        for config in all_configs() {
            let diagrams = calculate_persistence_diagrams(&k, &config).unwrap();

            assert_eq!(diagrams.len(), 1, "{:?}", config);
            let d0 = &diagrams[0];
            assert_eq!(d0.dimension(), 0);
            assert_eq!(d0.len(), 3);
            assert_eq!(d0.betti(), 1);
            assert_eq!(
                d0.iter().filter(|p| p.birth == 0.0 && p.death == 1.0).count(),
                2
            );
        }
    }

    #[test]
    fn test_include_all_unpaired_creators() {
        let k = triangle_boundary();
        let config = ReductionConfig::new()
            .with_dualize(true)
            .with_include_all_unpaired_creators(true)
            .with_unpaired_value(UnpairedValue::MaxWeightMultiple(2.0));

        let diagrams = calculate_persistence_diagrams(&k, &config).unwrap();
        assert_eq!(diagrams.len(), 2);

        let loop_point = diagrams[1].points()[0];
        assert_eq!(loop_point.birth, 2.0);
        assert_eq!(loop_point.death, 4.0);
        assert_eq!(loop_point.creator, Some(5));
    }

    #[test]
    fn test_single_vertex() {
        let k = SimplicialComplex::from_simplices(vec![Simplex::vertex(0, 0.0)]).unwrap();

        for config in all_configs() {
            let diagrams = calculate_persistence_diagrams(&k, &config).unwrap();
            assert_eq!(diagrams.len(), 1);
            assert_eq!(diagrams[0].len(), 1);
            assert!(diagrams[0].points()[0].death.is_infinite());
        }
    }

    #[test]
    fn test_errors_are_reported() {
        let k = triangle_boundary();
        let config = ReductionConfig::new().with_dimension_bounds(1, Some(0));
        let err = calculate_persistence_diagrams(&k, &config).unwrap_err();
        assert!(err.is_configuration_error());

        let config = ReductionConfig::new().with_coefficients(Coefficients::Prime(9));
        assert!(calculate_persistence_pairing(&k, &config).is_err());

        let unsorted = SimplicialComplex::from_simplices(vec![
            Simplex::vertex(0, 1.0),
            Simplex::vertex(1, 0.0),
        ])
        .unwrap();
        let err = calculate_persistence_diagrams(&unsorted, &ReductionConfig::default())
            .unwrap_err();
        assert!(matches!(err, HomologyError::WeightOrder { index: 1, .. }));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_zero_dimensional_persistence() {
        let k = triangle_boundary();
        let result =
            calculate_zero_dimensional_persistence(&k, &ReductionConfig::default()).unwrap();

        assert_eq!(result.diagram.len(), 3);
        assert_eq!(result.diagram.betti(), 1);

        // 边 4 消灭了顶点 2 创建的分量
        assert!(result.pairing.contains(2, 4));
        assert_eq!(result.union_find.get(2), vec![2]);
        assert_eq!(result.union_find.get(0), vec![0, 1, 2]);

        let standard = calculate_persistence_pairing(&k, &ReductionConfig::default()).unwrap();
        assert_eq!(standard, result.pairing);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let mut filled = triangle_boundary();
        filled.push(Simplex::new([0, 1, 2], 3.0)).unwrap();
        let complexes = vec![triangle_boundary(), filled];

        let config = ReductionConfig::new().with_dualize(true);
        let batch = calculate_persistence_diagrams_batch(&complexes, &config);

        assert_eq!(batch.len(), 2);
        for (complex, result) in complexes.iter().zip(batch) {
            let expected = calculate_persistence_diagrams(complex, &config).unwrap();
            assert_eq!(result.unwrap(), expected);
        }
    }
}
