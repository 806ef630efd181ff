/*!
 * 持久同调 FFI - Python 绑定
 *
 * # 接口设计
 *
 * Python 端调用：
 * ```python
 * result = persistence_diagrams(
 *     simplices,                           # [[0], [1], [0, 1], ...]，按 filtration 排序
 *     weights,                             # 每个 simplex 的权重
 *     dualize=True,                        # 在余边界矩阵上归约
 *     include_all_unpaired_creators=False, # 保留最高维度的未配对 creator
 *     max_dimension=None,                  # 输出的最大维度
 *     infinity=None,                       # 未配对 creator 的 death（None 表示 +inf）
 * )
 * # result = {
 * #     'diagrams': [dim0_points, dim1_points, ...],  # numpy (n, 2)
 * #     'dimensions': [0, 1, ...],
 * #     'creators': [dim0_creators, ...],              # creator 的 filtration 索引
 * # }
 * ```
 */

use numpy::IntoPyArray;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::config::{Coefficients, ReductionConfig, UnpairedValue};
use super::core::algorithm::{calculate_persistence_diagrams, calculate_zero_dimensional_persistence};
use super::core::complex::SimplicialComplex;
use super::error::HomologyError;
use super::types::{Simplex, Value, Vertex};

impl From<HomologyError> for PyErr {
    fn from(err: HomologyError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// 从 Python 传入的顶点列表和权重构建单纯复形
fn build_complex(simplices: Vec<Vec<Vertex>>, weights: Vec<Value>) -> PyResult<SimplicialComplex> {
    if simplices.len() != weights.len() {
        return Err(PyValueError::new_err(format!(
            "got {} simplices but {} weights",
            simplices.len(),
            weights.len()
        )));
    }

    let mut complex = SimplicialComplex::new();
    for (i, (vertices, weight)) in simplices.into_iter().zip(weights).enumerate() {
        if vertices.is_empty() {
            return Err(PyValueError::new_err(format!("simplex {} has no vertices", i)));
        }
        complex.push(Simplex::new(vertices, weight))?;
    }

    Ok(complex)
}

/// 计算持久性图
///
/// # Arguments
///
/// * `py` - Python 解释器 GIL
/// * `simplices` - 每个 simplex 的顶点列表（按 filtration 排序）
/// * `weights` - 每个 simplex 的权重
/// * `dualize` - 是否在余边界矩阵上归约
/// * `include_all_unpaired_creators` - 是否保留最高维度的未配对 creator
/// * `max_dimension` - 输出的最大维度
/// * `prime` - 系数域 Z/pZ 的 p（默认 2）
/// * `infinity` - 未配对 creator 的 death
/// * `remove_diagonal` - 是否删除 birth == death 的点
///
/// # Returns
///
/// Python 字典包含：
/// - 'diagrams': 各维度的 (n, 2) 数组
/// - 'dimensions': 对应的维度
/// - 'creators': 各点的 creator 索引
#[pyfunction]
#[pyo3(signature = (
    simplices,
    weights,
    dualize=true,
    include_all_unpaired_creators=false,
    max_dimension=None,
    prime=2,
    infinity=None,
    remove_diagonal=false
))]
#[allow(clippy::too_many_arguments)]
pub fn persistence_diagrams_py(
    py: Python,
    simplices: Vec<Vec<Vertex>>,
    weights: Vec<Value>,
    dualize: bool,
    include_all_unpaired_creators: bool,
    max_dimension: Option<usize>,
    prime: u16,
    infinity: Option<Value>,
    remove_diagonal: bool,
) -> PyResult<Py<PyAny>> {
    let complex = build_complex(simplices, weights)?;

    let coefficients = if prime == 2 {
        Coefficients::Binary
    } else {
        Coefficients::Prime(prime)
    };

    let config = ReductionConfig::new()
        .with_dualize(dualize)
        .with_include_all_unpaired_creators(include_all_unpaired_creators)
        .with_coefficients(coefficients)
        .with_dimension_bounds(0, max_dimension)
        .with_unpaired_value(infinity.map_or(UnpairedValue::Infinity, UnpairedValue::Finite));

    // 归约期间释放 GIL
    let mut diagrams = py.allow_threads(|| calculate_persistence_diagrams(&complex, &config))?;

    let dict = PyDict::new(py);
    let diagram_list = PyList::empty(py);
    let dimension_list = PyList::empty(py);
    let creator_list = PyList::empty(py);

    for diagram in diagrams.iter_mut() {
        if remove_diagonal {
            diagram.remove_diagonal();
        }

        diagram_list.append(diagram.to_array().into_pyarray(py))?;
        dimension_list.append(diagram.dimension())?;

        let creators: Vec<Option<usize>> = diagram.iter().map(|p| p.creator).collect();
        creator_list.append(creators)?;
    }

    dict.set_item("diagrams", diagram_list)?;
    dict.set_item("dimensions", dimension_list)?;
    dict.set_item("creators", creator_list)?;

    Ok(dict.into())
}

/// 用并查集计算 0 维持久同调
///
/// # Returns
///
/// Python 字典包含：
/// - 'diagram': (n, 2) 数组
/// - 'pairs': [(creator, destroyer), ...]
/// - 'components': 每个有限点对应分量的顶点列表（与 'pairs' 顺序一致）
#[pyfunction]
#[pyo3(signature = (simplices, weights, infinity=None))]
pub fn zero_dimensional_persistence_py(
    py: Python,
    simplices: Vec<Vec<Vertex>>,
    weights: Vec<Value>,
    infinity: Option<Value>,
) -> PyResult<Py<PyAny>> {
    let complex = build_complex(simplices, weights)?;
    let config = ReductionConfig::new()
        .with_unpaired_value(infinity.map_or(UnpairedValue::Infinity, UnpairedValue::Finite));

    let result = calculate_zero_dimensional_persistence(&complex, &config)?;

    let pairs: Vec<(usize, usize)> = result
        .pairing
        .pairs()
        .iter()
        .map(|p| (p.creator, p.destroyer))
        .collect();

    // 被消灭分量的根就是创建它的顶点
    let components: Vec<Vec<usize>> = result
        .pairing
        .pairs()
        .iter()
        .map(|p| {
            let root = complex[p.creator].vertices()[0] as usize;
            result.union_find.get(root)
        })
        .collect();

    let dict = PyDict::new(py);
    dict.set_item("diagram", result.diagram.to_array().into_pyarray(py))?;
    dict.set_item("pairs", pairs)?;
    dict.set_item("components", components)?;

    Ok(dict.into())
}

/// 注册持久同调函数到 Python 模块
pub fn register_homology_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(persistence_diagrams_py, m)?)?;
    m.add_function(wrap_pyfunction!(zero_dimensional_persistence_py, m)?)?;
    Ok(())
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_complex_validates_lengths() {
        assert!(build_complex(vec![vec![0]], vec![]).is_err());

        let complex = build_complex(vec![vec![0], vec![1], vec![1, 0]], vec![0.0, 0.0, 1.0]).unwrap();
        assert_eq!(complex.len(), 3);
        assert_eq!(complex.index_of(&[0, 1]), Some(2));
    }
}
