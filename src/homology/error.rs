//! 错误类型
//!
//! 两类错误：
//! - 不变量违反（致命）：filtration 或边界矩阵本身有问题，归约结果不可信
//! - 配置错误（可恢复）：调用方传入了无效参数

use super::types::{Index, Value, Vertex};

/// 持久同调计算错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HomologyError {
    #[error("Triangularity violated: column {column} references row {row}")]
    Triangularity { column: Index, row: Index },

    #[error("Face {face} of simplex {simplex} does not precede it in the filtration")]
    FaceOrder { face: Index, simplex: Index },

    #[error("Simplex {simplex} has face {face:?} which is not part of the complex")]
    MissingFace { simplex: Index, face: Vec<Vertex> },

    #[error("Filtration weights are not monotonic at index {index}: {previous} > {current}")]
    WeightOrder {
        index: Index,
        previous: Value,
        current: Value,
    },

    #[error("Index {index} out of range for {len} entries")]
    IndexOutOfRange { index: Index, len: usize },

    #[error("Simplex {index} is already part of the complex")]
    DuplicateSimplex { index: Index },

    #[error("Replacement for simplex {index} has a different vertex set")]
    VertexSetMismatch { index: Index },

    #[error("Invalid dimension bounds: min = {min} > max = {max}")]
    InvalidDimensionBounds { min: usize, max: usize },

    #[error("Unsupported coefficient domain: {0}")]
    UnsupportedCoefficients(String),
}

impl HomologyError {
    /// 是否为不变量违反（输入的 filtration 或矩阵本身无效）
    pub fn is_invariant_violation(&self) -> bool {
        !self.is_configuration_error()
    }

    /// 是否为配置错误
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            HomologyError::InvalidDimensionBounds { .. } | HomologyError::UnsupportedCoefficients(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HomologyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let triangularity = HomologyError::Triangularity { column: 3, row: 5 };
        assert!(triangularity.is_invariant_violation());
        assert!(!triangularity.is_configuration_error());

        let bounds = HomologyError::InvalidDimensionBounds { min: 2, max: 1 };
        assert!(bounds.is_configuration_error());
        assert!(!bounds.is_invariant_violation());
    }

    #[test]
    fn test_error_messages_name_indices() {
        let err = HomologyError::Triangularity { column: 3, row: 5 };
        assert_eq!(
            err.to_string(),
            "Triangularity violated: column 3 references row 5"
        );

        let err = HomologyError::MissingFace {
            simplex: 7,
            face: vec![0, 2],
        };
        assert!(err.to_string().contains("[0, 2]"));
    }
}
