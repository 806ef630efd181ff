//! 归约配置
//!
//! 对应 Python 接口的可选参数，所有字段都有默认值。

use super::error::{HomologyError, Result};
use super::types::Value;

/// 系数域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coefficients {
    /// Z/2Z
    #[default]
    Binary,
    /// Z/pZ，p 必须为素数
    Prime(u16),
}

impl Coefficients {
    /// 域的特征
    pub fn characteristic(&self) -> u16 {
        match self {
            Coefficients::Binary => 2,
            Coefficients::Prime(p) => *p,
        }
    }

    pub fn is_binary(&self) -> bool {
        self.characteristic() == 2
    }

    pub fn validate(&self) -> Result<()> {
        let p = self.characteristic();
        if !is_prime(p) {
            return Err(HomologyError::UnsupportedCoefficients(format!(
                "Z/{}Z is not a field",
                p
            )));
        }
        Ok(())
    }
}

/// 列存储的实现方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepresentationKind {
    /// 稠密位集（仅支持 Z/2Z）
    Bitset,
    /// 有序向量（默认）
    #[default]
    SparseList,
    /// 有序映射
    SparseMap,
}

/// 未配对 creator 的 death 值
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UnpairedValue {
    /// +∞
    #[default]
    Infinity,
    /// 固定的有限值
    Finite(Value),
    /// 最大权重的倍数（例如 2 × maxWeight）
    MaxWeightMultiple(Value),
}

/// 持久同调计算配置
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionConfig {
    /// 在余边界矩阵上归约
    pub dualize: bool,

    /// 保留最高维度的未配对 creator
    pub include_all_unpaired_creators: bool,

    /// 系数域
    pub coefficients: Coefficients,

    /// 列存储实现
    pub representation: RepresentationKind,

    /// 输出的最小同调维度
    pub min_dimension: usize,

    /// 输出的最大同调维度（None 表示复形的最高维度）
    pub max_dimension: Option<usize>,

    /// 未配对 creator 的 death 值
    pub unpaired_value: UnpairedValue,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            dualize: false,
            include_all_unpaired_creators: false,
            coefficients: Coefficients::Binary,
            representation: RepresentationKind::SparseList,
            min_dimension: 0,
            max_dimension: None,
            unpaired_value: UnpairedValue::Infinity,
        }
    }
}

impl ReductionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dualize(mut self, dualize: bool) -> Self {
        self.dualize = dualize;
        self
    }

    pub fn with_include_all_unpaired_creators(mut self, include: bool) -> Self {
        self.include_all_unpaired_creators = include;
        self
    }

    pub fn with_coefficients(mut self, coefficients: Coefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn with_representation(mut self, representation: RepresentationKind) -> Self {
        self.representation = representation;
        self
    }

    pub fn with_dimension_bounds(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_dimension = min;
        self.max_dimension = max;
        self
    }

    pub fn with_unpaired_value(mut self, value: UnpairedValue) -> Self {
        self.unpaired_value = value;
        self
    }

    /// 检查配置是否有效
    ///
    /// # Errors
    ///
    /// - `InvalidDimensionBounds`: min > max
    /// - `UnsupportedCoefficients`: 非素数模数，或位集存储搭配非 Z/2Z 系数
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_dimension {
            if self.min_dimension > max {
                return Err(HomologyError::InvalidDimensionBounds {
                    min: self.min_dimension,
                    max,
                });
            }
        }

        self.coefficients.validate()?;

        if self.representation == RepresentationKind::Bitset && !self.coefficients.is_binary() {
            return Err(HomologyError::UnsupportedCoefficients(format!(
                "bitset columns only support Z/2Z, got Z/{}Z",
                self.coefficients.characteristic()
            )));
        }

        Ok(())
    }
}

fn is_prime(p: u16) -> bool {
    if p < 2 {
        return false;
    }
    let p = p as u32;
    let mut d = 2;
    while d * d <= p {
        if p % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReductionConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.dualize);
        assert_eq!(config.coefficients, Coefficients::Binary);
    }

    #[test]
    fn test_invalid_dimension_bounds() {
        let config = ReductionConfig::new().with_dimension_bounds(2, Some(1));
        assert_eq!(
            config.validate(),
            Err(HomologyError::InvalidDimensionBounds { min: 2, max: 1 })
        );

        let config = ReductionConfig::new().with_dimension_bounds(1, Some(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_coefficient_validation() {
        assert!(Coefficients::Prime(3).validate().is_ok());
        assert!(Coefficients::Prime(65521).validate().is_ok());
        assert!(Coefficients::Prime(4).validate().is_err());
        assert!(Coefficients::Prime(1).validate().is_err());
        assert!(Coefficients::Prime(2).is_binary());
    }

    #[test]
    fn test_bitset_requires_binary_field() {
        let config = ReductionConfig::new()
            .with_representation(RepresentationKind::Bitset)
            .with_coefficients(Coefficients::Prime(3));

        let err = config.validate().unwrap_err();
        assert!(err.is_configuration_error());

        let config = config.with_coefficients(Coefficients::Prime(2));
        assert!(config.validate().is_ok());
    }
}
