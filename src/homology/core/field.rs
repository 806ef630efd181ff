/*!
 * 系数域
 *
 * 边界矩阵的列加法只依赖系数域的少量运算：零元、加法、取负、乘法和求逆。
 * 这里把这些运算抽象成 `Field` trait，列存储对具体的域是泛型的。
 *
 * - `Z2`: 二元域，列加法退化为对称差
 * - `PrimeField`: Z/pZ，用于检测挠系数
 */

use std::fmt;

use super::super::config::Coefficients;
use super::super::error::Result;
use super::super::types::Coefficient;

/// 系数域运算
pub trait Field: Clone + Send + Sync + fmt::Debug + 'static {
    /// 域的特征
    fn characteristic(&self) -> u16;

    fn add(&self, a: Coefficient, b: Coefficient) -> Coefficient;

    fn neg(&self, a: Coefficient) -> Coefficient;

    fn mul(&self, a: Coefficient, b: Coefficient) -> Coefficient;

    /// 乘法逆元
    ///
    /// # Panics
    ///
    /// a 为零时 panic
    fn inv(&self, a: Coefficient) -> Coefficient;

    #[inline]
    fn zero(&self) -> Coefficient {
        0
    }

    #[inline]
    fn one(&self) -> Coefficient {
        1
    }

    #[inline]
    fn is_zero(&self, a: Coefficient) -> bool {
        a == 0
    }

    /// 定向符号对应的系数（+1 或 -1）
    #[inline]
    fn from_sign(&self, positive: bool) -> Coefficient {
        if positive {
            self.one()
        } else {
            self.neg(self.one())
        }
    }
}

// ============================================================================
// Z/2Z
// ============================================================================

/// 二元域 Z/2Z
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Z2;

impl Field for Z2 {
    #[inline]
    fn characteristic(&self) -> u16 {
        2
    }

    #[inline]
    fn add(&self, a: Coefficient, b: Coefficient) -> Coefficient {
        (a ^ b) & 1
    }

    #[inline]
    fn neg(&self, a: Coefficient) -> Coefficient {
        a & 1
    }

    #[inline]
    fn mul(&self, a: Coefficient, b: Coefficient) -> Coefficient {
        a & b & 1
    }

    #[inline]
    fn inv(&self, a: Coefficient) -> Coefficient {
        assert!(a & 1 == 1, "zero has no inverse in Z/2Z");
        1
    }
}

// ============================================================================
// Z/pZ
// ============================================================================

/// 素数域 Z/pZ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeField {
    modulus: u16,
}

impl PrimeField {
    /// 创建 Z/pZ
    ///
    /// # Errors
    ///
    /// p 不是素数时返回 `UnsupportedCoefficients`
    pub fn new(p: u16) -> Result<Self> {
        Coefficients::Prime(p).validate()?;
        Ok(Self { modulus: p })
    }

    #[inline]
    pub fn modulus(&self) -> u16 {
        self.modulus
    }
}

impl Field for PrimeField {
    #[inline]
    fn characteristic(&self) -> u16 {
        self.modulus
    }

    #[inline]
    fn add(&self, a: Coefficient, b: Coefficient) -> Coefficient {
        ((a as u32 + b as u32) % self.modulus as u32) as Coefficient
    }

    #[inline]
    fn neg(&self, a: Coefficient) -> Coefficient {
        let a = a % self.modulus;
        if a == 0 {
            0
        } else {
            self.modulus - a
        }
    }

    #[inline]
    fn mul(&self, a: Coefficient, b: Coefficient) -> Coefficient {
        ((a as u32 * b as u32) % self.modulus as u32) as Coefficient
    }

    fn inv(&self, a: Coefficient) -> Coefficient {
        let a = a % self.modulus;
        assert!(a != 0, "zero has no inverse in Z/{}Z", self.modulus);

        // 费马小定理：a^(p-2) = a^(-1)
        let p = self.modulus as u64;
        let mut base = a as u64;
        let mut exp = p - 2;
        let mut result = 1u64;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base % p;
            }
            base = base * base % p;
            exp >>= 1;
        }
        result as Coefficient
    }
}

// ============================================================================
// 单元测试
// ============================================================================
