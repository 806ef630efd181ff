/*!
 * 持久同调 - 边界矩阵归约引擎
 *
 * 给定按 filtration 排序的单纯复形，计算每个拓扑特征（连通分量、环、空腔……）
 * 出现和消失的 filtration 索引，并把结果组织为按维度分组的持久性图。
 *
 * # 算法概述
 *
 * 1. 把单纯复形编码为严格上三角的边界矩阵（可选：反转置为余边界矩阵）
 * 2. 标准列归约：每个非零列的 pivot 唯一时，(pivot, column) 就是一个持久性对
 * 3. 0 维同调有基于并查集的近线性快速路径
 * 4. 配对转换为 (birth, death) 点，未配对的 creator 得到 +∞ 或自定义的 death
 *
 * # 模块结构
 *
 * - `types`: 核心数据类型定义
 * - `error`: 错误类型
 * - `config`: 归约配置
 * - `core`: 核心算法实现
 * - `ffi`: Python 绑定（`python` feature）
 *
 * # 参考文献
 *
 * - [Aleph](https://github.com/Pseudomanifold/Aleph): 持久同调算法库
 * - Edelsbrunner & Harer, *Computational Topology: An Introduction*
 */

// 子模块声明
pub mod types;
pub mod error;
pub mod config;
pub mod core;

#[cfg(feature = "python")]
pub mod ffi;

// 重导出核心类型（便于使用）
pub use types::*;
pub use error::{HomologyError, Result};
pub use config::*;
pub use self::core::*;

#[cfg(feature = "python")]
pub use ffi::*;

// 版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
