/*!
 * 核心算法模块
 *
 * # 子模块
 *
 * - `field`: 系数域（Z/2Z, Z/pZ）
 * - `representation`: 列存储（位集 / 有序向量 / 有序映射）
 * - `complex`: 按 filtration 排序的单纯复形
 * - `boundary`: 边界矩阵与对偶
 * - `reduction`: 标准列归约
 * - `union_find`: 0 维快速路径
 * - `diagram`: 持久性图
 * - `algorithm`: 端到端计算流程
 *
 * # 依赖关系
 *
 * ```text
 * field
 *   ↓
 * representation   complex
 *   ↓                ↓
 * boundary ←─────────┘
 *   ↓
 * reduction   union_find   diagram
 *   ↓             ↓           ↓
 * algorithm ←─────┴───────────┘
 * ```
 */

pub mod field;
pub mod representation;
pub mod complex;
pub mod boundary;
pub mod reduction;
pub mod union_find;
pub mod diagram;
pub mod algorithm;

// 重导出（便于外部使用）
pub use field::*;
pub use representation::{new_store, BitsetColumns, ColumnStore, Entry, ListColumns, MapColumns};
pub use complex::*;
pub use boundary::*;
pub use reduction::*;
pub use union_find::*;
pub use diagram::*;
pub use algorithm::*;
