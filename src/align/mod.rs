//! 序列比较内核。
//!
//! 目前只有 Levenshtein 编辑距离，供模糊扫描在每个窗口上调用。

pub mod edit;

pub use edit::{distance, distance_with_buf, EditBuffer};
