//! # gene-finder
//!
//! 在 DNA 序列中识别已知基因：给定参考基因字典（参考序列 → 基因 ID），
//! 找出在长序列中精确出现、或在少量突变（编辑距离 < 3）内出现的所有基因。
//!
//! - **编辑距离**：Levenshtein 距离，两行滚动 DP，缓冲区可复用
//! - **基因字典**：从 JSON `{"<sequence>": "<gene id>"}` 加载，构造后不可变
//! - **精确识别**：子串包含
//! - **模糊识别**：等长滑动窗口 + 编辑距离，可按字典条目多线程并行
//!
//! ## 快速示例
//!
//! ```rust
//! use gene_finder::dict::GeneDictionary;
//! use gene_finder::identify::{ExactMatcher, FuzzyMatcher, GeneIdentifier};
//!
//! let dict: GeneDictionary = [("CCCCCCCCC", "c-gene-1"), ("CTCTCTCT", "ct-gene-2")]
//!     .into_iter()
//!     .collect();
//!
//! let exact = ExactMatcher::new(dict.clone());
//! assert!(exact.identify("ATCGCTCTCTCTGGGAG").contains("ct-gene-2"));
//!
//! // 一处突变（C -> G）仍能识别
//! let fuzzy = FuzzyMatcher::new(dict);
//! assert!(fuzzy.identify("ATCGCTCTGTCTGGGAG").contains("ct-gene-2"));
//! ```
//!
//! ## 模块说明
//!
//! - [`align`] — 编辑距离
//! - [`dict`] — 基因字典与 JSON 加载
//! - [`identify`] — 识别器 trait、精确 / 模糊实现、按模式构造
//! - [`io`] — FASTA 查询序列读取
//! - [`util`] — 碱基字母表检查

pub mod align;
pub mod dict;
pub mod identify;
pub mod io;
pub mod util;

pub use dict::GeneDictionary;
pub use identify::{GeneIdentifier, GeneSet, SearchMode};
