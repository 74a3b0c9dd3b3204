//! 基因识别：在 DNA 序列中查找参考字典中的基因。
//!
//! - [`ExactMatcher`] — 子串精确包含
//! - [`FuzzyMatcher`] — 定长窗口 + Levenshtein 距离，容忍少量突变
//!
//! 两者都实现 [`GeneIdentifier`]；基于索引的加速实现（BK-tree、Myers 位并行等）
//! 只需实现同一个 trait 即可替换。

pub mod exact;
pub mod fuzzy;

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::dict::{self, GeneDictionary, LoadError};

pub use exact::ExactMatcher;
pub use fuzzy::{FuzzyMatcher, FuzzyOpt, DEFAULT_THRESHOLD};

/// 识别结果：去重的基因 ID 集合，空集表示未找到
pub type GeneSet = BTreeSet<String>;

pub trait GeneIdentifier: Send + Sync {
    /// 返回 `sequence` 中出现的所有基因 ID。任何输入都合法，不会失败。
    fn identify(&self, sequence: &str) -> GeneSet;

    fn dictionary(&self) -> &GeneDictionary;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchMode {
    /// Substring containment only
    #[default]
    Exact,
    /// Windowed edit-distance scan tolerating point mutations
    Fuzzy,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModeError {
    #[error("Unknown search mode '{0}' (expected 'exact' or 'fuzzy')")]
    Unknown(String),
}

impl FromStr for SearchMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("exact") {
            Ok(SearchMode::Exact)
        } else if s.eq_ignore_ascii_case("fuzzy") {
            Ok(SearchMode::Fuzzy)
        } else {
            Err(ModeError::Unknown(s.to_string()))
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Exact => f.write_str("exact"),
            SearchMode::Fuzzy => f.write_str("fuzzy"),
        }
    }
}

#[derive(Error, Debug)]
pub enum IdentifyError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// 按模式构造识别器；`opt` 仅对模糊模式生效
pub fn build_identifier(
    dict: GeneDictionary,
    mode: SearchMode,
    opt: FuzzyOpt,
) -> Result<Box<dyn GeneIdentifier>, IdentifyError> {
    Ok(match mode {
        SearchMode::Exact => Box::new(ExactMatcher::new(dict)),
        SearchMode::Fuzzy => Box::new(FuzzyMatcher::with_opt(dict, opt)?),
    })
}

pub fn from_json_file(path: &Path, mode: SearchMode) -> Result<Box<dyn GeneIdentifier>, IdentifyError> {
    from_json_file_with_opt(path, mode, FuzzyOpt::default())
}

pub fn from_json_file_with_opt(
    path: &Path,
    mode: SearchMode,
    opt: FuzzyOpt,
) -> Result<Box<dyn GeneIdentifier>, IdentifyError> {
    let dict = dict::load_json_file(path)?;
    build_identifier(dict, mode, opt)
}
