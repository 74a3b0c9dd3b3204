//! 参考基因字典：参考序列 → 基因 ID。
//!
//! 构造后不可变；迭代顺序为参考序列的字典序，保证结果可复现。

pub mod load;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use load::{load_json, load_json_file, LoadError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneDictionary {
    entries: BTreeMap<String, String>,
}

impl GeneDictionary {
    /// 从 {sequence: gene_id} 映射构造，内容不做任何校验
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// (参考序列, 基因 ID) 迭代
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(s, id)| (s.as_str(), id.as_str()))
    }

    pub fn get(&self, reference: &str) -> Option<&str> {
        self.entries.get(reference).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 最长参考序列的字符数（空字典为 0）
    pub fn max_reference_len(&self) -> usize {
        self.entries.keys().map(|s| s.chars().count()).max().unwrap_or(0)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GeneDictionary {
    /// 重复的参考序列以最后一次出现为准
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dict_iterates_in_sequence_order() {
        let dict: GeneDictionary = [("CTCTCTCT", "ct-gene-2"), ("CCCCCCCCC", "c-gene-1")]
            .into_iter()
            .collect();
        let pairs: Vec<(&str, &str)> = dict.iter().collect();
        assert_eq!(pairs, vec![("CCCCCCCCC", "c-gene-1"), ("CTCTCTCT", "ct-gene-2")]);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.max_reference_len(), 9);
    }

    #[test]
    fn dict_duplicate_keys_last_wins() {
        let dict: GeneDictionary = [("ACGT", "first"), ("ACGT", "second")].into_iter().collect();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("ACGT"), Some("second"));
    }

    #[test]
    fn dict_shared_identifier_is_tolerated() {
        let dict: GeneDictionary = [("AAAA", "g"), ("CCCC", "g")].into_iter().collect();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("CCCC"), Some("g"));
    }

    #[test]
    fn dict_empty() {
        let dict = GeneDictionary::default();
        assert!(dict.is_empty());
        assert_eq!(dict.max_reference_len(), 0);
        assert_eq!(dict.iter().count(), 0);
    }
}
