use super::{GeneIdentifier, GeneSet};
use crate::dict::GeneDictionary;

/// 精确匹配：参考序列作为连续子串出现即命中（只看是否出现，不计位置和次数）
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    dict: GeneDictionary,
}

impl ExactMatcher {
    pub fn new(dict: GeneDictionary) -> Self {
        Self { dict }
    }
}

impl GeneIdentifier for ExactMatcher {
    fn identify(&self, sequence: &str) -> GeneSet {
        self.dict
            .iter()
            .filter(|(reference, _)| sequence.contains(*reference))
            .map(|(_, id)| id.to_string())
            .collect()
    }

    fn dictionary(&self) -> &GeneDictionary {
        &self.dict
    }
}
