use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use super::{GeneIdentifier, GeneSet};
use crate::align::edit::{distance_with_buf, EditBuffer};
use crate::dict::GeneDictionary;

/// 默认突变容忍阈值（不含）：编辑距离 < 3 视为命中
pub const DEFAULT_THRESHOLD: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuzzyOpt {
    /// 编辑距离严格小于该值时命中
    pub threshold: usize,
    /// 是否扫描结束于序列末尾的最后一个窗口。
    /// 默认不扫描：窗口起点为 `0..len - L`，与历史行为保持一致。
    pub scan_final_window: bool,
    /// 按字典条目并行的线程数，1 为单线程
    pub threads: usize,
}

impl Default for FuzzyOpt {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            scan_final_window: false,
            threads: 1,
        }
    }
}

/// 暴力模糊匹配：对每个参考序列，在 DNA 序列上滑动等长窗口并计算编辑距离。
/// 复杂度 O(D·N·L²)。
#[derive(Debug)]
pub struct FuzzyMatcher {
    dict: GeneDictionary,
    opt: FuzzyOpt,
    pool: Option<ThreadPool>,
}

impl FuzzyMatcher {
    /// 默认参数（阈值 3，单线程）
    pub fn new(dict: GeneDictionary) -> Self {
        Self {
            dict,
            opt: FuzzyOpt::default(),
            pool: None,
        }
    }

    pub fn with_opt(dict: GeneDictionary, opt: FuzzyOpt) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = if opt.threads > 1 {
            Some(ThreadPoolBuilder::new().num_threads(opt.threads).build()?)
        } else {
            None
        };
        debug!(
            "fuzzy matcher: {} genes, threshold {}, final window {}, {} thread(s)",
            dict.len(),
            opt.threshold,
            opt.scan_final_window,
            opt.threads.max(1)
        );
        Ok(Self { dict, opt, pool })
    }

    pub fn opt(&self) -> FuzzyOpt {
        self.opt
    }
}

impl GeneIdentifier for FuzzyMatcher {
    fn identify(&self, sequence: &str) -> GeneSet {
        // 窗口与距离都按字符计，非 ASCII 输入也保持字符语义
        let chars: Vec<char> = sequence.chars().collect();
        let seq = chars.as_slice();
        let opt = self.opt;

        match &self.pool {
            None => {
                let mut buf = EditBuffer::new();
                self.dict
                    .iter()
                    .filter(|(reference, _)| window_hit(reference, seq, opt, &mut buf))
                    .map(|(_, id)| id.to_string())
                    .collect()
            }
            Some(pool) => {
                let entries: Vec<(&str, &str)> = self.dict.iter().collect();
                let hits: Vec<&str> = pool.install(|| {
                    entries
                        .par_iter()
                        .map_init(EditBuffer::new, |buf, &(reference, id)| {
                            window_hit(reference, seq, opt, buf).then_some(id)
                        })
                        .flatten()
                        .collect()
                });
                hits.into_iter().map(str::to_string).collect()
            }
        }
    }

    fn dictionary(&self) -> &GeneDictionary {
        &self.dict
    }
}

/// 窗口起点的上界（不含）。序列不长于参考序列时没有窗口（扫描最后窗口时允许等长）。
fn window_end(seq_len: usize, ref_len: usize, scan_final_window: bool) -> usize {
    if scan_final_window {
        if seq_len >= ref_len {
            seq_len - ref_len + 1
        } else {
            0
        }
    } else {
        seq_len.saturating_sub(ref_len)
    }
}

/// 任一窗口的编辑距离低于阈值即返回 true（同一条目命中一次即可停止）
fn window_hit(reference: &str, seq: &[char], opt: FuzzyOpt, buf: &mut EditBuffer) -> bool {
    let reference: Vec<char> = reference.chars().collect();
    let len = reference.len();
    (0..window_end(seq.len(), len, opt.scan_final_window))
        .any(|i| distance_with_buf(&reference, &seq[i..i + len], buf) < opt.threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identify::tests::{genes, sample_dict};

    fn make_seq(len: usize, seed: u32) -> String {
        let bases = ['A', 'C', 'G', 'T'];
        let mut x = seed;
        (0..len)
            .map(|_| {
                x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                bases[(x >> 16) as usize % 4]
            })
            .collect()
    }

    #[test]
    fn fuzzy_single_substitution() {
        let m = FuzzyMatcher::new(sample_dict());
        assert_eq!(m.identify("ATCGCTCTGTCTGGGAG"), genes(&["ct-gene-2"]));
    }

    #[test]
    fn fuzzy_multiple_matches() {
        let m = FuzzyMatcher::new(sample_dict());
        assert_eq!(
            m.identify("ATCGCTCTCTCTGGGAGCCCCCCCGG"),
            genes(&["ct-gene-2", "c-gene-1"])
        );
    }

    #[test]
    fn fuzzy_rejects_three_edits() {
        let dict: GeneDictionary = [("AAAAAAAA", "poly-a")].into_iter().collect();
        let m = FuzzyMatcher::new(dict);
        // 每个长度 8 的窗口至少含 3 个 C
        assert!(m.identify("CCCAAAAACCCC").is_empty());
        // "CAAAAAAC" 距离为 2
        assert_eq!(m.identify("CCAAAAAACCCC"), genes(&["poly-a"]));
    }

    #[test]
    fn fuzzy_sequence_not_longer_than_reference() {
        let m = FuzzyMatcher::new(sample_dict());
        assert!(m.identify("CTCT").is_empty());
        assert!(m.identify("").is_empty());
        // 等长时没有可扫描的窗口
        assert!(m.identify("CTCTCTCT").is_empty());
    }

    #[test]
    fn fuzzy_final_window_is_skipped_by_default() {
        let dict: GeneDictionary = [("AAAAAAAA", "poly-a")].into_iter().collect();
        // 窗口 0 "CCCAAAAA" 距离 3，最后窗口 "CCAAAAAA" 距离 2
        let seq = "CCCAAAAAA";
        let exclusive = FuzzyMatcher::new(dict.clone());
        assert!(exclusive.identify(seq).is_empty());

        let opt = FuzzyOpt {
            scan_final_window: true,
            ..FuzzyOpt::default()
        };
        let inclusive = FuzzyMatcher::with_opt(dict, opt).unwrap();
        assert_eq!(inclusive.identify(seq), genes(&["poly-a"]));
    }

    #[test]
    fn fuzzy_final_window_allows_equal_length() {
        let opt = FuzzyOpt {
            scan_final_window: true,
            ..FuzzyOpt::default()
        };
        let m = FuzzyMatcher::with_opt(sample_dict(), opt).unwrap();
        assert_eq!(m.identify("CTCTCTCT"), genes(&["ct-gene-2"]));
        assert!(m.identify("CTCT").is_empty());
    }

    #[test]
    fn fuzzy_custom_threshold() {
        let opt = FuzzyOpt {
            threshold: 1,
            ..FuzzyOpt::default()
        };
        let m = FuzzyMatcher::with_opt(sample_dict(), opt).unwrap();
        // 阈值 1 时只接受精确窗口
        assert!(m.identify("ATCGCTCTGTCTGGGAG").is_empty());
        assert_eq!(m.identify("ATCGCTCTCTCTGGGAG"), genes(&["ct-gene-2"]));
    }

    #[test]
    fn fuzzy_window_end_bounds() {
        assert_eq!(window_end(17, 8, false), 9);
        assert_eq!(window_end(17, 8, true), 10);
        assert_eq!(window_end(8, 8, false), 0);
        assert_eq!(window_end(8, 8, true), 1);
        assert_eq!(window_end(3, 8, false), 0);
        assert_eq!(window_end(3, 8, true), 0);
    }

    #[test]
    fn fuzzy_windows_are_measured_in_chars() {
        let dict: GeneDictionary = [("AAAA", "poly-a")].into_iter().collect();
        let m = FuzzyMatcher::new(dict.clone());
        // 窗口 0 为 "A€€A"，两处替换
        assert_eq!(m.identify("A€€AX"), genes(&["poly-a"]));
        assert!(m.identify("€€€€X").is_empty());

        let opt = FuzzyOpt {
            threads: 2,
            ..FuzzyOpt::default()
        };
        let parallel = FuzzyMatcher::with_opt(dict, opt).unwrap();
        assert_eq!(parallel.identify("A€€AX"), genes(&["poly-a"]));
    }

    #[test]
    fn fuzzy_empty_reference_matches_non_empty_only() {
        let dict: GeneDictionary = [("", "empty")].into_iter().collect();
        let m = FuzzyMatcher::new(dict);
        assert!(m.identify("").is_empty());
        assert_eq!(m.identify("A"), genes(&["empty"]));
    }

    #[test]
    fn fuzzy_empty_dictionary() {
        let m = FuzzyMatcher::new(GeneDictionary::default());
        assert!(m.identify("ACGTACGT").is_empty());
    }

    #[test]
    fn fuzzy_parallel_matches_sequential() {
        let seq = make_seq(400, 99);
        let mut dict_entries: Vec<(String, String)> = (0..32)
            .map(|i| (make_seq(6 + i % 5, 1000 + i as u32), format!("rand-gene-{i}")))
            .collect();
        // 保证至少有一些命中
        dict_entries.push((seq[50..62].to_string(), "planted-1".to_string()));
        dict_entries.push((seq[300..310].to_string(), "planted-2".to_string()));
        let dict: GeneDictionary = dict_entries.into_iter().collect();

        let sequential = FuzzyMatcher::new(dict.clone());
        let opt = FuzzyOpt {
            threads: 4,
            ..FuzzyOpt::default()
        };
        let parallel = FuzzyMatcher::with_opt(dict, opt).unwrap();

        let expected = sequential.identify(&seq);
        assert!(expected.contains("planted-1"));
        assert!(expected.contains("planted-2"));
        assert_eq!(parallel.identify(&seq), expected);
    }
}
