pub const ALPHABET: [char; 4] = ['A', 'C', 'G', 'T'];

#[inline]
pub fn is_base(c: char) -> bool {
    ALPHABET.contains(&c)
}

/// 非 A/C/G/T 字符的个数（大小写敏感，小写也算）
pub fn count_non_acgt(seq: &str) -> usize {
    seq.chars().filter(|&c| !is_base(c)).count()
}

/// 第一个非 A/C/G/T 字符的位置（按字符计，从 0 开始）和字符
pub fn first_non_acgt(seq: &str) -> Option<(usize, char)> {
    seq.chars().enumerate().find(|&(_, c)| !is_base(c))
}
