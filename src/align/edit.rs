/// Levenshtein 编辑距离：将 `a` 变换为 `b` 所需的最少单字符插入、删除、替换次数。
/// 逐元素比较（对字符串按 `char` 传入），不做碱基校验，大小写敏感。
pub fn distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    distance_with_buf(a, b, &mut EditBuffer::new())
}

/// DP 工作缓冲区（两行滚动），可跨调用复用
#[derive(Debug, Default, Clone)]
pub struct EditBuffer {
    prev: Vec<usize>,
    curr: Vec<usize>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self {
            prev: Vec::new(),
            curr: Vec::new(),
        }
    }

    fn reset(&mut self, cols: usize) {
        self.prev.clear();
        self.prev.extend(0..cols);
        self.curr.clear();
        self.curr.resize(cols, 0);
    }
}

pub fn distance_with_buf<T: PartialEq>(a: &[T], b: &[T], buf: &mut EditBuffer) -> usize {
    // 让较短的序列作为列，缩小缓冲区
    let (a, b) = if b.len() > a.len() { (b, a) } else { (a, b) };
    let n = b.len();

    if n == 0 {
        return a.len();
    }

    buf.reset(n + 1);

    for (i, x) in a.iter().enumerate() {
        buf.curr[0] = i + 1;
        for j in 1..=n {
            let subst = buf.prev[j - 1] + usize::from(*x != b[j - 1]);
            let del = buf.prev[j] + 1;
            let ins = buf.curr[j - 1] + 1;
            buf.curr[j] = subst.min(del).min(ins);
        }
        std::mem::swap(&mut buf.prev, &mut buf.curr);
    }

    buf.prev[n]
}
