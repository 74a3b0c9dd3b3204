use std::io::BufRead;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to read FASTA: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sequence data before first '>' header at line {0}")]
    MissingHeader(usize),
}

/// 一条待识别的查询序列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    pub name: String,
    pub seq: String,
}

/// 逐条读取 FASTA，序列拼接多行并转大写；记录名取 header 第一个空白前的部分
pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    line_no: usize,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_no: 0,
            done: false,
            peek_header: None,
        }
    }

    fn read_line(&mut self) -> Result<bool, FastaError> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        if n == 0 {
            self.done = true;
            return Ok(false);
        }
        self.line_no += 1;
        Ok(true)
    }

    pub fn next_record(&mut self) -> Result<Option<QueryRecord>, FastaError> {
        if self.done && self.peek_header.is_none() {
            return Ok(None);
        }

        let header = match self.peek_header.take() {
            Some(h) => h,
            None => loop {
                if !self.read_line()? {
                    return Ok(None);
                }
                let line = self.buf.trim();
                if line.is_empty() {
                    continue;
                }
                match line.strip_prefix('>') {
                    Some(h) => break h.trim().to_string(),
                    None => return Err(FastaError::MissingHeader(self.line_no)),
                }
            },
        };

        let name = header
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

        let mut seq = String::new();
        while !self.done {
            if !self.read_line()? {
                break;
            }
            if let Some(h) = self.buf.trim_start().strip_prefix('>') {
                self.peek_header = Some(h.trim().to_string());
                break;
            }
            seq.extend(
                self.buf
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| c.to_ascii_uppercase()),
            );
        }

        Ok(Some(QueryRecord { name, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<QueryRecord, FastaError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
