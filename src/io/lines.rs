use std::io::BufRead;

use crate::error::{GeneCheckError, Result};

/// 逐行读取的游标，跳过空行，记录行号（1-based）供报错使用。
pub struct LineCursor<R: BufRead> {
    reader: R,
    source: String,
    buf: String,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        Self {
            reader,
            source: source.into(),
            buf: String::new(),
            line_no: 0,
            done: false,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// 前进到下一条非空行；到达文件尾返回 false
    pub fn advance(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                self.done = true;
                self.buf.clear();
                return Ok(false);
            }
            self.line_no += 1;
            if !self.buf.trim().is_empty() {
                return Ok(true);
            }
        }
    }

    /// 当前行（去掉行尾换行）
    pub fn line(&self) -> &str {
        self.buf.trim_end_matches(['\n', '\r'])
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.buf.split_whitespace().collect()
    }

    /// 标记结束；出错后不再继续读取
    pub fn finish(&mut self) {
        self.done = true;
    }

    /// 以当前行构造致命的格式错误
    pub fn schema_error(&self, reason: impl Into<String>) -> GeneCheckError {
        GeneCheckError::schema(&self.source, self.line_no, self.line(), reason)
    }
}

/// 整数列解析，失败时给出列名
pub fn parse_int<T: std::str::FromStr>(token: &str, column: &str) -> std::result::Result<T, String> {
    token
        .parse::<T>()
        .map_err(|_| format!("column {} is not an integer: {:?}", column, token))
}

/// 逗号分隔的整数列表，忽略空项（允许行尾逗号）
pub fn parse_int_list<T: std::str::FromStr>(token: &str, column: &str) -> std::result::Result<Vec<T>, String> {
    token
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| parse_int(s, column))
        .collect()
}
