use thiserror::Error;

/// 本 crate 所有可失败操作的错误类型。
///
/// 除 `Io` 与 `Cache` 外，每个变体都对应一次致命中止：解析器遇到第一条
/// 违规记录即返回，不做重试或跳过。
#[derive(Debug, Error)]
pub enum GeneCheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 列数、整数、链方向字符或 exon 数组不符合固定格式
    #[error("schema violation in {file} line {line_no}: {reason}: {line:?}")]
    SchemaViolation {
        file: String,
        line_no: usize,
        line: String,
        reason: String,
    },

    #[error("out of range: {0}")]
    OutOfRange(String),

    #[error("unknown base {base:?} at position {position}")]
    UnknownBase { base: char, position: usize },

    #[error("missing sequence: {0}")]
    MissingSequence(String),

    #[error("duplicate transcript {name} on {chromosome}")]
    DuplicateTranscript { name: String, chromosome: String },

    #[error("sequence cache error: {0}")]
    Cache(#[from] bincode::Error),
}

impl GeneCheckError {
    pub fn schema(file: &str, line_no: usize, line: &str, reason: impl Into<String>) -> Self {
        GeneCheckError::SchemaViolation {
            file: file.to_string(),
            line_no,
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeneCheckError>;
