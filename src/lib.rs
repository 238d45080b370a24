//! # genecheck
//!
//! gene-check 结果的转录本模型与注释 join。
//!
//! 输入是两路相互独立的流：
//!
//! - **BED12**：每行一个转录本（区间、exon、CDS 边界、颜色）
//! - **detail BED**：逐碱基的分类注释，第 4 列为 `label1/.../labelN/transcriptName`
//!
//! 本 crate 把 detail 流按 `(transcriptName, chromosome)` 建索引，再流式读取
//! BED12，为每个转录本挂上被其区间完全包含的注释，并统一链方向。
//!
//! ## 快速示例
//!
//! ```rust
//! use std::io::Cursor;
//! use genecheck::join::{parse_transcripts, JoinOptions};
//! use genecheck::model::Strand;
//!
//! let bed = "1\t2812346\t3113743\tENSMUST00000065527.4\t0\t-\t2812370\t3038729\t128,0,0\t1\t301397\t0\n";
//! let details = "1\t2812370\t2812372\tnoStop/ENSMUST00000065527.4\n";
//!
//! let transcripts = parse_transcripts(
//!     Cursor::new(bed), "tx.bed",
//!     Cursor::new(details), "tx.details.bed",
//!     JoinOptions::default(),
//! )?
//! .collect::<genecheck::Result<Vec<_>>>()?;
//!
//! let ann = &transcripts[0].annotations[0];
//! assert_eq!(ann.labels.iter().collect::<Vec<_>>(), vec!["noStop"]);
//! assert_eq!(ann.interval.strand, Strand::Minus);
//! # Ok::<(), genecheck::GeneCheckError>(())
//! ```
//!
//! ## 模块说明
//!
//! - [`model`] — 半开区间、注释、转录本
//! - [`io`] — BED12 / detail BED / PSL / FASTA / chrom.sizes 读写
//! - [`join`] — 注释索引与惰性转录本迭代器
//! - [`seq`] — 常驻内存的参考序列与链感知切片
//! - [`util`] — 反向互补、密码子翻译

pub mod error;
pub mod io;
pub mod join;
pub mod model;
pub mod seq;
pub mod util;

pub use error::{GeneCheckError, Result};
