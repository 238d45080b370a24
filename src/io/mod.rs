//! 固定列格式的读写：FASTA、BED12、detail BED、PSL、chrom.sizes

pub mod bed;
pub mod detail;
pub mod fasta;
pub mod lines;
pub mod psl;
pub mod sizes;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Transcript;

pub const OUT_BED: &str = "out.bed";
pub const OUT_DETAILS_BED: &str = "out_details.bed";

/// `out_dir` 下的 (out.bed, out_details.bed)
pub fn bed_out_files(out_dir: &Path) -> (PathBuf, PathBuf) {
    (out_dir.join(OUT_BED), out_dir.join(OUT_DETAILS_BED))
}

/// 同时写出转录本 BED12 与去重后的 detail BED
pub fn write_all_beds(transcripts: &[Transcript], out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let (bed, details) = bed_out_files(out_dir);
    bed::write_bed(transcripts, &bed)?;
    detail::write_detail_bed(transcripts, &details)?;
    Ok((bed, details))
}
