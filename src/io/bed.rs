use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::Result;
use crate::io::lines::{parse_int, parse_int_list, LineCursor};
use crate::model::{ChromosomeInterval, Strand, Transcript};

pub const BED12_FIELDS: usize = 12;

/// 把游标当前行解析为 BED12 转录本（不含注释）
pub fn parse_transcript<R: BufRead>(cur: &LineCursor<R>) -> Result<Transcript> {
    let tokens = cur.tokens();
    if tokens.len() != BED12_FIELDS {
        return Err(cur.schema_error(format!(
            "expected {} columns, found {}",
            BED12_FIELDS,
            tokens.len()
        )));
    }
    let schema = |reason: String| cur.schema_error(reason);

    let chrom = tokens[0];
    let start: u64 = parse_int(tokens[1], "chromStart").map_err(schema)?;
    let stop: u64 = parse_int(tokens[2], "chromEnd").map_err(schema)?;
    let name = tokens[3];
    let score: i64 = parse_int(tokens[4], "score").map_err(schema)?;
    let strand = Strand::from_bed_char(tokens[5])
        .ok_or_else(|| schema(format!("strand must be + or -, found {:?}", tokens[5])))?;
    let thick_start: u64 = parse_int(tokens[6], "thickStart").map_err(schema)?;
    let thick_end: u64 = parse_int(tokens[7], "thickEnd").map_err(schema)?;
    let color = tokens[8];
    let exon_count: usize = parse_int(tokens[9], "blockCount").map_err(schema)?;
    let sizes: Vec<u64> = parse_int_list(tokens[10], "blockSizes").map_err(schema)?;
    let starts: Vec<u64> = parse_int_list(tokens[11], "blockStarts").map_err(schema)?;

    if exon_count != sizes.len() || exon_count != starts.len() {
        return Err(schema(format!(
            "blockCount {} does not match {} blockSizes / {} blockStarts",
            exon_count,
            sizes.len(),
            starts.len()
        )));
    }

    let interval = ChromosomeInterval::new(chrom, start, stop, strand)?;
    let mut exons: Vec<ChromosomeInterval> = Vec::with_capacity(exon_count);
    for (&offset, &size) in starts.iter().zip(&sizes) {
        let (exon_start, exon_stop) = start
            .checked_add(offset)
            .and_then(|s| Some((s, s.checked_add(size)?)))
            .ok_or_else(|| schema(format!("block at offset {} size {} overflows", offset, size)))?;
        let exon = ChromosomeInterval::new(chrom, exon_start, exon_stop, strand)?;
        if !interval.contains(&exon) {
            return Err(schema(format!("exon {} lies outside the transcript", exon)));
        }
        if let Some(prev) = exons.last() {
            if prev.stop > exon.start {
                return Err(schema(format!("exon {} overlaps or precedes {}", exon, prev)));
            }
        }
        exons.push(exon);
    }

    Ok(Transcript {
        interval,
        name: name.to_string(),
        exons,
        annotations: Vec::new(),
        score,
        thick_start,
        thick_end,
        color: color.to_string(),
    })
}

/// 读取不带 detail 的 BED12 文件
pub fn read_transcripts<R: BufRead>(reader: R, source: &str) -> Result<Vec<Transcript>> {
    let mut cur = LineCursor::new(reader, source);
    let mut out = Vec::new();
    while cur.advance()? {
        out.push(parse_transcript(&cur)?);
    }
    Ok(out)
}

/// 按 (区间, 名称) 排序后逐行写出，不修改输入
pub fn write_transcripts<W: Write>(transcripts: &[Transcript], out: &mut W) -> Result<()> {
    let mut sorted: Vec<&Transcript> = transcripts.iter().collect();
    sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    for t in sorted {
        writeln!(out, "{}", t.bed_string())?;
    }
    Ok(())
}

pub fn write_bed(transcripts: &[Transcript], path: &Path) -> Result<()> {
    let f = std::fs::File::create(path)?;
    let mut w = std::io::BufWriter::new(f);
    write_transcripts(transcripts, &mut w)?;
    w.flush()?;
    Ok(())
}
