use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::Result;
use crate::io::lines::{parse_int, LineCursor};
use crate::model::{ChromosomeInterval, Strand, Transcript, TranscriptAnnotation};

pub const DETAIL_FIELDS: usize = 4;
pub const DETAIL_COLOR_FIELDS: usize = 9;

/// 解析 detail BED 当前行：4 列，或带颜色的 9 列。
///
/// 区间一律为 Unstranded，链方向在 join 时才确定。
pub fn parse_annotation<R: BufRead>(cur: &LineCursor<R>) -> Result<TranscriptAnnotation> {
    let tokens = cur.tokens();
    if tokens.len() != DETAIL_FIELDS && tokens.len() != DETAIL_COLOR_FIELDS {
        return Err(cur.schema_error(format!(
            "expected {} or {} columns, found {}",
            DETAIL_FIELDS,
            DETAIL_COLOR_FIELDS,
            tokens.len()
        )));
    }
    let start: u64 = parse_int(tokens[1], "chromStart").map_err(|e| cur.schema_error(e))?;
    let stop: u64 = parse_int(tokens[2], "chromEnd").map_err(|e| cur.schema_error(e))?;
    let interval = ChromosomeInterval::new(tokens[0], start, stop, Strand::Unstranded)?;

    let mut annotation = TranscriptAnnotation::from_composite_label(interval, tokens[3]);
    if tokens.len() == DETAIL_COLOR_FIELDS {
        annotation.color = tokens[8].to_string();
    }
    Ok(annotation)
}

pub fn read_annotations<R: BufRead>(reader: R, source: &str) -> Result<Vec<TranscriptAnnotation>> {
    let mut cur = LineCursor::new(reader, source);
    let mut out = Vec::new();
    while cur.advance()? {
        out.push(parse_annotation(&cur)?);
    }
    Ok(out)
}

/// 收集所有转录本的注释，去重并按 (区间, 名称) 排序后写出
pub fn write_annotations<W: Write>(transcripts: &[Transcript], out: &mut W) -> Result<()> {
    let annotations: BTreeSet<&TranscriptAnnotation> = transcripts
        .iter()
        .flat_map(|t| t.annotations.iter())
        .collect();
    for a in annotations {
        writeln!(out, "{}", a.bed_string())?;
    }
    Ok(())
}

pub fn write_detail_bed(transcripts: &[Transcript], path: &Path) -> Result<()> {
    let f = std::fs::File::create(path)?;
    let mut w = std::io::BufWriter::new(f);
    write_annotations(transcripts, &mut w)?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneCheckError;
    use std::io::Cursor;

    #[test]
    fn parse_four_and_nine_columns() {
        let data = "1\t2812370\t2812372\tnoStop/ENSMUST00000065527.4\n\
                    1 100 200 a/b/tx2 0 + 100 200 255,0,0\n";
        let anns = read_annotations(Cursor::new(data), "details.bed").unwrap();
        assert_eq!(anns.len(), 2);
        assert_eq!(anns[0].name, "ENSMUST00000065527.4");
        assert_eq!(anns[0].labels.iter().collect::<Vec<_>>(), vec!["noStop"]);
        assert_eq!(anns[0].interval.strand, Strand::Unstranded);
        assert!(anns[0].color.is_empty());

        assert_eq!(anns[1].name, "tx2");
        assert_eq!(anns[1].labels.len(), 2);
        assert_eq!(anns[1].color, "255,0,0");
        // strand column is ignored at parse time
        assert_eq!(anns[1].interval.strand, Strand::Unstranded);
    }

    #[test]
    fn wrong_token_count_is_fatal() {
        let data = "1\t10\t20\tx/tx\n1\t10\t20\tx/tx\t0\n1\t10\t20\ty/tx\n";
        match read_annotations(Cursor::new(data), "details.bed") {
            Err(GeneCheckError::SchemaViolation { file, line_no, line, .. }) => {
                assert_eq!(file, "details.bed");
                assert_eq!(line_no, 2);
                assert_eq!(line, "1\t10\t20\tx/tx\t0");
            }
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[test]
    fn writer_dedupes_and_sorts() {
        let iv = |a, b| ChromosomeInterval::new("1", a, b, Strand::Plus).unwrap();
        let shared = TranscriptAnnotation::from_composite_label(iv(50, 52), "noStop/tx");
        let early = TranscriptAnnotation::from_composite_label(iv(10, 12), "badFrame/tx");
        let mk = |name: &str, anns: Vec<TranscriptAnnotation>| Transcript {
            interval: iv(0, 100),
            name: name.to_string(),
            exons: vec![iv(0, 100)],
            annotations: anns,
            score: 0,
            thick_start: 0,
            thick_end: 100,
            color: "0".to_string(),
        };
        let ts = vec![mk("tx", vec![shared.clone()]), mk("tx", vec![shared, early])];
        let mut out = Vec::new();
        write_annotations(&ts, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\t10\t12\tbadFrame/tx\n1\t50\t52\tnoStop/tx\n"
        );
    }
}
