use std::io::BufRead;
use std::path::Path;

use crate::error::Result;
use crate::io::lines::{parse_int, parse_int_list, LineCursor};

pub const PSL_FIELDS: usize = 21;

/// UCSC PSL 比对记录的一行（21 列）。
///
/// 参见 <http://genome.ucsc.edu/FAQ/FAQformat.html#format2>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PslRecord {
    pub matches: u32,
    pub mismatches: u32,
    pub rep_matches: u32,
    pub n_count: u32,
    pub q_num_insert: u32,
    pub q_base_insert: u64,
    pub t_num_insert: u32,
    pub t_base_insert: u64,
    /// `+`、`-` 或翻译比对的 `++`/`+-` 等
    pub strand: String,
    pub q_name: String,
    pub q_size: u64,
    pub q_start: u64,
    pub q_end: u64,
    pub t_name: String,
    pub t_size: u64,
    pub t_start: u64,
    pub t_end: u64,
    pub block_count: u32,
    pub block_sizes: Vec<u64>,
    pub q_starts: Vec<u64>,
    pub t_starts: Vec<u64>,
}

/// 索引用复合键 (qName, tName, tStart, tEnd)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PslKey {
    pub q_name: String,
    pub t_name: String,
    pub t_start: u64,
    pub t_end: u64,
}

impl PslRecord {
    pub fn key(&self) -> PslKey {
        PslKey {
            q_name: self.q_name.clone(),
            t_name: self.t_name.clone(),
            t_start: self.t_start,
            t_end: self.t_end,
        }
    }

    /// `qName_tName_tStart_tEnd`
    pub fn hash_key(&self) -> String {
        format!("{}_{}_{}_{}", self.q_name, self.t_name, self.t_start, self.t_end)
    }
}

pub fn parse_psl<R: BufRead>(cur: &LineCursor<R>) -> Result<PslRecord> {
    let t = cur.tokens();
    if t.len() != PSL_FIELDS {
        return Err(cur.schema_error(format!(
            "expected {} columns, found {}",
            PSL_FIELDS,
            t.len()
        )));
    }
    let schema = |reason: String| cur.schema_error(reason);
    Ok(PslRecord {
        matches: parse_int(t[0], "matches").map_err(schema)?,
        mismatches: parse_int(t[1], "misMatches").map_err(schema)?,
        rep_matches: parse_int(t[2], "repMatches").map_err(schema)?,
        n_count: parse_int(t[3], "nCount").map_err(schema)?,
        q_num_insert: parse_int(t[4], "qNumInsert").map_err(schema)?,
        q_base_insert: parse_int(t[5], "qBaseInsert").map_err(schema)?,
        t_num_insert: parse_int(t[6], "tNumInsert").map_err(schema)?,
        t_base_insert: parse_int(t[7], "tBaseInsert").map_err(schema)?,
        strand: t[8].to_string(),
        q_name: t[9].to_string(),
        q_size: parse_int(t[10], "qSize").map_err(schema)?,
        q_start: parse_int(t[11], "qStart").map_err(schema)?,
        q_end: parse_int(t[12], "qEnd").map_err(schema)?,
        t_name: t[13].to_string(),
        t_size: parse_int(t[14], "tSize").map_err(schema)?,
        t_start: parse_int(t[15], "tStart").map_err(schema)?,
        t_end: parse_int(t[16], "tEnd").map_err(schema)?,
        block_count: parse_int(t[17], "blockCount").map_err(schema)?,
        block_sizes: parse_int_list(t[18], "blockSizes").map_err(schema)?,
        q_starts: parse_int_list(t[19], "qStarts").map_err(schema)?,
        t_starts: parse_int_list(t[20], "tStarts").map_err(schema)?,
    })
}

/// 惰性读取 PSL；遇到第一条坏行即返回错误并停止
pub struct PslReader<R: BufRead> {
    cur: LineCursor<R>,
}

impl<R: BufRead> PslReader<R> {
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        Self { cur: LineCursor::new(reader, source) }
    }
}

impl<R: BufRead> Iterator for PslReader<R> {
    type Item = Result<PslRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cur.advance() {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                self.cur.finish();
                return Some(Err(e));
            }
        }
        let rec = parse_psl(&self.cur);
        if rec.is_err() {
            self.cur.finish();
        }
        Some(rec)
    }
}

pub fn get_alignments(path: &Path) -> Result<Vec<PslRecord>> {
    let f = std::fs::File::open(path)?;
    PslReader::new(std::io::BufReader::new(f), path.display().to_string()).collect()
}
