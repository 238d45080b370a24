//! 转录本与 detail 注释的 join。
//!
//! 两阶段：先把整个 detail 流读入 [`AnnotationIndex`]（按染色体、转录本名分组，
//! 组内保持文件顺序）；再由 [`TranscriptIter`] 逐条读取 BED12，按
//! `(name, chromosome)` 取出候选注释，只保留被转录本区间完全包含的那些，
//! 并把它们的链方向改写为转录本的链方向。

pub mod normalize;

use hashbrown::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{GeneCheckError, Result};
use crate::io::bed::parse_transcript;
use crate::io::detail::parse_annotation;
use crate::io::lines::LineCursor;
use crate::model::{Transcript, TranscriptAnnotation};

#[derive(Debug, Clone, Copy, Default)]
pub struct JoinOptions {
    /// 在建索引时对每条注释执行 [`normalize::normalize_annotation`]
    pub normalize_labels: bool,
}

/// 被包含过滤丢弃的注释只体现在计数里，不算错误
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub transcripts: usize,
    pub attached: usize,
    pub dropped: usize,
}

/// chromosome -> transcript name -> annotations（文件顺序）
#[derive(Debug, Default)]
pub struct AnnotationIndex {
    by_chrom: HashMap<String, HashMap<String, Vec<TranscriptAnnotation>>>,
    len: usize,
}

impl AnnotationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读完整个 detail 流；任意一行列数不对即中止
    pub fn from_reader<R: BufRead>(reader: R, source: &str, opts: JoinOptions) -> Result<Self> {
        let mut cur = LineCursor::new(reader, source);
        let mut index = Self::new();
        let mut normalized = 0usize;
        while cur.advance()? {
            let mut annotation = parse_annotation(&cur)?;
            if opts.normalize_labels && normalize::normalize_annotation(&mut annotation) {
                normalized += 1;
            }
            index.insert(annotation);
        }
        log::debug!(
            "{}: indexed {} annotations on {} chromosomes ({} labels normalized)",
            source,
            index.len,
            index.by_chrom.len(),
            normalized
        );
        Ok(index)
    }

    pub fn insert(&mut self, annotation: TranscriptAnnotation) {
        self.by_chrom
            .entry(annotation.interval.chromosome.clone())
            .or_default()
            .entry(annotation.name.clone())
            .or_default()
            .push(annotation);
        self.len += 1;
    }

    pub fn get(&self, name: &str, chromosome: &str) -> &[TranscriptAnnotation] {
        self.by_chrom
            .get(chromosome)
            .and_then(|names| names.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 把包含在 `transcript` 内的候选注释按索引顺序追加到其注释列表。
    /// 同一条注释可被多个包含它的转录本各自持有一份。返回 (attached, dropped)。
    pub fn attach(&self, transcript: &mut Transcript) -> (usize, usize) {
        let candidates = self.get(&transcript.name, &transcript.interval.chromosome);
        let mut attached = 0usize;
        for candidate in candidates {
            if transcript.interval.contains(&candidate.interval) {
                let mut a = candidate.clone();
                a.interval.strand = transcript.interval.strand;
                transcript.annotations.push(a);
                attached += 1;
            }
        }
        (attached, candidates.len() - attached)
    }
}

/// 按 BED12 输入顺序惰性产出 [`Transcript`]。
///
/// 单遍，不可回退；出错后不再产出。重新遍历需要重新构造。
pub struct TranscriptIter<R: BufRead> {
    index: AnnotationIndex,
    cur: LineCursor<R>,
    stats: JoinStats,
    done: bool,
}

impl<R: BufRead> TranscriptIter<R> {
    pub fn new(index: AnnotationIndex, bed: R, source: impl Into<String>) -> Self {
        Self {
            index,
            cur: LineCursor::new(bed, source),
            stats: JoinStats::default(),
            done: false,
        }
    }

    pub fn stats(&self) -> JoinStats {
        self.stats
    }

    pub fn index(&self) -> &AnnotationIndex {
        &self.index
    }

    fn next_transcript(&mut self) -> Result<Option<Transcript>> {
        if !self.cur.advance()? {
            return Ok(None);
        }
        let mut t = parse_transcript(&self.cur)?;
        let (attached, dropped) = self.index.attach(&mut t);
        if dropped > 0 {
            log::debug!(
                "{}: dropped {} annotation(s) outside {}",
                t.name,
                dropped,
                t.interval
            );
        }
        self.stats.transcripts += 1;
        self.stats.attached += attached;
        self.stats.dropped += dropped;
        Ok(Some(t))
    }
}

impl<R: BufRead> Iterator for TranscriptIter<R> {
    type Item = Result<Transcript>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_transcript() {
            Ok(Some(t)) => Some(Ok(t)),
            Ok(None) => {
                self.done = true;
                log::debug!(
                    "{}: {} transcripts, {} annotations attached, {} dropped",
                    self.cur.source(),
                    self.stats.transcripts,
                    self.stats.attached,
                    self.stats.dropped
                );
                None
            }
            Err(e) => {
                self.done = true;
                self.cur.finish();
                Some(Err(e))
            }
        }
    }
}

/// 先建 detail 索引，再返回 BED12 流上的惰性迭代器
pub fn parse_transcripts<B: BufRead, D: BufRead>(
    bed: B,
    bed_source: &str,
    details: D,
    details_source: &str,
    opts: JoinOptions,
) -> Result<TranscriptIter<B>> {
    let index = AnnotationIndex::from_reader(details, details_source, opts)?;
    Ok(TranscriptIter::new(index, bed, bed_source))
}

pub fn open_transcripts(
    bed_path: &Path,
    details_path: &Path,
    opts: JoinOptions,
) -> Result<TranscriptIter<BufReader<File>>> {
    let bed = BufReader::new(File::open(bed_path)?);
    let details = BufReader::new(File::open(details_path)?);
    parse_transcripts(
        bed,
        &bed_path.display().to_string(),
        details,
        &details_path.display().to_string(),
        opts,
    )
}

pub fn get_transcripts(bed_path: &Path, details_path: &Path, opts: JoinOptions) -> Result<Vec<Transcript>> {
    let mut iter = open_transcripts(bed_path, details_path, opts)?;
    let transcripts = iter.by_ref().collect::<Result<Vec<_>>>()?;
    let stats = iter.stats();
    log::info!(
        "read {} transcripts from {} ({} annotations attached, {} dropped)",
        stats.transcripts,
        bed_path.display(),
        stats.attached,
        stats.dropped
    );
    Ok(transcripts)
}

/// name -> 同名转录本（输入顺序）
pub fn transcript_list_to_dict(transcripts: Vec<Transcript>) -> HashMap<String, Vec<Transcript>> {
    let mut out: HashMap<String, Vec<Transcript>> = HashMap::new();
    for t in transcripts {
        out.entry(t.name.clone()).or_default().push(t);
    }
    out
}

/// 同 [`transcript_list_to_dict`]，但名称重复时报错
pub fn transcript_list_to_unique_dict(transcripts: Vec<Transcript>) -> Result<HashMap<String, Transcript>> {
    let mut out: HashMap<String, Transcript> = HashMap::with_capacity(transcripts.len());
    for t in transcripts {
        if out.contains_key(&t.name) {
            return Err(GeneCheckError::DuplicateTranscript {
                name: t.name,
                chromosome: t.interval.chromosome,
            });
        }
        out.insert(t.name.clone(), t);
    }
    Ok(out)
}
