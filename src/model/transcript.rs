use super::annotation::TranscriptAnnotation;
use super::interval::{ChromosomeInterval, Strand};
use crate::error::{GeneCheckError, Result};
use crate::seq::Sequence;
use crate::util::dna;

/// 一条 BED12 记录及其通过包含过滤的注释。
///
/// `exons` 按起点排序、互不重叠且都落在 `interval` 内；
/// 每条注释都满足 `interval.contains(&annotation.interval)`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub interval: ChromosomeInterval,
    pub name: String,
    pub exons: Vec<ChromosomeInterval>,
    pub annotations: Vec<TranscriptAnnotation>,
    pub score: i64,
    pub thick_start: u64,
    pub thick_end: u64,
    /// itemRgb 原样保留
    pub color: String,
}

impl Transcript {
    #[inline]
    pub fn chromosome(&self) -> &str {
        &self.interval.chromosome
    }

    #[inline]
    pub fn strand(&self) -> Strand {
        self.interval.strand
    }

    /// BED 输出排序键：区间，其次名称
    pub fn sort_key(&self) -> (&ChromosomeInterval, &str) {
        (&self.interval, &self.name)
    }

    /// `name_chrom_start_stop`；`deuniquify` 时先去掉名称中的比对编号
    pub fn hash_key(&self, deuniquify: bool) -> String {
        let name = if deuniquify {
            remove_alignment_number(&self.name)
        } else {
            &self.name
        };
        format!(
            "{}_{}_{}_{}",
            name, self.interval.chromosome, self.interval.start, self.interval.stop
        )
    }

    pub fn bed_string(&self) -> String {
        let ci = &self.interval;
        let sizes: Vec<String> = self.exons.iter().map(|e| e.len().to_string()).collect();
        let starts: Vec<String> = self
            .exons
            .iter()
            .map(|e| (e.start - ci.start).to_string())
            .collect();
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            ci.chromosome,
            ci.start,
            ci.stop,
            self.name,
            self.score,
            ci.strand,
            self.thick_start,
            self.thick_end,
            self.color,
            self.exons.len(),
            sizes.join(","),
            starts.join(","),
        )
    }

    /// 按 exon 拼接出 5'->3' 方向的 mRNA；负链转录本整体反向互补。
    pub fn mrna(&self, sequence: &Sequence) -> Result<Vec<u8>> {
        if self.interval.chromosome != sequence.name() {
            return Err(GeneCheckError::MissingSequence(format!(
                "transcript {} is on {}, sequence given is {}",
                self.name,
                self.interval.chromosome,
                sequence.name()
            )));
        }
        if self.interval.stop > sequence.len() {
            return Err(GeneCheckError::OutOfRange(format!(
                "transcript {} ends at {} beyond {} length {}",
                self.name,
                self.interval.stop,
                sequence.name(),
                sequence.len()
            )));
        }
        let total: u64 = self.exons.iter().map(ChromosomeInterval::len).sum();
        let mut s = Vec::with_capacity(total as usize);
        for e in &self.exons {
            s.extend_from_slice(&sequence.slice(e.start, e.stop, Strand::Plus)?);
        }
        if self.interval.strand == Strand::Minus {
            dna::revcomp_in_place(&mut s)?;
        }
        Ok(s)
    }
}

/// `ENSMUST00000169901.2-1` -> `ENSMUST00000169901.2`：截掉第一个 `-` 及其后内容
pub fn remove_alignment_number(name: &str) -> &str {
    match name.find('-') {
        Some(i) => &name[..i],
        None => name,
    }
}
