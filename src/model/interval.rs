use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GeneCheckError, Result};

/// 链方向。变体顺序即排序顺序：Unstranded < Minus < Plus。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strand {
    Unstranded,
    Minus,
    Plus,
}

impl Strand {
    /// 转录本只接受 `+` / `-`，其余字符返回 None
    pub fn from_bed_char(c: &str) -> Option<Self> {
        match c {
            "+" => Some(Strand::Plus),
            "-" => Some(Strand::Minus),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unstranded => '.',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// 染色体上的半开区间 `[start, stop)`，0-based。
///
/// 派生的 `Ord` 按 (chromosome, start, stop, strand) 字典序比较，
/// 这也是所有 BED 输出的排序键。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChromosomeInterval {
    pub chromosome: String,
    pub start: u64,
    pub stop: u64,
    pub strand: Strand,
}

impl ChromosomeInterval {
    pub fn new(chromosome: impl Into<String>, start: u64, stop: u64, strand: Strand) -> Result<Self> {
        let chromosome = chromosome.into();
        if start >= stop {
            return Err(GeneCheckError::OutOfRange(format!(
                "interval {}:{}-{} has start >= stop",
                chromosome, start, stop
            )));
        }
        Ok(Self { chromosome, start, stop, strand })
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.stop - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stop <= self.start
    }

    /// `other` 是否完全落在本区间内（不看链方向）。
    ///
    /// 跨染色体、仅部分重叠、首尾相接（`self.stop == other.start`）均返回 false。
    pub fn contains(&self, other: &ChromosomeInterval) -> bool {
        if self.chromosome != other.chromosome {
            return false;
        }
        // self  |----*
        // other       *----|
        if self.stop <= other.start {
            return false;
        }
        // self        *----|
        // other |----*
        if self.start >= other.stop {
            return false;
        }
        self.start <= other.start && self.stop >= other.stop
    }
}

impl fmt::Display for ChromosomeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}({})", self.chromosome, self.start, self.stop, self.strand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci(chrom: &str, start: u64, stop: u64) -> ChromosomeInterval {
        ChromosomeInterval::new(chrom, start, stop, Strand::Plus).unwrap()
    }

    #[test]
    fn contains_is_reflexive() {
        let a = ci("1", 10, 20);
        assert!(a.contains(&a));
        let b = ci("chrX", 0, 1);
        assert!(b.contains(&b));
    }

    #[test]
    fn contains_rejects_other_chromosome() {
        let a = ci("1", 0, 1000);
        let b = ci("2", 10, 20);
        assert!(!a.contains(&b));
    }

    #[test]
    fn contains_half_open_boundaries() {
        let a = ci("1", 10, 20);
        // touching on either side is not overlap
        assert!(!a.contains(&ci("1", 20, 25)));
        assert!(!a.contains(&ci("1", 5, 10)));
        // partial overlap is not containment
        assert!(!a.contains(&ci("1", 15, 21)));
        assert!(!a.contains(&ci("1", 9, 12)));
        // inner and flush intervals are contained
        assert!(a.contains(&ci("1", 10, 11)));
        assert!(a.contains(&ci("1", 19, 20)));
        assert!(a.contains(&ci("1", 12, 18)));
    }

    #[test]
    fn contains_ignores_strand() {
        let a = ci("1", 10, 20);
        let b = ChromosomeInterval::new("1", 12, 14, Strand::Unstranded).unwrap();
        assert!(a.contains(&b));
    }

    #[test]
    fn new_rejects_empty_interval() {
        assert!(matches!(
            ChromosomeInterval::new("1", 5, 5, Strand::Plus),
            Err(GeneCheckError::OutOfRange(_))
        ));
        assert!(ChromosomeInterval::new("1", 6, 5, Strand::Minus).is_err());
    }

    #[test]
    fn ordering_is_chrom_start_stop_strand() {
        let mut v = vec![
            ChromosomeInterval::new("2", 0, 5, Strand::Plus).unwrap(),
            ChromosomeInterval::new("1", 3, 9, Strand::Plus).unwrap(),
            ChromosomeInterval::new("1", 3, 9, Strand::Minus).unwrap(),
            ChromosomeInterval::new("1", 3, 8, Strand::Plus).unwrap(),
            ChromosomeInterval::new("1", 3, 9, Strand::Unstranded).unwrap(),
        ];
        v.sort();
        let got: Vec<String> = v.iter().map(ToString::to_string).collect();
        assert_eq!(
            got,
            vec!["1:3-8(+)", "1:3-9(.)", "1:3-9(-)", "1:3-9(+)", "2:0-5(+)"]
        );
    }
}
