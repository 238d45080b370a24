//! 标签修正：把上游输出中被 `/` 拆开的两段标签重新合并。
//!
//! 只针对两种已知的格式问题，属于字符串形状上的启发式规则，
//! 默认不启用（见 [`JoinOptions::normalize_labels`](super::JoinOptions)）。

use crate::model::TranscriptAnnotation;

const SPLICE_SUFFIX: &str = "Splice";
const ORF_STOP: &str = "orfStop";
const STOP_CODONS: [&str; 3] = ["TAA", "TAG", "TGA"];

/// `["unknownUtrSplice", "CC..AC", ...]` -> `["unknownUtrSplice_CC..AC", ...]`
/// `["orfStop", "TAG", ...]`             -> `["orfStop_TAG", ...]`
///
/// 返回是否发生了合并。
pub fn normalize_annotation(annotation: &mut TranscriptAnnotation) -> bool {
    let labels = &annotation.labels;
    let (first, second) = match (labels.get(0), labels.get(1)) {
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };
    let splice = first.ends_with(SPLICE_SUFFIX) && second.split('.').count() == 3;
    let orf_stop = first == ORF_STOP && STOP_CODONS.contains(&second);
    if !(splice || orf_stop) {
        return false;
    }
    let merged = format!("{}_{}", first, second);
    annotation.labels.merge_first_two(merged);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChromosomeInterval, Strand};

    fn ann(composite: &str) -> TranscriptAnnotation {
        let iv = ChromosomeInterval::new("1", 0, 2, Strand::Unstranded).unwrap();
        TranscriptAnnotation::from_composite_label(iv, composite)
    }

    fn labels(a: &TranscriptAnnotation) -> Vec<&str> {
        a.labels.iter().collect()
    }

    #[test]
    fn merges_splice_motif() {
        let mut a = ann("unknownUtrSplice/CC..AC/other/tx");
        assert!(normalize_annotation(&mut a));
        assert_eq!(labels(&a), vec!["unknownUtrSplice_CC..AC", "other"]);
        assert_eq!(a.name, "tx");
    }

    #[test]
    fn merges_orf_stop_codon() {
        let mut a = ann("orfStop/TAG/tx");
        assert!(normalize_annotation(&mut a));
        assert_eq!(labels(&a), vec!["orfStop_TAG"]);
    }

    #[test]
    fn merged_label_stays_unique() {
        let mut a = ann("orfStop/TAG/orfStop_TAG/tx");
        assert!(normalize_annotation(&mut a));
        assert_eq!(labels(&a), vec!["orfStop_TAG"]);

        let mut b = ann("cdsSplice/GT.AG.x/noStop/cdsSplice_GT.AG.x/tx");
        assert!(normalize_annotation(&mut b));
        assert_eq!(labels(&b), vec!["cdsSplice_GT.AG.x", "noStop"]);
    }

    #[test]
    fn leaves_other_labels_alone() {
        for composite in ["noStop/tx", "orfStop/TAC/tx", "badSplice/GT.AG/tx", "cdsSplice/tx", "tx"] {
            let mut a = ann(composite);
            let before = a.clone();
            assert!(!normalize_annotation(&mut a), "{}", composite);
            assert_eq!(a, before);
        }
    }
}
