//! 标准遗传密码表（三字母氨基酸名），只用于附带的翻译输出。

use hashbrown::HashMap;
use once_cell::sync::Lazy;

/// 无法识别的密码子（含歧义碱基或长度不足 3）
pub const UNKNOWN_AMINO_ACID: &str = "???";

static CODON_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &[&str])] = &[
        ("Met", &["ATG"]),
        ("Stop", &["TAA", "TAG", "TGA", "TAR", "TRA"]),
        ("Ala", &["GCT", "GCC", "GCA", "GCG", "GCN"]),
        ("Arg", &["CGT", "CGC", "CGA", "CGG", "AGA", "AGG", "CGN", "MGR", "AGR"]),
        ("Asn", &["AAT", "AAC", "AAY"]),
        ("Asp", &["GAT", "GAC", "GAY"]),
        ("Cys", &["TGT", "TGC", "TGY"]),
        ("Gln", &["CAA", "CAG", "CAR"]),
        ("Glu", &["GAA", "GAG", "GAR"]),
        ("Gly", &["GGT", "GGC", "GGA", "GGG", "GGN"]),
        ("His", &["CAT", "CAC", "CAY"]),
        ("Ile", &["ATT", "ATC", "ATA", "ATH"]),
        ("Leu", &["TTA", "TTG", "CTT", "CTC", "CTA", "CTG", "YTR", "CTN", "TTR"]),
        ("Lys", &["AAA", "AAG", "AAR"]),
        ("Phe", &["TTT", "TTC", "TTY"]),
        ("Pro", &["CCT", "CCC", "CCA", "CCG", "CCN"]),
        ("Ser", &["TCT", "TCC", "TCA", "TCG", "AGT", "AGC", "TCN", "AGY"]),
        ("Thr", &["ACT", "ACC", "ACA", "ACG", "ACN"]),
        ("Trp", &["TGG"]),
        ("Tyr", &["TAT", "TAC", "TAY"]),
        ("Val", &["GTT", "GTC", "GTA", "GTG", "GTN"]),
    ];
    let mut table = HashMap::new();
    for (aa, codons) in entries {
        for c in codons.iter() {
            table.insert(*c, *aa);
        }
    }
    table
});

/// 大小写不敏感；不认识的密码子返回 [`UNKNOWN_AMINO_ACID`] 而不是报错
pub fn codon_to_amino_acid(codon: &[u8]) -> &'static str {
    if codon.len() != 3 {
        return UNKNOWN_AMINO_ACID;
    }
    let upper = codon.to_ascii_uppercase();
    match std::str::from_utf8(&upper) {
        Ok(key) => CODON_TABLE.get(key).copied().unwrap_or(UNKNOWN_AMINO_ACID),
        Err(_) => UNKNOWN_AMINO_ACID,
    }
}

/// 按 3 个碱基一组切分，末尾不足 3 的部分单独成组
pub fn read_codons(seq: &[u8]) -> std::slice::Chunks<'_, u8> {
    seq.chunks(3)
}

pub fn translate_sequence(seq: &[u8]) -> String {
    let mut aa = String::with_capacity(seq.len());
    for codon in read_codons(seq) {
        aa.push_str(codon_to_amino_acid(codon));
    }
    aa
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codons() {
        assert_eq!(codon_to_amino_acid(b"ATG"), "Met");
        assert_eq!(codon_to_amino_acid(b"atg"), "Met");
        assert_eq!(codon_to_amino_acid(b"TGA"), "Stop");
        assert_eq!(codon_to_amino_acid(b"AAT"), "Asn");
        assert_eq!(codon_to_amino_acid(b"ATT"), "Ile");
        assert_eq!(codon_to_amino_acid(b"CAG"), "Gln");
        assert_eq!(codon_to_amino_acid(b"ggn"), "Gly");
    }

    #[test]
    fn ambiguous_codons_degrade() {
        assert_eq!(codon_to_amino_acid(b"NNN"), UNKNOWN_AMINO_ACID);
        assert_eq!(codon_to_amino_acid(b"AT"), UNKNOWN_AMINO_ACID);
        assert_eq!(codon_to_amino_acid(b"A-G"), UNKNOWN_AMINO_ACID);
    }

    #[test]
    fn translate_with_partial_tail() {
        assert_eq!(translate_sequence(b"ATGGCCTAA"), "MetAlaStop");
        assert_eq!(translate_sequence(b"ATGGC"), "Met???");
        assert_eq!(translate_sequence(b""), "");
    }

    #[test]
    fn codons_chunking() {
        let v: Vec<&[u8]> = read_codons(b"ACGTA").collect();
        assert_eq!(v, vec![&b"ACG"[..], &b"TA"[..]]);
    }
}
