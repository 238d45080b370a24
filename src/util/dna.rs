use crate::error::{GeneCheckError, Result};

/// 碱基互补，保留大小写：A<->T, G<->C, N<->N, '-'<->'-'。
/// 字母表之外的字符返回 None。
#[inline]
pub fn complement(base: u8) -> Option<u8> {
    let c = match base {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'N' => b'N',
        b'a' => b't',
        b't' => b'a',
        b'g' => b'c',
        b'c' => b'g',
        b'n' => b'n',
        b'-' => b'-',
        _ => return None,
    };
    Some(c)
}

/// 反向互补。遇到无法识别的字符直接报错，不做替换。
///
/// `position` 为该字符在输入序列中的下标。
pub fn revcomp(seq: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(seq.len());
    for (i, &b) in seq.iter().enumerate().rev() {
        match complement(b) {
            Some(c) => out.push(c),
            None => {
                return Err(GeneCheckError::UnknownBase { base: b as char, position: i });
            }
        }
    }
    Ok(out)
}

pub fn revcomp_in_place(seq: &mut Vec<u8>) -> Result<()> {
    *seq = revcomp(seq)?;
    Ok(())
}
