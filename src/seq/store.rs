use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::path::Path;

use crate::error::{GeneCheckError, Result};
use crate::io::fasta::FastaReader;
use crate::model::interval::Strand;
use crate::util::dna;

/// 单条染色体/scaffold 的正链序列。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    name: String,
    bases: Vec<u8>,
    length: u64,
}

impl Sequence {
    pub fn new(name: impl Into<String>, bases: Vec<u8>) -> Self {
        let length = bases.len() as u64;
        Self { name: name.into(), bases, length }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// 幂等
    pub fn uppercase(&mut self) {
        self.bases.make_ascii_uppercase();
    }

    /// 取 `[start, stop)`，坐标始终以正链给出。
    ///
    /// 负链返回镜像坐标 `[len - stop, len - start)` 上子串的反向互补，
    /// 即把序列整体反向互补后再取 `[start, stop)`：
    ///
    /// ```text
    /// 0 1 2 3 4 5 6 7 8 9  +
    /// 9 8 7 6 5 4 3 2 1 0  -
    ///   |-----|            [1, 5) on - == [5, 9) on +
    /// ```
    pub fn slice(&self, start: u64, stop: u64, strand: Strand) -> Result<Vec<u8>> {
        if start >= stop {
            return Err(GeneCheckError::OutOfRange(format!(
                "slice {}:{}-{} has start >= stop",
                self.name, start, stop
            )));
        }
        if stop > self.length {
            return Err(GeneCheckError::OutOfRange(format!(
                "slice {}:{}-{} exceeds sequence length {}",
                self.name, start, stop, self.length
            )));
        }
        match strand {
            Strand::Plus | Strand::Unstranded => {
                Ok(self.bases[start as usize..stop as usize].to_vec())
            }
            Strand::Minus => {
                let a = self.length - stop;
                let b = a + (stop - start);
                dna::revcomp(&self.bases[a as usize..b as usize])
            }
        }
    }
}

/// 缓存文件的构建信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreMeta {
    pub source_file: Option<String>,
    pub build_timestamp: Option<String>,
}

/// 整个基因组常驻内存，按名称查找。
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SequenceStore {
    sequences: HashMap<String, Sequence>,
    /// FASTA 中的出现顺序
    order: Vec<String>,
    pub meta: StoreMeta,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, seq: Sequence) {
        let name = seq.name().to_string();
        if self.sequences.insert(name.clone(), seq).is_some() {
            log::warn!("duplicate sequence name {}; keeping the last record", name);
        } else {
            self.order.push(name);
        }
    }

    pub fn from_reader<R: BufRead>(reader: R, upper: bool) -> Result<Self> {
        let mut store = Self::new();
        for rec in FastaReader::new(reader) {
            let rec = rec?;
            let mut seq = Sequence::new(rec.id, rec.seq);
            if upper {
                seq.uppercase();
            }
            store.insert(seq);
        }
        Ok(store)
    }

    pub fn from_fasta(path: &Path, upper: bool) -> Result<Self> {
        let fh = std::fs::File::open(path)?;
        let mut store = Self::from_reader(std::io::BufReader::new(fh), upper)?;
        store.meta = StoreMeta {
            source_file: Some(path.display().to_string()),
            build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
        };
        log::info!("loaded {} sequences from {}", store.len(), path.display());
        Ok(store)
    }

    /// `.seq` 按二进制缓存读取，其余按 FASTA 读取
    pub fn load(path: &Path, upper: bool) -> Result<Self> {
        if path.extension().is_some_and(|e| e == "seq") {
            let mut store = Self::load_from_file(path)?;
            if upper {
                store.uppercase();
            }
            Ok(store)
        } else {
            Self::from_fasta(path, upper)
        }
    }

    pub fn get(&self, name: &str) -> Option<&Sequence> {
        self.sequences.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn uppercase(&mut self) {
        for seq in self.sequences.values_mut() {
            seq.uppercase();
        }
    }

    pub fn chrom_sizes(&self) -> HashMap<String, u64> {
        self.sequences
            .iter()
            .map(|(k, v)| (k.clone(), v.len()))
            .collect()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let f = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let store: Self = bincode::deserialize_from(std::io::BufReader::new(f))?;
        Ok(store)
    }
}

/// FASTA 路径 -> 名称到序列的映射
pub fn load_sequences(path: &Path, upper: bool) -> Result<HashMap<String, Sequence>> {
    Ok(SequenceStore::from_fasta(path, upper)?.sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn seq() -> Sequence {
        Sequence::new("chr1", b"ACGTACGTAC".to_vec())
    }

    #[test]
    fn plus_slice_is_raw_substring() {
        let s = seq();
        assert_eq!(s.slice(0, 3, Strand::Plus).unwrap(), b"ACG");
        assert_eq!(s.slice(7, 10, Strand::Unstranded).unwrap(), b"TAC");
    }

    #[test]
    fn minus_slice_uses_mirrored_coordinates() {
        let s = seq();
        let minus = s.slice(1, 5, Strand::Minus).unwrap();
        let plus = s.slice(5, 9, Strand::Plus).unwrap();
        assert_eq!(minus, dna::revcomp(&plus).unwrap());
        assert_eq!(minus, b"TACG");

        // same as slicing the reverse complement of the whole sequence
        let rc = dna::revcomp(s.bases()).unwrap();
        for (a, b) in [(0u64, 6u64), (3, 9), (0, 10)] {
            assert_eq!(s.slice(a, b, Strand::Minus).unwrap(), &rc[a as usize..b as usize]);
        }
    }

    #[test]
    fn slice_out_of_range() {
        let s = seq();
        assert!(matches!(s.slice(5, 11, Strand::Plus), Err(GeneCheckError::OutOfRange(_))));
        assert!(matches!(s.slice(5, 11, Strand::Minus), Err(GeneCheckError::OutOfRange(_))));
        assert!(matches!(s.slice(4, 4, Strand::Plus), Err(GeneCheckError::OutOfRange(_))));
    }

    #[test]
    fn uppercase_is_idempotent() {
        let mut s = Sequence::new("x", b"acGTn-".to_vec());
        s.uppercase();
        assert_eq!(s.bases(), b"ACGTN-");
        s.uppercase();
        assert_eq!(s.bases(), b"ACGTN-");
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn store_from_reader_keeps_case_unless_upper() {
        let data = b">chr1 desc\nacGT\n>chr2\nNNNN\nAA\n";
        let store = SequenceStore::from_reader(Cursor::new(&data[..]), false).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("chr1").unwrap().bases(), b"acGT");
        assert_eq!(store.get("chr2").unwrap().len(), 6);
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["chr1", "chr2"]);

        let upper = SequenceStore::from_reader(Cursor::new(&data[..]), true).unwrap();
        assert_eq!(upper.get("chr1").unwrap().bases(), b"ACGT");
    }

    #[test]
    fn cache_round_trip() {
        let data = b">chr1\nACGTACGTAC\n";
        let store = SequenceStore::from_reader(Cursor::new(&data[..]), false).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genome.seq");
        store.save_to_file(&path).unwrap();

        let loaded = SequenceStore::load(&path, false).unwrap();
        assert_eq!(loaded.get("chr1"), store.get("chr1"));
        assert_eq!(loaded.chrom_sizes().get("chr1"), Some(&10));
    }
}
