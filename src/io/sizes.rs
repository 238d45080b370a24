use hashbrown::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::error::Result;
use crate::io::lines::{parse_int, LineCursor};

/// chrom.sizes：每行 `name length`，多余的列忽略
pub fn read_chrom_sizes<R: BufRead>(reader: R, source: &str) -> Result<HashMap<String, u64>> {
    let mut cur = LineCursor::new(reader, source);
    let mut sizes = HashMap::new();
    while cur.advance()? {
        let tokens = cur.tokens();
        if tokens.len() < 2 {
            return Err(cur.schema_error("expected name and length"));
        }
        let len: u64 = parse_int(tokens[1], "length").map_err(|e| cur.schema_error(e))?;
        sizes.insert(tokens[0].to_string(), len);
    }
    Ok(sizes)
}

pub fn load_chrom_sizes(path: &Path) -> Result<HashMap<String, u64>> {
    let f = std::fs::File::open(path)?;
    read_chrom_sizes(std::io::BufReader::new(f), &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneCheckError;
    use std::io::Cursor;

    #[test]
    fn read_sizes() {
        let data = "chr1\t248956422\n\nchrM 16569\n";
        let sizes = read_chrom_sizes(Cursor::new(data), "sizes").unwrap();
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes["chr1"], 248956422);
        assert_eq!(sizes["chrM"], 16569);
    }

    #[test]
    fn bad_sizes() {
        assert!(matches!(
            read_chrom_sizes(Cursor::new("chr1\n"), "sizes"),
            Err(GeneCheckError::SchemaViolation { .. })
        ));
        assert!(matches!(
            read_chrom_sizes(Cursor::new("chr1 big\n"), "sizes"),
            Err(GeneCheckError::SchemaViolation { .. })
        ));
    }
}
