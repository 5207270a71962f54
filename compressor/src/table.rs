use super::{CompressorError, R};


/// Decode-side codebook, indexed by codeword.
///
/// Slots `0..256` hold the single bytes, slot 256 is the unused EOF slot and
/// new entries are appended from 257 on.
#[derive(Debug, Clone)]
pub struct Table {
    entries: Vec<Vec<u8>>,
}

impl Table {
    pub fn new() -> Table {
        let mut entries: Vec<Vec<u8>> = Vec::with_capacity(1 << super::MIN_WIDTH);

        for word in 0..R {
            entries.push(vec![word as u8]);
        }
        entries.push(Vec::new());

        Table { entries }
    }

    /// Index the next appended entry will get.
    pub fn next_index(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn get(&self, code: u32) -> Result<&[u8], CompressorError> {
        match self.entries.get(code as usize) {
            Some(entry) if code != R => Ok(entry),
            _ => Err(CompressorError::DecompressErrorWithCode {
                code,
                next: self.next_index(),
            }),
        }
    }

    pub fn push(&mut self, entry: Vec<u8>) {
        self.entries.push(entry);
    }

    /// Drops everything past the reserved slot.
    pub fn reset(&mut self) {
        self.entries.truncate(R as usize + 1);
    }
}

impl Default for Table {
    fn default() -> Self {
        Table::new()
    }
}
