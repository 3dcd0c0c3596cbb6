//! In-memory database builder used by tests and benchmarks.
//!
//! Not part of the stable API.

use super::format::*;

/// Assembles a database image from sorted range records.
pub struct DatBuilder {
    version: [u8; VERSION_SIZE],
    records: Vec<([u8; 4], [u8; 4], i32)>,
    overrides: Vec<(u8, i32)>,
    aux: Vec<u8>,
}

impl Default for DatBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatBuilder {
    pub fn new() -> Self {
        Self {
            version: *b"20240101",
            records: Vec::new(),
            overrides: Vec::new(),
            aux: Vec::new(),
        }
    }

    pub fn version(mut self, version: [u8; VERSION_SIZE]) -> Self {
        self.version = version;
        self
    }

    /// Append a record; callers add them in ascending start order.
    pub fn range(mut self, start: [u8; 4], end: [u8; 4], code: i32) -> Self {
        self.records.push((start, end, code));
        self
    }

    /// Force an index entry instead of the computed one.
    pub fn index(mut self, octet: u8, value: i32) -> Self {
        self.overrides.push((octet, value));
        self
    }

    pub fn aux(mut self, aux: &[u8]) -> Self {
        self.aux.extend_from_slice(aux);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut index = [EMPTY_BUCKET; INDEX_ENTRIES];
        for (pos, (start, _, _)) in self.records.iter().enumerate() {
            let slot = &mut index[start[0] as usize];
            if *slot == EMPTY_BUCKET {
                *slot = pos as i32;
            }
        }
        for &(octet, value) in &self.overrides {
            index[octet as usize] = value;
        }

        let mut data = Vec::with_capacity(HEADER_SIZE + self.records.len() * RECORD_SIZE);
        data.extend_from_slice(&self.version);
        for entry in index {
            data.extend_from_slice(&entry.to_le_bytes());
        }
        for (start, end, code) in &self.records {
            data.extend_from_slice(start);
            data.extend_from_slice(end);
            data.extend_from_slice(&code.to_le_bytes());
            data.extend_from_slice(&[0u8; RECORD_SIZE - 12]);
        }
        data.extend_from_slice(&self.aux);
        data
    }
}
