//! Encode-side codebook: a prefix tree over byte strings.
//!
//! Single bytes are the implicit roots (codeword = byte value). Every other
//! entry is stored as an edge `(prefix codeword, next byte) -> codeword`.

use super::R;

use std::collections::HashMap;


#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    edges: HashMap<(u32, u8), u32>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            edges: HashMap::new(),
        }
    }

    /// Longest stored key that prefixes `input`, as `(codeword, key length)`.
    /// Only `None` for empty input since every single byte is stored.
    pub fn longest_prefix(&self, input: &[u8]) -> Option<(u32, usize)> {
        let (&first, rest) = input.split_first()?;

        let mut code = first as u32;
        let mut len = 1;

        for &symbol in rest {
            match self.edges.get(&(code, symbol)) {
                Some(&next) => {
                    code = next;
                    len += 1;
                }
                None => break,
            }
        }

        Some((code, len))
    }

    pub fn get(&self, key: &[u8]) -> Option<u32> {
        let (&first, rest) = key.split_first()?;

        rest.iter().try_fold(first as u32, |code, &symbol| {
            self.edges.get(&(code, symbol)).copied()
        })
    }

    /// Stores the key `prefix + symbol` under `code`. Returns false if that
    /// key is already present.
    pub fn insert(&mut self, prefix: u32, symbol: u8, code: u32) -> bool {
        debug_assert!(code > R, "codeword {code} collides with a base entry or EOF");

        if self.edges.contains_key(&(prefix, symbol)) {
            return false;
        }

        self.edges.insert((prefix, symbol), code);
        true
    }

    /// Drops every entry except the single bytes.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn len(&self) -> usize {
        R as usize + self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
