use super::{MAX_WIDTH, MIN_WIDTH};

/// Current codeword width `W` and codebook capacity `L = 2^W`.
///
/// The encoder assigns a codeword one step before the decoder learns it, so the
/// two sides use different triggers: the encoder grows when its next code
/// reaches `L`, the decoder when its next table index reaches `L - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeWidth {
    bits: u32,
    capacity: u32,
}

impl CodeWidth {
    pub fn new() -> CodeWidth {
        CodeWidth {
            bits: MIN_WIDTH,
            capacity: 1 << MIN_WIDTH,
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn reset(&mut self) {
        *self = CodeWidth::new();
    }

    /// Returns true if the width grew.
    pub fn grow_on_encode(&mut self, next_code: u32) -> bool {
        if next_code == self.capacity {
            self.grow()
        } else {
            false
        }
    }

    /// Returns true if the width grew.
    pub fn grow_on_decode(&mut self, next_index: u32) -> bool {
        if next_index == self.capacity - 1 {
            self.grow()
        } else {
            false
        }
    }

    fn grow(&mut self) -> bool {
        if self.bits >= MAX_WIDTH {
            return false;
        }

        self.bits += 1;
        self.capacity = 1 << self.bits;
        true
    }
}

impl Default for CodeWidth {
    fn default() -> Self {
        CodeWidth::new()
    }
}


#[cfg(test)]
mod width_test {
    use super::*;

    #[test]
    fn initial_state() {
        let w = CodeWidth::new();
        assert_eq!(w.bits(), 9);
        assert_eq!(w.capacity(), 512);
    }

    #[test]
    fn encode_trigger() {
        let mut w = CodeWidth::new();

        assert!(!w.grow_on_encode(511));
        assert_eq!(w.bits(), 9);

        assert!(w.grow_on_encode(512));
        assert_eq!(w.bits(), 10);
        assert_eq!(w.capacity(), 1024);

        assert!(!w.grow_on_encode(512));
        assert_eq!(w.bits(), 10);
    }

    #[test]
    fn decode_trigger_one_behind() {
        let mut w = CodeWidth::new();

        assert!(!w.grow_on_decode(512));
        assert!(w.grow_on_decode(511));
        assert_eq!(w.bits(), 10);
        assert_eq!(w.capacity(), 1024);
    }

    #[test]
    fn stops_at_max_width() {
        let mut w = CodeWidth::new();
        let mut next = 257;

        while next <= 70000 {
            w.grow_on_encode(next);
            assert!(w.bits() >= 9 && w.bits() <= 16);
            assert_eq!(w.capacity(), 1 << w.bits());
            next += 1;
        }

        assert_eq!(w.bits(), 16);
        assert_eq!(w.capacity(), 65536);
        assert!(!w.grow_on_encode(65536));
        assert!(!w.grow_on_decode(65535));
        assert_eq!(w.bits(), 16);
    }

    #[test]
    fn reset_res() {
        let mut w = CodeWidth::new();
        w.grow_on_encode(512);
        w.grow_on_encode(1024);
        assert_eq!(w.bits(), 11);

        w.reset();
        assert_eq!(w, CodeWidth::new());
    }
}
