use super::bits::{CodeReader, CodeWriter};
use super::dict::Dictionary;
use super::ratio::RatioMonitor;
use super::table::Table;
use super::width::CodeWidth;
use super::{Compressor, CompressorError, Method, CODEBOOK_MAX, EOF, R};

use tracing::{debug, trace};


/// What happened to the codebook during one encode or decode run.
///
/// Indices count data codewords from the start of the stream (EOF excluded)
/// and name the first codeword the event applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub codewords: u64,
    pub resets: Vec<u64>,
    pub growths: Vec<(u64, u32)>,
    pub final_width: u32,
}

#[derive(Debug, Clone)]
pub struct LZW {
    method: Method,
}

impl LZW {
    pub fn new(method: Method) -> LZW {
        LZW { method }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn encode(&self, src: &[u8]) -> Result<(Vec<u8>, RunStats), CompressorError> {
        Encoder::new(self.method).run(src)
    }

    /// The codebook method is taken from the stream tag, not from `self`.
    pub fn decode(&self, src: &[u8]) -> Result<(Vec<u8>, RunStats), CompressorError> {
        let mut reader = CodeReader::new(src);
        let tag = reader.read_tag().map_err(|_| CompressorError::MissingTag)?;
        let method = Method::from_tag(tag)?;

        Decoder::new(method).run(&mut reader)
    }

    pub fn compress(&self, src: &[u8]) -> Result<Vec<u8>, CompressorError> {
        Compressor::compress(self, src)
    }

    pub fn decompress(&self, src: &[u8]) -> Result<Vec<u8>, CompressorError> {
        Compressor::decompress(self, src)
    }
}

impl Default for LZW {
    fn default() -> Self {
        LZW::new(Method::Fixed)
    }
}

impl Compressor for LZW {
    fn compress(&self, src: &[u8]) -> Result<Vec<u8>, CompressorError> {
        self.encode(src).map(|(bytes, _)| bytes)
    }

    fn decompress(&self, src: &[u8]) -> Result<Vec<u8>, CompressorError> {
        self.decode(src).map(|(bytes, _)| bytes)
    }
}


struct Encoder {
    method: Method,
    dict: Dictionary,
    width: CodeWidth,
    next_code: u32,
    monitor: RatioMonitor,
    stats: RunStats,
}

impl Encoder {
    fn new(method: Method) -> Encoder {
        Encoder {
            method,
            dict: Dictionary::new(),
            width: CodeWidth::new(),
            next_code: R + 1,
            monitor: RatioMonitor::new(),
            stats: RunStats::default(),
        }
    }

    fn run(mut self, src: &[u8]) -> Result<(Vec<u8>, RunStats), CompressorError> {
        let mut out = CodeWriter::new();
        out.write_tag(self.method.tag())?;

        let mut input = src;
        while let Some((code, len)) = self.dict.longest_prefix(input) {
            if self.method == Method::Fixed {
                self.grow();
            }

            debug_assert!(code < self.width.capacity());
            out.write_code(code, self.width.bits())?;
            self.stats.codewords += 1;

            if self.next_code < self.width.capacity() {
                if let Some(&symbol) = input.get(len) {
                    self.dict.insert(code, symbol, self.next_code);
                }
                // The last match claims a code too. The decoder's table
                // index trails ours by one only if every match advances it.
                self.next_code += 1;
            }

            match self.method {
                Method::Fixed => {}
                Method::Reset => {
                    if self.next_code == CODEBOOK_MAX {
                        self.reset(None);
                    }
                }
                Method::Monitor => {
                    if self.next_code == CODEBOOK_MAX {
                        if let Some(degradation) = self.monitor.record(len, self.width.bits()) {
                            self.reset(Some(degradation));
                        }
                    }
                }
            }

            if self.method != Method::Fixed {
                self.grow();
            }

            input = &input[len..];
        }

        if self.method == Method::Fixed {
            self.grow();
        }
        out.write_code(EOF, self.width.bits())?;

        self.stats.final_width = self.width.bits();
        debug!(
            method = %self.method,
            codewords = self.stats.codewords,
            resets = self.stats.resets.len(),
            "encoded"
        );

        Ok((out.finish()?, self.stats))
    }

    fn grow(&mut self) {
        if self.width.grow_on_encode(self.next_code) {
            trace!(codeword = self.stats.codewords, width = self.width.bits(), "codeword width grew");
            self.stats.growths.push((self.stats.codewords, self.width.bits()));
        }
    }

    fn reset(&mut self, degradation: Option<f64>) {
        debug!(method = %self.method, codeword = self.stats.codewords, ?degradation, "codebook reset");

        self.dict.clear();
        self.width.reset();
        self.next_code = R + 1;
        self.monitor.reset();
        self.stats.resets.push(self.stats.codewords);
    }
}


struct Decoder {
    method: Method,
    table: Table,
    width: CodeWidth,
    monitor: RatioMonitor,
    stats: RunStats,
}

impl Decoder {
    fn new(method: Method) -> Decoder {
        Decoder {
            method,
            table: Table::new(),
            width: CodeWidth::new(),
            monitor: RatioMonitor::new(),
            stats: RunStats::default(),
        }
    }

    fn run(mut self, reader: &mut CodeReader) -> Result<(Vec<u8>, RunStats), CompressorError> {
        let mut result: Vec<u8> = Vec::new();

        let mut var = match self.read_first(reader)? {
            Some(entry) => entry,
            None => return Ok(self.finish(result)),
        };

        loop {
            if self.method == Method::Fixed {
                self.grow();
            }

            result.extend_from_slice(&var);

            let code = reader.read_code(self.width.bits())?;
            if code == EOF {
                break;
            }
            self.stats.codewords += 1;

            let next = self.table.next_index();
            let entry = if code == next {
                let mut entry = var.clone();
                entry.push(var[0]);
                entry
            } else {
                self.table.get(code)?.to_vec()
            };

            let prev = std::mem::replace(&mut var, entry);
            if next < self.width.capacity() {
                let mut new_entry = prev;
                new_entry.push(var[0]);
                self.table.push(new_entry);
            }

            let full = self.table.next_index() >= CODEBOOK_MAX - 1;
            let restart = match self.method {
                Method::Fixed => None,
                Method::Reset => full.then_some(None),
                Method::Monitor if full => self
                    .monitor
                    .record(var.len(), self.width.bits())
                    .map(Some),
                Method::Monitor => None,
            };

            if let Some(degradation) = restart {
                self.reset(degradation);
                result.extend_from_slice(&var);

                var = match self.read_first(reader)? {
                    Some(entry) => entry,
                    None => return Ok(self.finish(result)),
                };
            }

            if self.method != Method::Fixed {
                self.grow();
            }
        }

        Ok(self.finish(result))
    }

    /// Reads the opening codeword of a stream or of a fresh codebook.
    fn read_first(&mut self, reader: &mut CodeReader) -> Result<Option<Vec<u8>>, CompressorError> {
        let code = reader.read_code(self.width.bits())?;
        if code == EOF {
            return Ok(None);
        }

        self.stats.codewords += 1;
        Ok(Some(self.table.get(code)?.to_vec()))
    }

    fn grow(&mut self) {
        if self.width.grow_on_decode(self.table.next_index()) {
            trace!(codeword = self.stats.codewords, width = self.width.bits(), "codeword width grew");
            self.stats.growths.push((self.stats.codewords, self.width.bits()));
        }
    }

    fn reset(&mut self, degradation: Option<f64>) {
        debug!(method = %self.method, codeword = self.stats.codewords, ?degradation, "codebook reset");

        self.table.reset();
        self.width.reset();
        self.monitor.reset();
        self.stats.resets.push(self.stats.codewords);
    }

    fn finish(mut self, result: Vec<u8>) -> (Vec<u8>, RunStats) {
        self.stats.final_width = self.width.bits();
        debug!(
            method = %self.method,
            codewords = self.stats.codewords,
            resets = self.stats.resets.len(),
            "decoded"
        );

        (result, self.stats)
    }
}


#[cfg(test)]
mod lzw_test {
    use super::*;

    const METHODS: [Method; 3] = [Method::Fixed, Method::Reset, Method::Monitor];

    #[test]
    fn compress_res() {
        for method in METHODS {
            let lzw = LZW::new(method);
            let compressed = lzw.compress(b"AAA").unwrap();

            // 65@9, 257@9, EOF@9, zero padded
            let expected = vec![method.tag(), 0x20, 0xc0, 0x60, 0x00];
            assert_eq!(compressed, expected);
        }
    }

    #[test]
    fn compress_empty() {
        for method in METHODS {
            let lzw = LZW::new(method);
            let (compressed, stats) = lzw.encode(&[]).unwrap();

            assert_eq!(compressed, vec![method.tag(), 0x80, 0x00]);
            assert_eq!(stats.codewords, 0);
            assert_eq!(stats.final_width, 9);

            assert_eq!(lzw.decompress(&compressed).unwrap(), Vec::<u8>::new());
        }
    }

    #[test]
    fn decompress_res() {
        let lzw = LZW::default();

        let uncompressed = lzw.decompress(&[b'n', 0x20, 0xc0, 0x60, 0x00]).unwrap();
        assert_eq!(uncompressed, b"AAA".to_vec());

        let uncompressed = lzw.decompress(&[b'm', 0x20, 0xc0, 0x60, 0x00]).unwrap();
        assert_eq!(uncompressed, b"AAA".to_vec());
    }

    #[test]
    fn decompress_errors() {
        let lzw = LZW::default();

        let r = lzw.decompress(&[]);
        assert!(matches!(r, Err(CompressorError::MissingTag)));

        let r = lzw.decompress(&[b'x', 0x80, 0x00]);
        assert!(matches!(r, Err(CompressorError::UnknownMethodTag(b'x'))));

        let r = lzw.decompress(&[b'n']);
        assert!(matches!(r, Err(CompressorError::Io(_))));

        // 300@9 before anything was defined
        let r = lzw.decompress(&[b'n', 0x96, 0x00]);
        assert!(matches!(r, Err(CompressorError::DecompressErrorWithCode { code: 300, next: 257 })));

        // stream ends without EOF: 65@9 then nothing
        let r = lzw.decompress(&[b'r', 0x20, 0x80]);
        assert!(matches!(r, Err(CompressorError::Io(_))));
    }

    #[test]
    fn round_trip_text() {
        let text = b"TOBEORNOTTOBEORTOBEORNOT#TOBEORNOTTOBEORTOBEORNOT".to_vec();

        for method in METHODS {
            let lzw = LZW::new(method);
            let compressed = lzw.compress(&text).unwrap();

            assert_eq!(compressed[0], method.tag());
            assert_eq!(lzw.decompress(&compressed).unwrap(), text);
        }
    }

    #[test]
    fn growth_on_eof_codeword() {
        // 255 single byte matches put EOF right on the 9 -> 10 bit boundary
        let uncompressed: Vec<u8> = (0..=254u8).collect();

        for method in METHODS {
            let lzw = LZW::new(method);
            let (compressed, enc_stats) = lzw.encode(&uncompressed).unwrap();

            assert_eq!(enc_stats.codewords, 255);
            assert_eq!(enc_stats.growths, vec![(255, 10)]);
            assert_eq!(enc_stats.final_width, 10);
            assert_eq!(compressed.len(), 1 + (255 * 9 + 10 + 7) / 8);

            let (decompressed, dec_stats) = lzw.decode(&compressed).unwrap();
            assert_eq!(decompressed, uncompressed);
            assert_eq!(dec_stats, enc_stats);
        }
    }

    #[test]
    fn growth_mid_stream() {
        let uncompressed: Vec<u8> = (0..=255u8).chain(0..=255u8).collect();

        for method in METHODS {
            let lzw = LZW::new(method);
            let (compressed, enc_stats) = lzw.encode(&uncompressed).unwrap();

            assert_eq!(enc_stats.growths.first(), Some(&(255, 10)));

            let (decompressed, dec_stats) = lzw.decode(&compressed).unwrap();
            assert_eq!(decompressed, uncompressed);
            assert_eq!(dec_stats, enc_stats);
        }
    }

    #[test]
    fn decode_uses_stream_tag() {
        let compressed = LZW::new(Method::Reset).compress(b"abracadabra").unwrap();

        let uncompressed = LZW::new(Method::Monitor).decompress(&compressed).unwrap();
        assert_eq!(uncompressed, b"abracadabra".to_vec());
    }
}
