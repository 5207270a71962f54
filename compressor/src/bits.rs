//! MSB-first codeword packing on top of `bitstream_io`.
//! Widths are passed per call since they change over the stream.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use std::io::{self, Cursor};


pub struct CodeWriter {
    writer: BitWriter<Vec<u8>, BigEndian>,
}

impl CodeWriter {
    pub fn new() -> CodeWriter {
        CodeWriter {
            writer: BitWriter::endian(Vec::new(), BigEndian),
        }
    }

    pub fn write_tag(&mut self, tag: u8) -> io::Result<()> {
        self.writer.write(8, tag)
    }

    pub fn write_code(&mut self, code: u32, width: u32) -> io::Result<()> {
        self.writer.write(width, code)
    }

    /// Zero-pads the partial final byte and hands back the stream.
    pub fn finish(mut self) -> io::Result<Vec<u8>> {
        self.writer.byte_align()?;
        Ok(self.writer.into_writer())
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        CodeWriter::new()
    }
}


pub struct CodeReader<'a> {
    reader: BitReader<Cursor<&'a [u8]>, BigEndian>,
}

impl<'a> CodeReader<'a> {
    pub fn new(src: &'a [u8]) -> CodeReader<'a> {
        CodeReader {
            reader: BitReader::endian(Cursor::new(src), BigEndian),
        }
    }

    pub fn read_tag(&mut self) -> io::Result<u8> {
        self.reader.read::<u8>(8)
    }

    pub fn read_code(&mut self, width: u32) -> io::Result<u32> {
        self.reader.read::<u32>(width)
    }
}
