//! Reference implementations driven through the codec crates' own stream adaptors, used to check
//! the adaptors under test against something independent.

pub mod zlib {
    use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
    use std::io::{Read, Write};

    /// Compresses `input` and sync flushes, leaving the stream open.
    pub fn compress(input: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(input).unwrap();
        encoder.flush().unwrap();
        std::mem::take(encoder.get_mut())
    }

    /// Decompresses exactly `len` bytes from an open stream.
    pub fn decompress(input: &[u8], len: usize) -> Vec<u8> {
        let mut output = vec![0; len];
        ZlibDecoder::new(input).read_exact(&mut output).unwrap();
        output
    }
}

#[cfg(feature = "zstd")]
pub mod zstd {
    use libzstd::stream::{read::Decoder, write::Encoder};
    use std::io::{Read, Write};

    /// Compresses `input` and flushes, leaving the frame open.
    pub fn compress(input: &[u8]) -> Vec<u8> {
        let mut encoder = Encoder::new(Vec::new(), 1).unwrap();
        encoder.write_all(input).unwrap();
        encoder.flush().unwrap();
        std::mem::take(encoder.get_mut())
    }

    /// Decompresses exactly `len` bytes from an open frame.
    pub fn decompress(input: &[u8], len: usize) -> Vec<u8> {
        let mut output = vec![0; len];
        Decoder::new(input)
            .unwrap()
            .read_exact(&mut output)
            .unwrap();
        output
    }
}
