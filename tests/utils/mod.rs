#![allow(dead_code, unused_imports, unused_macros)] // Different tests use a different subset of functions

mod input_stream;
mod track;

pub mod algos;

pub use self::{
    input_stream::InputStream,
    track::{Limited, TrackWrites},
};
pub use std::iter::FromIterator;
pub use zstream::{
    Backend, BufWriter, CompressionOutputStream, DecompressionInputStream, Error, ErrorKind, Level,
};

use std::io::Read;

/// Compresses every chunk of `input` through a [`CompressionOutputStream`], sync flushing once at
/// the end.
pub fn compress(backend: Backend, input: &InputStream, buf_size: usize) -> Vec<u8> {
    let mut sink = BufWriter::new(Vec::new());
    let mut stream = CompressionOutputStream::new(&mut sink, backend, Level::Fastest, buf_size)
        .expect("output stream");

    for chunk in input.as_ref() {
        stream.write_bytes(chunk).expect("write chunk");
    }
    stream.flush().expect("flush");
    assert_eq!(stream.length(), input.len() as u64);
    drop(stream);

    sink.into_inner().expect("flush sink")
}

/// Decompresses a whole segment through a [`DecompressionInputStream`].
pub fn decompress(backend: Backend, compressed: &[u8]) -> Vec<u8> {
    let mut stream = DecompressionInputStream::new(backend, 0).expect("input stream");
    stream.set_underlying(compressed, compressed.len());

    let mut output = Vec::new();
    stream.read_to_end(&mut output).expect("read segment");
    assert_eq!(stream.remaining_in_segment(), 0);
    output
}

/// Random bytes, incompressible enough to push the codecs through many buffer cycles.
pub fn random_bytes(len: usize) -> Vec<u8> {
    Vec::from_iter((0..len).map(|_| rand::random::<u8>()))
}

/// The same line of text over and over.
pub fn repeating_text(len: usize) -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}
