//! Decompression of a bounded compressed segment read from a [`BufRead`](std::io::BufRead).

mod decoder;

pub use self::decoder::DecompressionInputStream;
