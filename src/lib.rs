//! Buffered adaptors which sit between a protocol layer and a raw byte stream, compressing
//! outgoing data and decompressing incoming data on the fly.
//!
//! Two stream types are provided:
//!
//!  Type | Direction
//! ------|----------
//!  [`CompressionOutputStream`] | application → working buffer → compressor → [`BufWrite`]
//!  [`DecompressionInputStream`] | [`BufRead`](std::io::BufRead) → decompressor → working buffer → application
//!
//! Both own a fixed capacity working buffer and drive an opaque streaming codec over it. The
//! codec is picked at runtime from a closed set of [`Backend`]s; both ends of a connection must
//! agree on it out of band, nothing in the compressed stream identifies it.
//!
//! # Feature Organization
//!
//!  Feature | Does
//! ---------|------
//!  `zstd` (default) | Enables [`Backend::Zstd`]. Without it selecting that backend fails with [`Error::BackendUnavailable`].
//!
//! The zlib backend is always available.
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use zstream::{Backend, BufWriter, CompressionOutputStream, DecompressionInputStream, Level};
//!
//! # fn main() -> zstream::Result<()> {
//! let mut sink = BufWriter::new(Vec::new());
//!
//! let mut output = CompressionOutputStream::new(&mut sink, Backend::Zlib, Level::Default, 0)?;
//! output.write_bytes(b"hello hello hello hello")?;
//! output.flush()?;
//! drop(output);
//!
//! let compressed = sink.into_inner()?;
//!
//! let mut input = DecompressionInputStream::new(Backend::Zlib, 0)?;
//! input.set_underlying(&compressed[..], compressed.len());
//! let mut decompressed = vec![0; 23];
//! input.read_exact(&mut decompressed)?;
//! assert_eq!(decompressed, b"hello hello hello hello");
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_copy_implementations,
    missing_debug_implementations
)]

mod codec;
mod error;
mod unshared;
mod util;

pub mod read;
pub mod write;

pub use crate::{
    codec::Backend,
    error::{Error, ErrorKind, Result},
    read::DecompressionInputStream,
    write::{BufWrite, BufWriter, CompressionOutputStream},
};

/// Level of compression data should be compressed with.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Level {
    /// Fastest quality of compression, usually produces bigger size.
    Fastest,
    /// Best quality of compression, usually produces the smallest size.
    Best,
    /// Default quality of compression defined by the selected compression algorithm.
    #[default]
    Default,
    /// Precise quality based on the underlying compression algorithms'
    /// qualities. The interpretation of this depends on the algorithm chosen
    /// and the specific implementation backing it.
    /// Qualities are implicitly clamped to the algorithm's maximum.
    Precise(u32),
}

impl Level {
    fn into_flate2(self) -> flate2::Compression {
        match self {
            Self::Fastest => flate2::Compression::fast(),
            Self::Best => flate2::Compression::best(),
            Self::Precise(quality) => flate2::Compression::new(std::cmp::min(quality, 9)),
            Self::Default => flate2::Compression::default(),
        }
    }

    #[cfg(feature = "zstd")]
    fn into_zstd(self) -> i32 {
        match self {
            Self::Fastest => 1,
            Self::Best => 21,
            Self::Precise(quality) => std::cmp::min(quality, 21) as i32,
            Self::Default => 0,
        }
    }
}
