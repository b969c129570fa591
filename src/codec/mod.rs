use crate::{Error, Level, Result};
use std::{fmt, io};

mod zlib;
#[cfg(feature = "zstd")]
mod zstd;

use self::zlib::{ZlibDecoder, ZlibEncoder};
#[cfg(feature = "zstd")]
use self::zstd::{ZstdDecoder, ZstdEncoder};

/// Streaming codec used to transform the data of a stream.
///
/// The selection is not recorded in the compressed data, both ends of a connection have to agree
/// on it before any data is exchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    /// zlib framed deflate, sync flushed at every flush boundary.
    #[default]
    Zlib,
    /// Zstandard, flushed with `ZSTD_e_flush` at every flush boundary.
    Zstd,
}

impl Backend {
    /// Map the integer tag negotiated by a protocol onto a backend.
    ///
    /// `0` is [`Backend::Zlib`], `1` is [`Backend::Zstd`], anything else fails with
    /// [`Error::UnknownBackend`].
    pub fn from_tag(tag: u32) -> Result<Self> {
        match tag {
            0 => Ok(Self::Zlib),
            1 => Ok(Self::Zstd),
            tag => Err(Error::UnknownBackend(tag)),
        }
    }

    /// Integer tag of this backend, the inverse of [`Backend::from_tag`].
    pub fn tag(self) -> u32 {
        match self {
            Self::Zlib => 0,
            Self::Zstd => 1,
        }
    }

    /// Whether this backend was compiled in.
    pub fn is_available(self) -> bool {
        match self {
            Self::Zlib => true,
            Self::Zstd => cfg!(feature = "zstd"),
        }
    }
}

impl TryFrom<u32> for Backend {
    type Error = Error;

    fn try_from(tag: u32) -> Result<Self> {
        Self::from_tag(tag)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Zlib => "zlib",
            Self::Zstd => "zstd",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flush {
    /// Let the codec decide how much output to hold back.
    None,
    /// Emit everything taken in so far without ending the stream.
    Sync,
}

/// Outcome of a single codec call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Progress {
    pub(crate) consumed: usize,
    pub(crate) produced: usize,
    /// The codec holds no output it could have written for the requested flush mode, i.e. the
    /// output space was not exhausted.
    pub(crate) drained: bool,
}

impl Progress {
    pub(crate) fn is_stalled(&self) -> bool {
        self.consumed == 0 && self.produced == 0
    }

    /// Fails with [`Error::Stalled`] if the call did nothing although work was `pending`.
    pub(crate) fn require(self, pending: bool, backend: Backend) -> Result<Self> {
        if pending && self.is_stalled() {
            return Err(Error::Stalled { backend });
        }
        Ok(self)
    }
}

pub(crate) trait Encode {
    /// Compress some of `input` into `output`.
    fn encode(&mut self, input: &[u8], output: &mut [u8], flush: Flush) -> io::Result<Progress>;
}

pub(crate) trait Decode {
    /// Decompress some of `input` into `output`, flushing all output that is available.
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> io::Result<Progress>;
}

#[cfg(not(feature = "zstd"))]
fn unavailable<T>(backend: Backend) -> Result<T> {
    Err(Error::BackendUnavailable(backend))
}

/// Compression context of the selected backend.
#[derive(Debug)]
pub(crate) enum Compressor {
    Zlib(ZlibEncoder),
    #[cfg(feature = "zstd")]
    Zstd(ZstdEncoder),
}

impl Compressor {
    pub(crate) fn new(backend: Backend, level: Level) -> Result<Self> {
        match backend {
            Backend::Zlib => Ok(Self::Zlib(ZlibEncoder::new(level.into_flate2()))),
            #[cfg(feature = "zstd")]
            Backend::Zstd => ZstdEncoder::new(level.into_zstd())
                .map(Self::Zstd)
                .map_err(|source| Error::Codec { backend, source }),
            #[cfg(not(feature = "zstd"))]
            Backend::Zstd => unavailable(backend),
        }
    }

    /// Smallest working buffer which suits every compiled in backend.
    pub(crate) fn min_buffer_size() -> usize {
        #[cfg(feature = "zstd")]
        let size = ZstdEncoder::recommended_buffer_size();
        #[cfg(not(feature = "zstd"))]
        let size = 0;
        size
    }

    pub(crate) fn backend(&self) -> Backend {
        match self {
            Self::Zlib(_) => Backend::Zlib,
            #[cfg(feature = "zstd")]
            Self::Zstd(_) => Backend::Zstd,
        }
    }

    pub(crate) fn encode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: Flush,
    ) -> Result<Progress> {
        let backend = self.backend();
        let result = match self {
            Self::Zlib(encoder) => encoder.encode(input, output, flush),
            #[cfg(feature = "zstd")]
            Self::Zstd(encoder) => encoder.encode(input, output, flush),
        };

        let progress = result.map_err(|source| Error::Codec { backend, source })?;
        tracing::trace!(
            %backend,
            ?flush,
            consumed = progress.consumed,
            produced = progress.produced,
            "compress"
        );
        Ok(progress)
    }
}

/// Decompression context of the selected backend.
#[derive(Debug)]
pub(crate) enum Decompressor {
    Zlib(ZlibDecoder),
    #[cfg(feature = "zstd")]
    Zstd(ZstdDecoder),
}

impl Decompressor {
    pub(crate) fn new(backend: Backend) -> Result<Self> {
        match backend {
            Backend::Zlib => Ok(Self::Zlib(ZlibDecoder::new())),
            #[cfg(feature = "zstd")]
            Backend::Zstd => ZstdDecoder::new()
                .map(Self::Zstd)
                .map_err(|source| Error::Codec { backend, source }),
            #[cfg(not(feature = "zstd"))]
            Backend::Zstd => unavailable(backend),
        }
    }

    pub(crate) fn min_buffer_size() -> usize {
        #[cfg(feature = "zstd")]
        let size = ZstdDecoder::recommended_buffer_size();
        #[cfg(not(feature = "zstd"))]
        let size = 0;
        size
    }

    pub(crate) fn backend(&self) -> Backend {
        match self {
            Self::Zlib(_) => Backend::Zlib,
            #[cfg(feature = "zstd")]
            Self::Zstd(_) => Backend::Zstd,
        }
    }

    pub(crate) fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Progress> {
        let backend = self.backend();
        let result = match self {
            Self::Zlib(decoder) => decoder.decode(input, output),
            #[cfg(feature = "zstd")]
            Self::Zstd(decoder) => decoder.decode(input, output),
        };

        let progress = result.map_err(|source| Error::Codec { backend, source })?;
        tracing::trace!(
            %backend,
            consumed = progress.consumed,
            produced = progress.produced,
            "decompress"
        );
        Ok(progress)
    }
}
