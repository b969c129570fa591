use crate::codec::Backend;
use std::io;

/// Convenience alias for results returned by the stream adaptors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stream was asked to do something it can never do with its current configuration.
    Configuration,
    /// The codec rejected the data or stopped making progress; the codec state is not reusable.
    Codec,
    /// An operation needing the underlying stream ran while none was bound.
    Binding,
    /// The underlying stream failed.
    Transport,
}

/// Errors surfaced by [`CompressionOutputStream`](crate::CompressionOutputStream) and
/// [`DecompressionInputStream`](crate::DecompressionInputStream).
///
/// None of these are retried internally, a stream which returned an error other than a
/// configuration error is left partially drained and should be rebound before further use.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An item larger than the working buffer was requested.
    #[error("item of {item_size} bytes can never fit in a {capacity} byte buffer")]
    ItemTooLarge {
        /// Requested item size.
        item_size: usize,
        /// Capacity of the working buffer.
        capacity: usize,
    },

    /// The backend tag does not name a known backend.
    #[error("unknown compression backend {0}")]
    UnknownBackend(u32),

    /// The backend is known but was not compiled in.
    #[error("compression backend {0} is not available in this build")]
    BackendUnavailable(Backend),

    /// The backend was changed after the codec had already processed data.
    #[error("compression backend cannot change from {active} to {requested} once the stream is in use")]
    BackendLocked {
        /// Backend currently driving the stream.
        active: Backend,
        /// Backend that was asked for.
        requested: Backend,
    },

    /// The codec returned a failure status.
    #[error("{backend} codec failed")]
    Codec {
        /// Backend which failed.
        backend: Backend,
        /// Failure reported by the codec.
        #[source]
        source: io::Error,
    },

    /// More decompressed data was required than the compressed segment holds.
    #[error("compressed segment exhausted")]
    SegmentExhausted,

    /// A codec call consumed and produced nothing while work was pending.
    #[error("{backend} codec made no progress")]
    Stalled {
        /// Backend which stalled.
        backend: Backend,
    },

    /// No underlying stream is bound.
    #[error("no underlying stream")]
    Unbound,

    /// The underlying stream failed.
    #[error(transparent)]
    Transport(#[from] io::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ItemTooLarge { .. }
            | Self::UnknownBackend(_)
            | Self::BackendUnavailable(_)
            | Self::BackendLocked { .. } => ErrorKind::Configuration,
            Self::Codec { .. } | Self::SegmentExhausted | Self::Stalled { .. } => ErrorKind::Codec,
            Self::Unbound => ErrorKind::Binding,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Transport(error) => error,
            Error::ItemTooLarge { .. }
            | Error::UnknownBackend(_)
            | Error::BackendUnavailable(_)
            | Error::BackendLocked { .. } => io::Error::new(io::ErrorKind::InvalidInput, error),
            Error::Codec { .. } | Error::SegmentExhausted => {
                io::Error::new(io::ErrorKind::InvalidData, error)
            }
            Error::Unbound => io::Error::new(io::ErrorKind::NotConnected, error),
            Error::Stalled { .. } => io::Error::other(error),
        }
    }
}
