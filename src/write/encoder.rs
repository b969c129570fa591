use crate::{
    codec::{Backend, Compressor, Flush},
    util::{WorkingBuffer, DEFAULT_BUF_SIZE},
    BufWrite, Error, Level, Result,
};
use std::{cmp, io};

/// Compresses everything written to it into an underlying [`BufWrite`].
///
/// Written data collects in a fixed capacity working buffer. When an item does not fit the
/// buffered data is run through the compressor, without forcing it to emit everything, straight
/// into the buffer of the underlying writer. [`flush`](Self::flush) forces all buffered data out
/// with a sync flush, after which the receiving side can decode everything written so far while
/// the compressed stream stays open.
///
/// Dropping the stream makes one attempt at flushing, any error is discarded.
#[derive(Debug)]
pub struct CompressionOutputStream<W: BufWrite> {
    writer: Option<W>,
    encoder: Compressor,
    level: Level,
    buffer: WorkingBuffer,
    /// Bytes which have been handed to the compressor.
    offset: u64,
    /// The compressor has taken in data since the last sync flush.
    dirty: bool,
    /// The compressor has been called, the backend can no longer change.
    started: bool,
}

impl<W: BufWrite> CompressionOutputStream<W> {
    /// Creates a new stream which compresses into `writer`.
    ///
    /// A `buf_size` of `0` picks the default capacity of 16 KiB. The capacity is raised to what
    /// the compiled in backends prefer to work with.
    pub fn new(writer: W, backend: Backend, level: Level, buf_size: usize) -> Result<Self> {
        Self::build(Some(writer), backend, level, buf_size)
    }

    /// Creates a new stream without an underlying writer, bind one with
    /// [`set_underlying`](Self::set_underlying) before the buffer overruns.
    pub fn unbound(backend: Backend, level: Level, buf_size: usize) -> Result<Self> {
        Self::build(None, backend, level, buf_size)
    }

    fn build(writer: Option<W>, backend: Backend, level: Level, buf_size: usize) -> Result<Self> {
        let encoder = Compressor::new(backend, level)?;
        let buf_size = if buf_size == 0 {
            DEFAULT_BUF_SIZE
        } else {
            buf_size
        };

        Ok(Self {
            writer,
            encoder,
            level,
            buffer: WorkingBuffer::with_capacity(cmp::max(buf_size, Compressor::min_buffer_size())),
            offset: 0,
            dirty: false,
            started: false,
        })
    }

    /// The backend compressing this stream.
    pub fn backend(&self) -> Backend {
        self.encoder.backend()
    }

    /// Switch to another backend.
    ///
    /// Only possible before the compressor has seen any data, afterwards this fails with
    /// [`Error::BackendLocked`] unless `backend` is already the active one.
    pub fn set_backend(&mut self, backend: Backend) -> Result<()> {
        let active = self.backend();
        if backend == active {
            return Ok(());
        }
        if self.started {
            return Err(Error::BackendLocked {
                active,
                requested: backend,
            });
        }

        self.encoder = Compressor::new(backend, self.level)?;
        Ok(())
    }

    /// Switch to the backend named by a protocol tag, see [`Backend::from_tag`].
    pub fn set_backend_tag(&mut self, tag: u32) -> Result<()> {
        self.set_backend(Backend::from_tag(tag)?)
    }

    /// Capacity of the working buffer, the largest item [`check`](Self::check) accepts.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Total number of bytes written to this stream.
    pub fn length(&self) -> u64 {
        self.offset + self.buffer.filled_len() as u64
    }

    /// Binds a new underlying writer, returning the previous one.
    ///
    /// Buffered data is kept and will be compressed into the new writer.
    pub fn set_underlying(&mut self, writer: W) -> Option<W> {
        tracing::debug!(backend = %self.backend(), length = self.length(), "rebinding output");
        self.writer.replace(writer)
    }

    /// Unbinds the underlying writer without flushing.
    pub fn take_underlying(&mut self) -> Option<W> {
        self.writer.take()
    }

    /// Gets a reference to the underlying writer.
    pub fn get_ref(&self) -> Option<&W> {
        self.writer.as_ref()
    }

    /// Gets a mutable reference to the underlying writer.
    ///
    /// It is inadvisable to directly write to the underlying writer.
    pub fn get_mut(&mut self) -> Option<&mut W> {
        self.writer.as_mut()
    }

    /// Ensures at least `item_size` bytes of buffer space, compressing buffered data if needed.
    ///
    /// Returns how many of `n_items` items fit in the buffer now, at least one.
    pub fn check(&mut self, item_size: usize, n_items: usize) -> Result<usize> {
        if item_size == 0 {
            return Ok(n_items);
        }
        if self.buffer.unfilled_len() < item_size {
            self.overrun(item_size)?;
        }

        Ok(cmp::min(n_items, self.buffer.unfilled_len() / item_size))
    }

    /// Free buffer space, write into it and then [`advance`](Self::advance).
    pub fn spare_mut(&mut self) -> &mut [u8] {
        self.buffer.unfilled_mut()
    }

    /// Commits `amt` bytes written into [`spare_mut`](Self::spare_mut).
    ///
    /// # Panics
    ///
    /// If `amt` exceeds the free buffer space.
    pub fn advance(&mut self, amt: usize) {
        assert!(
            amt <= self.buffer.unfilled_len(),
            "advance called with amt exceeding free buffer space"
        );
        self.buffer.fill(amt);
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_item(&[value])
    }

    /// Writes a big-endian `u16`.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_item(&value.to_be_bytes())
    }

    /// Writes a big-endian `u32`.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_item(&value.to_be_bytes())
    }

    /// Writes all of `data`, which may be larger than the buffer.
    pub fn write_bytes(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            let len = self.check(1, data.len())?;
            self.buffer.unfilled_mut()[..len].copy_from_slice(&data[..len]);
            self.buffer.fill(len);
            data = &data[len..];
        }
        Ok(())
    }

    /// Writes `len` zero bytes.
    pub fn pad(&mut self, mut len: usize) -> Result<()> {
        while len > 0 {
            let n = self.check(1, len)?;
            self.buffer.unfilled_mut()[..n].fill(0);
            self.buffer.fill(n);
            len -= n;
        }
        Ok(())
    }

    /// Compresses all buffered data with a sync flush, so the receiver can decode everything
    /// written so far. The compressed stream is not ended.
    ///
    /// Does nothing if nothing was written since the last flush.
    pub fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() && !self.dirty {
            return Ok(());
        }

        let flushed = self.buffer.filled_len();
        self.run_encoder(Flush::Sync)?;
        self.buffer.clear();
        self.dirty = false;

        tracing::debug!(
            backend = %self.backend(),
            flushed,
            length = self.length(),
            "flushed compressed output"
        );
        Ok(())
    }

    fn write_item(&mut self, item: &[u8]) -> Result<()> {
        self.check(item.len(), 1)?;
        self.buffer.unfilled_mut()[..item.len()].copy_from_slice(item);
        self.buffer.fill(item.len());
        Ok(())
    }

    fn overrun(&mut self, item_size: usize) -> Result<()> {
        if item_size > self.buffer.capacity() {
            return Err(Error::ItemTooLarge {
                item_size,
                capacity: self.buffer.capacity(),
            });
        }

        while self.buffer.unfilled_len() < item_size {
            let consumed = self.run_encoder(Flush::None)?;
            self.reclaim(consumed)?;
        }

        Ok(())
    }

    /// Makes the space of data taken in by the compressor writable again.
    fn reclaim(&mut self, consumed: usize) -> Result<()> {
        if self.buffer.is_empty() {
            self.buffer.clear();
        } else if consumed == 0 {
            return Err(Error::Stalled {
                backend: self.backend(),
            });
        } else {
            // The compressor only stops early when the output is exhausted, so this should be
            // unreachable. Keep the remainder rather than growing the buffer.
            tracing::warn!(
                backend = %self.backend(),
                remaining = self.buffer.filled_len(),
                "compressor left input behind with output space to spare"
            );
            self.buffer.compact();
        }

        Ok(())
    }

    /// Runs the compressor over the buffered data, straight into the writer's buffer, until the
    /// compressor stops exhausting the space it is given. With [`Flush::Sync`] this also requires
    /// all buffered data to have been consumed.
    ///
    /// Returns how many buffered bytes were consumed.
    fn run_encoder(&mut self, flush: Flush) -> Result<usize> {
        let writer = self.writer.as_mut().ok_or(Error::Unbound)?;
        let mut consumed = 0;

        loop {
            let output = writer.partial_flush_buf()?;
            let progress = self.encoder.encode(self.buffer.filled(), output, flush)?;
            self.started = true;

            writer.produce(progress.produced);
            self.buffer.consume(progress.consumed);
            self.offset += progress.consumed as u64;
            self.dirty |= progress.consumed > 0;
            consumed += progress.consumed;

            if progress.drained && (flush == Flush::None || self.buffer.is_empty()) {
                return Ok(consumed);
            }
            progress.require(true, self.encoder.backend())?;
        }
    }
}

impl<W: BufWrite> io::Write for CompressionOutputStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let len = self.check(1, buf.len())?;
        self.buffer.unfilled_mut()[..len].copy_from_slice(&buf[..len]);
        self.buffer.fill(len);
        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        CompressionOutputStream::flush(self)?;
        match &mut self.writer {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl<W: BufWrite> Drop for CompressionOutputStream<W> {
    fn drop(&mut self) {
        if self.writer.is_none() {
            return;
        }
        if let Err(error) = self.flush() {
            tracing::debug!(%error, "discarding flush failure while dropping output stream");
        }
    }
}
