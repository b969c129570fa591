use crate::{
    codec::{Backend, Decompressor, Progress},
    util::{WorkingBuffer, DEFAULT_BUF_SIZE},
    Error, Result,
};
use std::{
    cmp,
    io::{self, BufRead},
};

/// Decompresses a bounded segment of an underlying [`BufRead`].
///
/// The stream is bound to a compressed segment of known length with
/// [`set_underlying`](Self::set_underlying). The decompressor is never fed more than that many
/// bytes, whatever follows in the underlying reader is left untouched, and [`reset`](Self::reset)
/// consumes whatever is left of the segment so the reader ends up exactly past it.
///
/// The decompression context lives as long as the stream, so consecutive segments continue one
/// compressed stream, matching a [`CompressionOutputStream`](crate::CompressionOutputStream)
/// which is flushed at each segment boundary.
#[derive(Debug)]
pub struct DecompressionInputStream<R> {
    reader: Option<R>,
    decoder: Decompressor,
    buffer: WorkingBuffer,
    /// Bytes read from this stream before the start of `buffer`.
    offset: u64,
    /// Compressed bytes left in the current segment.
    remaining: usize,
    /// The decompressor has been called, the backend can no longer change.
    started: bool,
}

impl<R: BufRead> DecompressionInputStream<R> {
    /// Creates a new unbound stream.
    ///
    /// A `buf_size` of `0` picks the default capacity of 16 KiB. The capacity is raised to what
    /// the compiled in backends prefer to work with.
    pub fn new(backend: Backend, buf_size: usize) -> Result<Self> {
        let decoder = Decompressor::new(backend)?;
        let buf_size = if buf_size == 0 {
            DEFAULT_BUF_SIZE
        } else {
            buf_size
        };

        Ok(Self {
            reader: None,
            decoder,
            buffer: WorkingBuffer::with_capacity(cmp::max(
                buf_size,
                Decompressor::min_buffer_size(),
            )),
            offset: 0,
            remaining: 0,
            started: false,
        })
    }

    /// The backend decompressing this stream.
    pub fn backend(&self) -> Backend {
        self.decoder.backend()
    }

    /// Switch to another backend.
    ///
    /// Only possible before the decompressor has seen any data, afterwards this fails with
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

        self.decoder = Decompressor::new(backend)?;
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

    /// Total number of decompressed bytes read from this stream.
    pub fn position(&self) -> u64 {
        self.offset + self.buffer.head() as u64
    }

    /// Compressed bytes of the current segment not yet fed to the decompressor.
    pub fn remaining_in_segment(&self) -> usize {
        self.remaining
    }

    /// Binds a compressed segment of `compressed_len` bytes read from `reader`, returning the
    /// previously bound reader.
    ///
    /// Buffered decompressed data is discarded.
    pub fn set_underlying(&mut self, reader: R, compressed_len: usize) -> Option<R> {
        self.offset += self.buffer.clear() as u64;
        self.remaining = compressed_len;
        tracing::debug!(backend = %self.backend(), compressed_len, "binding input segment");
        self.reader.replace(reader)
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> Option<&R> {
        self.reader.as_ref()
    }

    /// Gets a mutable reference to the underlying reader.
    ///
    /// It is inadvisable to directly read from the underlying reader.
    pub fn get_mut(&mut self) -> Option<&mut R> {
        self.reader.as_mut()
    }

    /// Discards buffered data, consumes the rest of the compressed segment and unbinds the
    /// underlying reader, which is returned.
    ///
    /// Afterwards the reader is positioned exactly at the end of the segment. The decompressed
    /// data of the consumed remainder is thrown away.
    pub fn reset(&mut self) -> Result<Option<R>> {
        self.offset += self.buffer.clear() as u64;
        if self.reader.is_none() {
            return Ok(None);
        }

        let drained = self.remaining;
        loop {
            let progress = self.decompress()?;
            self.buffer.clear();
            if self.remaining == 0 && progress.drained {
                break;
            }
        }

        tracing::debug!(backend = %self.backend(), drained, "reset input segment");
        Ok(self.reader.take())
    }

    /// Ensures at least `item_size` decompressed bytes are buffered, decompressing more of the
    /// segment if needed.
    ///
    /// Returns how many of `n_items` items are available now, at least one.
    pub fn check(&mut self, item_size: usize, n_items: usize) -> Result<usize> {
        if item_size == 0 {
            return Ok(n_items);
        }
        if self.buffer.filled_len() < item_size {
            self.overrun(item_size)?;
        }

        Ok(cmp::min(n_items, self.buffer.filled_len() / item_size))
    }

    /// Buffered decompressed data, use [`consume`](Self::consume) to mark it read.
    pub fn buffer(&self) -> &[u8] {
        self.buffer.filled()
    }

    /// Marks `amt` bytes of [`buffer`](Self::buffer) as read.
    ///
    /// # Panics
    ///
    /// If `amt` exceeds the buffered data.
    pub fn consume(&mut self, amt: usize) {
        assert!(
            amt <= self.buffer.filled_len(),
            "consume called with amt exceeding buffered data"
        );
        self.buffer.consume(amt);
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_item::<1>().map(|[value]| value)
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_item().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_item().map(u32::from_be_bytes)
    }

    /// Fills all of `data`, which may be larger than the buffer.
    pub fn read_bytes(&mut self, mut data: &mut [u8]) -> Result<()> {
        while !data.is_empty() {
            let len = self.check(1, data.len())?;
            data[..len].copy_from_slice(&self.buffer.filled()[..len]);
            self.buffer.consume(len);
            let rest = data;
            data = &mut rest[len..];
        }
        Ok(())
    }

    /// Reads and discards `len` bytes.
    pub fn skip(&mut self, mut len: usize) -> Result<()> {
        while len > 0 {
            let n = self.check(1, len)?;
            self.buffer.consume(n);
            len -= n;
        }
        Ok(())
    }

    fn read_item<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.check(N, 1)?;
        let mut item = [0; N];
        item.copy_from_slice(&self.buffer.filled()[..N]);
        self.buffer.consume(N);
        Ok(item)
    }

    fn overrun(&mut self, item_size: usize) -> Result<()> {
        if item_size > self.buffer.capacity() {
            return Err(Error::ItemTooLarge {
                item_size,
                capacity: self.buffer.capacity(),
            });
        }
        if self.reader.is_none() {
            return Err(Error::Unbound);
        }

        self.offset += self.buffer.compact() as u64;

        while self.buffer.filled_len() < item_size {
            let progress = self.decompress()?;
            if self.remaining == 0 && progress.is_stalled() {
                return Err(Error::SegmentExhausted);
            }
        }

        Ok(())
    }

    /// Calls the decompressor once, with as much of the segment as the reader has available.
    ///
    /// This won't necessarily produce any output, it may only consume input.
    fn decompress(&mut self) -> Result<Progress> {
        let reader = self.reader.as_mut().ok_or(Error::Unbound)?;

        let input = if self.remaining > 0 {
            let available = reader.fill_buf()?;
            if available.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "underlying stream ended inside a compressed segment",
                )
                .into());
            }
            &available[..cmp::min(available.len(), self.remaining)]
        } else {
            &[][..]
        };
        let has_input = !input.is_empty();

        let progress = self.decoder.decode(input, self.buffer.unfilled_mut())?;
        self.started = true;

        reader.consume(progress.consumed);
        self.remaining -= progress.consumed;
        self.buffer.fill(progress.produced);

        progress.require(has_input, self.decoder.backend())
    }
}

impl<R: BufRead> io::Read for DecompressionInputStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let len = cmp::min(available.len(), buf.len());
        buf[..len].copy_from_slice(&available[..len]);
        self.buffer.consume(len);
        Ok(len)
    }
}

impl<R: BufRead> BufRead for DecompressionInputStream<R> {
    /// Returns buffered data, decompressing more if the buffer is empty.
    ///
    /// An empty result means the segment is used up and the decompressor has nothing left to
    /// give.
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.buffer.is_empty() {
            if self.reader.is_none() {
                return Err(Error::Unbound.into());
            }

            self.offset += self.buffer.clear() as u64;
            loop {
                let progress = self.decompress()?;
                if !self.buffer.is_empty() || (self.remaining == 0 && progress.is_stalled()) {
                    break;
                }
            }
        }

        Ok(self.buffer.filled())
    }

    fn consume(&mut self, amt: usize) {
        DecompressionInputStream::consume(self, amt)
    }
}
