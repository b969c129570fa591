// Originally sourced from `std::io::BufWriter`, changed to expose its buffer through `BufWrite` so
// compressed output can be produced directly into it.

use super::BufWrite;
use std::{
    fmt,
    io::{self, Write},
};

const DEFAULT_BUF_SIZE: usize = 8192;

/// Wraps a writer and buffers its output, exposing the buffer through [`BufWrite`].
///
/// Unlike [`std::io::BufWriter`] dropping this does not flush, call [`Write::flush`] or
/// [`BufWriter::into_inner`] to make sure everything reaches the inner writer.
pub struct BufWriter<W> {
    writer: W,
    buf: Box<[u8]>,
    written: usize,
    buffered: usize,
}

impl<W: fmt::Debug> fmt::Debug for BufWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufWriter")
            .field("writer", &self.writer)
            .field(
                "buffer",
                &format_args!("{}/{}", self.buffered, self.buf.len()),
            )
            .field("written", &self.written)
            .finish()
    }
}

impl<W: Write> BufWriter<W> {
    /// Creates a new `BufWriter` with a default buffer capacity. The default is currently 8 KB,
    /// but may change in the future.
    pub fn new(writer: W) -> Self {
        Self::with_capacity(DEFAULT_BUF_SIZE, writer)
    }

    /// Creates a new `BufWriter` with the specified buffer capacity.
    ///
    /// # Panics
    ///
    /// If `cap` is zero, the buffer could never accept any data.
    pub fn with_capacity(cap: usize, writer: W) -> Self {
        assert!(cap > 0, "BufWriter capacity must be non-zero");
        Self {
            writer,
            buf: vec![0; cap].into(),
            written: 0,
            buffered: 0,
        }
    }

    /// Gets a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Gets a mutable reference to the underlying writer.
    ///
    /// It is inadvisable to directly write to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Returns the data buffered but not yet written to the underlying writer.
    pub fn buffer(&self) -> &[u8] {
        &self.buf[self.written..self.buffered]
    }

    /// Flushes the buffer and returns the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush_buf()?;
        Ok(self.writer)
    }

    /// Remove the already written data
    fn reshuffle_and_remove_written(&mut self) {
        self.buf.copy_within(self.written..self.buffered, 0);
        self.buffered -= self.written;
        self.written = 0;
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        let ret = self.do_flush();
        self.reshuffle_and_remove_written();
        ret
    }

    fn do_flush(&mut self) -> io::Result<()> {
        while self.written < self.buffered {
            match self.writer.write(&self.buf[self.written..self.buffered]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write the buffered data",
                    ))
                }
                Ok(bytes_written) => self.written += bytes_written,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

impl<W: Write> Write for BufWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.buffered + buf.len() > self.buf.len() {
            self.flush_buf()?;
        }

        if buf.len() >= self.buf.len() {
            self.writer.write(buf)
        } else {
            self.buf[self.buffered..self.buffered + buf.len()].copy_from_slice(buf);
            self.buffered += buf.len();
            Ok(buf.len())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_buf()?;
        self.writer.flush()
    }
}

impl<W: Write> BufWrite for BufWriter<W> {
    fn partial_flush_buf(&mut self) -> io::Result<&mut [u8]> {
        if self.buffered == self.buf.len() {
            self.flush_buf()?;
        }

        Ok(&mut self.buf[self.buffered..])
    }

    fn produce(&mut self, amt: usize) {
        debug_assert!(
            self.buffered + amt <= self.buf.len(),
            "produce called with amt exceeding buffer capacity"
        );
        self.buffered += amt;
    }
}
