use std::io::{self, BufRead, Read, Write};

/// Counts what reaches the wrapped writer.
#[derive(Debug, Default)]
pub struct TrackWrites<W> {
    inner: W,
    writes: usize,
    flushes: usize,
}

impl<W> TrackWrites<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            writes: 0,
            flushes: 0,
        }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }
}

impl<W: Write> Write for TrackWrites<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        self.inner.flush()
    }
}

/// Exposes at most `limit` bytes of the wrapped data per `fill_buf`, like a transport handing
/// over data in small pieces. Also counts how much was consumed.
#[derive(Debug)]
pub struct Limited<'a> {
    data: &'a [u8],
    limit: usize,
    consumed: usize,
}

impl<'a> Limited<'a> {
    pub fn new(data: &'a [u8], limit: usize) -> Self {
        Self {
            data,
            limit,
            consumed: 0,
        }
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn rest(&self) -> &'a [u8] {
        self.data
    }
}

impl Read for Limited<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let len = std::cmp::min(available.len(), buf.len());
        buf[..len].copy_from_slice(&available[..len]);
        self.consume(len);
        Ok(len)
    }
}

impl BufRead for Limited<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        let len = std::cmp::min(self.data.len(), self.limit);
        Ok(&self.data[..len])
    }

    fn consume(&mut self, amt: usize) {
        assert!(amt <= std::cmp::min(self.data.len(), self.limit));
        self.data = &self.data[amt..];
        self.consumed += amt;
    }
}
