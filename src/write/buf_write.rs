use std::io;

/// A writer with an internal buffer which can be written into directly.
///
/// Sometimes when writing data to an IO sink you need to write it into a buffered slice before
/// writing it out to the underlying device. This trait lets a producer, such as a compressor,
/// write straight into the sink's own buffer instead of going through an intermediate copy.
pub trait BufWrite: io::Write {
    /// Attempt to return an internal buffer to write to, flushing data out to the inner writer if
    /// it is full.
    ///
    /// On success the returned buffer is guaranteed to be non-empty.
    fn partial_flush_buf(&mut self) -> io::Result<&mut [u8]>;

    /// Tells this buffer that `amt` bytes have been written to its buffer, so they should be
    /// written out to the underlying IO when possible.
    ///
    /// This function is a lower-level call. It needs to be paired with the `partial_flush_buf`
    /// method to function properly. This function does not perform any I/O, it simply informs
    /// this object that some amount of its buffer, returned from `partial_flush_buf`, has been
    /// written to and should be sent. As such, this function may do odd things if
    /// `partial_flush_buf` isn't called before calling it.
    ///
    /// The `amt` must be `<=` the number of bytes in the buffer returned by `partial_flush_buf`.
    fn produce(&mut self, amt: usize);
}

impl<T: BufWrite + ?Sized> BufWrite for &mut T {
    fn partial_flush_buf(&mut self) -> io::Result<&mut [u8]> {
        (**self).partial_flush_buf()
    }

    fn produce(&mut self, amt: usize) {
        (**self).produce(amt)
    }
}

impl<T: BufWrite + ?Sized> BufWrite for Box<T> {
    fn partial_flush_buf(&mut self) -> io::Result<&mut [u8]> {
        (**self).partial_flush_buf()
    }

    fn produce(&mut self, amt: usize) {
        (**self).produce(amt)
    }
}
