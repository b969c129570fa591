use crate::codec::{Encode, Flush, Progress};
use std::io::{Error, ErrorKind, Result};

use flate2::{Compress, Compression, FlushCompress, Status};

#[derive(Debug)]
pub struct ZlibEncoder {
    compress: Compress,
    /// A sync flush has taken in all input but its output did not fit yet.
    flushing: bool,
}

impl ZlibEncoder {
    pub(crate) fn new(level: Compression) -> Self {
        Self {
            compress: Compress::new(level, true),
            flushing: false,
        }
    }

    fn do_encode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushCompress,
    ) -> Result<(Status, usize, usize)> {
        let prior_in = self.compress.total_in();
        let prior_out = self.compress.total_out();

        let status = self.compress.compress(input, output, flush)?;

        let in_length = (self.compress.total_in() - prior_in) as usize;
        let out_length = (self.compress.total_out() - prior_out) as usize;

        Ok((status, in_length, out_length))
    }
}

impl Encode for ZlibEncoder {
    fn encode(&mut self, input: &[u8], output: &mut [u8], flush: Flush) -> Result<Progress> {
        // A repeated sync request with no input starts another empty stored block, so the rest
        // of a started flush is drained with no-flush calls.
        let mode = match flush {
            Flush::Sync if !self.flushing => FlushCompress::Sync,
            _ => FlushCompress::None,
        };

        let (status, consumed, produced) = self.do_encode(input, output, mode)?;
        let drained = produced < output.len();

        if flush == Flush::Sync {
            self.flushing = !drained && consumed == input.len();
        }

        match status {
            // BufError only signals that this call could make no progress, zlib documents it as
            // recoverable.
            Status::Ok | Status::BufError => Ok(Progress {
                consumed,
                produced,
                drained,
            }),
            Status::StreamEnd => Err(Error::new(
                ErrorKind::Other,
                "deflate stream ended unexpectedly",
            )),
        }
    }
}
