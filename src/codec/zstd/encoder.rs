use crate::{
    codec::{Encode, Flush, Progress},
    unshared::Unshared,
};
use libzstd::stream::raw::{Encoder, InBuffer, Operation, OutBuffer};
use std::io::Result;

#[derive(Debug)]
pub struct ZstdEncoder {
    encoder: Unshared<Encoder<'static>>,
}

impl ZstdEncoder {
    pub(crate) fn new(level: i32) -> Result<Self> {
        Ok(Self {
            encoder: Unshared::new(Encoder::new(level)?),
        })
    }

    /// Chunk size the zstd streaming API works best with, for either side of a call.
    pub(crate) fn recommended_buffer_size() -> usize {
        std::cmp::max(zstd_safe::CCtx::in_size(), zstd_safe::CCtx::out_size())
    }
}

impl Encode for ZstdEncoder {
    fn encode(&mut self, input: &[u8], output: &mut [u8], flush: Flush) -> Result<Progress> {
        let capacity = output.len();
        let encoder = self.encoder.get_mut();
        let mut in_buf = InBuffer::around(input);
        let mut out_buf = OutBuffer::around(output);

        encoder.run(&mut in_buf, &mut out_buf)?;

        // A sync flush only starts once all input has been taken in, same as
        // `ZSTD_compressStream2(.., ZSTD_e_flush)`.
        let drained = match flush {
            Flush::None => out_buf.pos() < capacity,
            Flush::Sync if in_buf.pos() < input.len() => false,
            Flush::Sync => encoder.flush(&mut out_buf)? == 0,
        };

        Ok(Progress {
            consumed: in_buf.pos(),
            produced: out_buf.pos(),
            drained,
        })
    }
}
