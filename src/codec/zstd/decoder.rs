use crate::{
    codec::{Decode, Progress},
    unshared::Unshared,
};
use libzstd::stream::raw::{Decoder, Operation};
use std::io::Result;

#[derive(Debug)]
pub struct ZstdDecoder {
    decoder: Unshared<Decoder<'static>>,
}

impl ZstdDecoder {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            decoder: Unshared::new(Decoder::new()?),
        })
    }

    pub(crate) fn recommended_buffer_size() -> usize {
        std::cmp::max(zstd_safe::DCtx::in_size(), zstd_safe::DCtx::out_size())
    }
}

impl Decode for ZstdDecoder {
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Progress> {
        let status = self.decoder.get_mut().run_on_buffers(input, output)?;

        Ok(Progress {
            consumed: status.bytes_read,
            produced: status.bytes_written,
            drained: status.bytes_written < output.len(),
        })
    }
}
