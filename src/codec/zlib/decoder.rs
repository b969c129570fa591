use crate::codec::{Decode, Progress};
use std::io::Result;

use flate2::{Decompress, FlushDecompress, Status};

#[derive(Debug)]
pub struct ZlibDecoder {
    decompress: Decompress,
}

impl ZlibDecoder {
    pub(crate) fn new() -> Self {
        Self {
            decompress: Decompress::new(true),
        }
    }

    fn do_decode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushDecompress,
    ) -> Result<(Status, usize, usize)> {
        let prior_in = self.decompress.total_in();
        let prior_out = self.decompress.total_out();

        let status = self.decompress.decompress(input, output, flush)?;

        let in_length = (self.decompress.total_in() - prior_in) as usize;
        let out_length = (self.decompress.total_out() - prior_out) as usize;

        Ok((status, in_length, out_length))
    }
}

impl Decode for ZlibDecoder {
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Progress> {
        let (status, consumed, produced) = self.do_decode(input, output, FlushDecompress::Sync)?;

        Ok(Progress {
            consumed,
            produced,
            drained: match status {
                Status::Ok | Status::BufError => produced < output.len(),
                Status::StreamEnd => true,
            },
        })
    }
}
