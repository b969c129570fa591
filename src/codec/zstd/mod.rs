mod decoder;
mod encoder;

pub(crate) use self::{decoder::ZstdDecoder, encoder::ZstdEncoder};
