//! Compression into a [`BufWrite`], and the buffered writer used to provide one.

mod buf_write;
mod buf_writer;
mod encoder;

pub use self::{buf_write::BufWrite, buf_writer::BufWriter, encoder::CompressionOutputStream};
