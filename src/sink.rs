use crate::error::Result;
use crate::types::Activation;
use std::io::Write;

/// Acknowledgement sent back for every activation
pub const ACK_LINE: &str = "Activation classified\n";

/// Receives each activation exactly once, in order.
pub trait ActivationSink {
    fn acknowledge(&mut self, activation: Activation) -> Result<()>;
}

/// Writes [`ACK_LINE`] per activation and flushes immediately.
pub struct AckWriter<W> {
    writer: W,
}

impl<W: Write> AckWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ActivationSink for AckWriter<W> {
    fn acknowledge(&mut self, _activation: Activation) -> Result<()> {
        self.writer.write_all(ACK_LINE.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<S: ActivationSink + ?Sized> ActivationSink for &mut S {
    fn acknowledge(&mut self, activation: Activation) -> Result<()> {
        (**self).acknowledge(activation)
    }
}
