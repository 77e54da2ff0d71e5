//! TCP transport for the sample server
//!
//! The server sends newline-delimited JSON samples and expects one
//! acknowledgement line per activation on the same connection. The pipeline is
//! pull-based and synchronous, so it runs on a blocking thread and drives the
//! async socket halves through the runtime handle.

use crate::classifier::Classifier;
use crate::codec::decode_sample;
use crate::error::{ActivationError, Result};
use crate::pipeline::{run_pipeline, PipelineConfig, Reporter};
use crate::sink::{ActivationSink, ACK_LINE};
use crate::types::{Activation, RunReport, Sample};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::runtime::Handle;

/// Where the sample server advertises its port when none is given
pub const DEFAULT_PORT_FILE: &str = ".pison-challenge-port";

/// Read a port number from a file containing it as trimmed text.
pub fn read_port_file(path: impl AsRef<Path>) -> Result<u16> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ActivationError::PortFile(format!(
            "--port not specified, and no port file at {}: {}",
            path.display(),
            e
        ))
    })?;

    contents.trim().parse::<u16>().map_err(|e| {
        ActivationError::PortFile(format!(
            "invalid port '{}' in {}: {}",
            contents.trim(),
            path.display(),
            e
        ))
    })
}

/// An open connection to the sample server
pub struct Connection {
    stream: TcpStream,
    address: String,
}

/// Connect to `host:port`. No retry is attempted.
pub async fn connect(host: &str, port: u16) -> Result<Connection> {
    let address = format!("{}:{}", host, port);
    log::info!("Connecting to TCP: {}", address);

    let stream = TcpStream::connect(&address)
        .await
        .map_err(|e| ActivationError::Connection(format!("{}: {}", address, e)))?;

    log::info!("TCP connected successfully");
    Ok(Connection { stream, address })
}

impl Connection {
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Split into a blocking sample source and acknowledgement sink.
    ///
    /// Both must be used from a thread where blocking is allowed, such as a
    /// `spawn_blocking` task.
    pub fn into_parts(self, handle: Handle) -> (SampleStream, SocketAckSink) {
        let (read, write) = self.stream.into_split();
        (
            SampleStream {
                lines: BufReader::new(read).lines(),
                handle: handle.clone(),
                failed: false,
            },
            SocketAckSink {
                writer: write,
                handle,
            },
        )
    }

    /// Run the pipeline over this connection until the server closes it or an
    /// error occurs.
    pub async fn run<R>(
        self,
        classifier: Box<dyn Classifier>,
        config: PipelineConfig,
        reporter: R,
    ) -> Result<RunReport>
    where
        R: Reporter + Send + 'static,
    {
        let address = self.address.clone();
        let (source, mut sink) = self.into_parts(Handle::current());

        let report = tokio::task::spawn_blocking(move || {
            run_pipeline(source, classifier.as_ref(), &config, &reporter, &mut sink)
        })
        .await
        .map_err(|e| ActivationError::Connection(format!("pipeline task failed: {}", e)))??;

        log::info!("TCP connection to {} finished", address);
        Ok(report)
    }
}

/// Decoded samples read from the socket, one per line
pub struct SampleStream {
    lines: Lines<BufReader<OwnedReadHalf>>,
    handle: Handle,
    failed: bool,
}

impl Iterator for SampleStream {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            match self.handle.block_on(self.lines.next_line()) {
                Ok(None) => {
                    log::info!("TCP connection closed by server");
                    return None;
                }
                Ok(Some(line)) => {
                    let record = line.trim();
                    if record.is_empty() {
                        continue;
                    }
                    let decoded = decode_sample(record);
                    self.failed = decoded.is_err();
                    return Some(decoded);
                }
                Err(e) => {
                    log::error!("TCP read error: {}", e);
                    self.failed = true;
                    return Some(Err(ActivationError::IoError(e)));
                }
            }
        }
    }
}

/// Writes acknowledgements to the socket, flushing each one
pub struct SocketAckSink {
    writer: OwnedWriteHalf,
    handle: Handle,
}

impl ActivationSink for SocketAckSink {
    fn acknowledge(&mut self, _activation: Activation) -> Result<()> {
        let writer = &mut self.writer;
        self.handle.block_on(async move {
            writer.write_all(ACK_LINE.as_bytes()).await?;
            writer.flush().await
        })?;
        Ok(())
    }
}
