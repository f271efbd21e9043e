// ABOUTME: TCP volume client
// ABOUTME: Timeout-bounded pull (0x00 -> 1 byte) and fire-and-forget push (0x01 <byte>)

use crate::config::Endpoint;
use crate::error::Error;
use crate::protocol::Command;
use crate::scale::VolumeScale;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::Instant;

/// Talks to the external volume controller.
///
/// Never retries and never fails loudly: a pull that goes wrong yields `None`,
/// a push that goes wrong is dropped. With a disabled endpoint no socket is
/// ever opened.
#[derive(Debug, Clone)]
pub struct VolumeClient {
    endpoint: Endpoint,
    scale: VolumeScale,
}

impl VolumeClient {
    /// Create a client using the default volume scale
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_scale(endpoint, VolumeScale::DEFAULT)
    }

    /// Create a client converting to and from a custom internal range
    pub fn with_scale(endpoint: Endpoint, scale: VolumeScale) -> Self {
        Self { endpoint, scale }
    }

    /// Whether the client will touch the network at all
    pub fn is_enabled(&self) -> bool {
        self.endpoint.enabled
    }

    /// Ask the peer for its current volume.
    ///
    /// Returns `None` when disabled or when the exchange fails for any reason
    /// (connect, write, short read, deadline). Blocks for at most about
    /// `timeout`: the connect and the remaining exchange each get it as a bound.
    pub async fn get_volume(&self, timeout: Duration) -> Option<u32> {
        if !self.endpoint.enabled {
            return None;
        }

        match self.try_get_volume(timeout).await {
            Ok(volume) => Some(volume),
            Err(e) => {
                log::debug!("volume request to {} failed: {}", self.endpoint.authority(), e);
                None
            }
        }
    }

    /// Same exchange as [`get_volume`](Self::get_volume), reporting why it failed
    pub async fn try_get_volume(&self, timeout: Duration) -> Result<u32, Error> {
        if !self.endpoint.enabled {
            return Err(Error::Config("volume client is disabled".to_string()));
        }

        let mut stream = connect(&self.endpoint.authority(), timeout).await?;
        let deadline = Instant::now() + timeout;

        let exchange = async {
            stream.write_all(&Command::RequestVolume.encode()).await?;

            let mut buf = [0u8; 1];
            stream.read_exact(&mut buf).await?;
            Ok::<u8, Error>(buf[0])
        };

        let byte = tokio::time::timeout_at(deadline, exchange)
            .await
            .map_err(|_| Error::Timeout(timeout))??;

        Ok(self.scale.to_internal(byte))
    }

    /// Report a local volume change to the peer without waiting.
    ///
    /// The connect and write run on a detached tokio task; the caller returns
    /// immediately and never learns whether the push arrived. Needs to be
    /// called from within a tokio runtime; outside one the push is dropped.
    pub fn set_volume(&self, volume: u32, timeout: Duration) {
        if !self.endpoint.enabled {
            return;
        }

        let byte = self.scale.to_byte(volume);
        let authority = self.endpoint.authority();

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            log::debug!("no tokio runtime, dropping volume push to {}", authority);
            return;
        };

        handle.spawn(async move {
            if let Err(e) = push(&authority, byte, timeout).await {
                log::debug!("volume push to {} failed: {}", authority, e);
            }
        });
    }
}

async fn connect(authority: &str, timeout: Duration) -> Result<TcpStream, Error> {
    match tokio::time::timeout(timeout, TcpStream::connect(authority)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(e)) => Err(Error::Connection(format!("{}: {}", authority, e))),
        Err(_) => Err(Error::Timeout(timeout)),
    }
}

async fn push(authority: &str, volume: u8, timeout: Duration) -> Result<(), Error> {
    let mut stream = connect(authority, timeout).await?;
    let deadline = Instant::now() + timeout;

    tokio::time::timeout_at(deadline, stream.write_all(&Command::SetVolume(volume).encode()))
        .await
        .map_err(|_| Error::Timeout(timeout))??;

    Ok(())
}
