// ABOUTME: TCP volume listener
// ABOUTME: Background accept loop, one task per connection reading a single volume byte

use crate::config::Endpoint;
use crate::scale::VolumeScale;
use crate::slot::VolumeSlot;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};

/// How long a connected peer has to send its volume byte
pub const READ_DEADLINE: Duration = Duration::from_secs(2);

/// Receives volume updates pushed by the external controller.
///
/// Each accepted connection carries exactly one byte. The converted value
/// lands in a [`VolumeSlot`] that only ever holds the latest update, so a
/// slow host sees the newest volume and never a backlog.
#[derive(Debug, Clone)]
pub struct VolumeListener {
    endpoint: Endpoint,
    scale: VolumeScale,
    slot: VolumeSlot,
}

impl VolumeListener {
    /// Create a listener using the default volume scale
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_scale(endpoint, VolumeScale::DEFAULT)
    }

    /// Create a listener converting into a custom internal range
    pub fn with_scale(endpoint: Endpoint, scale: VolumeScale) -> Self {
        Self {
            endpoint,
            scale,
            slot: VolumeSlot::new(),
        }
    }

    /// Whether [`start`](Self::start) will open a socket
    pub fn is_enabled(&self) -> bool {
        self.endpoint.enabled
    }

    /// Handle to the slot updates are delivered into
    pub fn slot(&self) -> VolumeSlot {
        self.slot.clone()
    }

    /// Take the latest pushed volume, if one arrived since the last take
    pub fn try_recv(&self) -> Option<u32> {
        self.slot.try_take()
    }

    /// Wait for the next pushed volume
    pub async fn recv(&self) -> u32 {
        self.slot.recv().await
    }

    /// Bind and serve in the background for the rest of the process.
    ///
    /// Returns immediately. A bind failure is logged at debug level and
    /// otherwise ignored, so a misconfigured listener never stops the host.
    /// There is no way to stop the listener once it runs.
    pub fn start(&self) {
        if !self.endpoint.enabled {
            return;
        }

        let authority = self.endpoint.authority();
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            log::debug!("no tokio runtime, volume server on {} not started", authority);
            return;
        };

        let scale = self.scale;
        let slot = self.slot.clone();
        handle.spawn(async move {
            let listener = match TcpListener::bind(&authority).await {
                Ok(listener) => listener,
                Err(e) => {
                    log::debug!("volume server failed to bind {}: {}", authority, e);
                    return;
                }
            };

            match listener.local_addr() {
                Ok(addr) => log::info!("volume server listening on {}", addr),
                Err(_) => log::info!("volume server listening on {}", authority),
            }

            accept_loop(listener, scale, slot).await;
        });
    }
}

async fn accept_loop(listener: TcpListener, scale: VolumeScale, slot: VolumeSlot) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tokio::spawn(handle_conn(stream, peer, scale, slot.clone()));
            }
            Err(e) => {
                log::debug!("volume server accept failed: {}", e);
            }
        }
    }
}

async fn handle_conn(mut stream: TcpStream, peer: SocketAddr, scale: VolumeScale, slot: VolumeSlot) {
    let mut buf = [0u8; 1];
    match tokio::time::timeout(READ_DEADLINE, stream.read_exact(&mut buf)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            log::debug!("dropping volume connection from {}: {}", peer, e);
            return;
        }
        Err(_) => {
            log::debug!("volume connection from {} sent nothing within {:?}", peer, READ_DEADLINE);
            return;
        }
    }

    let volume = scale.to_internal(buf[0]);
    log::debug!("got external volume update ({}) from {}", volume, peer);

    slot.deposit(volume);
}
