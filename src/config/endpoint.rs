// ABOUTME: Endpoint descriptor and top-level volume config
// ABOUTME: (address, port, enabled) per role, with JSON loading via serde_json

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_CLIENT_PORT: u16 = 8001;
const DEFAULT_LISTENER_PORT: u16 = 8002;

/// Where one role talks to, and whether it is switched on.
///
/// A disabled endpoint turns every operation of the component it configures
/// into a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Whether the role is active
    #[serde(default)]
    pub enabled: bool,
    /// Host name or IP literal
    #[serde(default = "default_address")]
    pub address: String,
    /// TCP port
    pub port: u16,
}

fn default_address() -> String {
    DEFAULT_ADDRESS.to_string()
}

impl Endpoint {
    /// Create an endpoint
    pub fn new(enabled: bool, address: impl Into<String>, port: u16) -> Self {
        Self {
            enabled,
            address: address.into(),
            port,
        }
    }

    /// Endpoint that never does anything
    pub fn disabled() -> Self {
        Self::new(false, DEFAULT_ADDRESS, 0)
    }

    /// `host:port` string suitable for connecting or binding.
    ///
    /// Bare IPv6 literals are bracketed.
    pub fn authority(&self) -> String {
        if self.address.contains(':') && !self.address.starts_with('[') {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }
}

/// Volume integration settings for both roles.
///
/// The client and listener may point at different hosts and ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Outbound endpoint (pull and push)
    #[serde(default = "default_client")]
    pub client: Endpoint,
    /// Inbound endpoint (bind address for peer pushes)
    #[serde(default = "default_listener")]
    pub listener: Endpoint,
}

fn default_client() -> Endpoint {
    Endpoint::new(false, DEFAULT_ADDRESS, DEFAULT_CLIENT_PORT)
}

fn default_listener() -> Endpoint {
    Endpoint::new(false, DEFAULT_ADDRESS, DEFAULT_LISTENER_PORT)
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            client: default_client(),
            listener: default_listener(),
        }
    }
}

impl VolumeConfig {
    /// Parse from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }
}
