// ABOUTME: Protocol command definitions and wire encoding
// ABOUTME: 0x00 requests the peer's volume, 0x01 <byte> sets it

/// Marker byte asking the peer for its current volume
pub const REQUEST_VOLUME: u8 = 0x00;

/// Marker byte preceding a volume the peer should apply
pub const SET_VOLUME: u8 = 0x01;

/// Commands the client sends to the peer.
///
/// Replies and unsolicited pushes from the peer are a bare volume byte and
/// need no framing of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ask for the current volume; the peer answers with one byte
    RequestVolume,
    /// Set the peer's volume (0-255)
    SetVolume(u8),
}

impl Command {
    /// Encode into the exact bytes written on the wire
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            Command::RequestVolume => vec![REQUEST_VOLUME],
            Command::SetVolume(volume) => vec![SET_VOLUME, volume],
        }
    }
}
