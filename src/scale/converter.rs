// ABOUTME: Volume scale converter implementation
// ABOUTME: Round-half-up integer conversion between u8 wire volume and u32 internal volume

use crate::error::Error;

/// Native volume resolution of the player (`0..=65535`).
pub const MAX_STATE_VOLUME: u32 = 65535;

/// Linear mapping between the protocol's `0..=255` byte and `0..=max` internal volume.
///
/// Both directions round to nearest with ties going up (away from zero, since
/// every value is non-negative). Arithmetic is done in `u64` integers so the
/// result is exact for any `max`.
///
/// When `max >= 255` a byte survives the round trip unchanged:
/// `to_byte(to_internal(b)) == b`. Smaller ranges lose resolution but the
/// round trip is still stable after the first pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeScale {
    max: u32,
}

impl VolumeScale {
    /// Scale over the player's default `0..=MAX_STATE_VOLUME` range
    pub const DEFAULT: Self = Self {
        max: MAX_STATE_VOLUME,
    };

    /// Create a scale for an internal range of `0..=max`
    pub fn new(max: u32) -> Result<Self, Error> {
        if max == 0 {
            return Err(Error::Config("volume scale maximum must be non-zero".to_string()));
        }
        Ok(Self { max })
    }

    /// Largest internal volume
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Convert a wire byte to internal volume: `round(b * max / 255)`
    #[inline]
    pub fn to_internal(&self, b: u8) -> u32 {
        let num = 2 * u64::from(b) * u64::from(self.max) + 255;
        (num / 510) as u32
    }

    /// Convert internal volume to a wire byte: `round(min(v, max) * 255 / max)`
    ///
    /// Values above `max` saturate to 255.
    #[inline]
    pub fn to_byte(&self, v: u32) -> u8 {
        let max = u64::from(self.max);
        let v = u64::from(v).min(max);
        ((2 * v * 255 + max) / (2 * max)) as u8
    }
}

impl Default for VolumeScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Convert a wire byte using the default scale
#[inline]
pub fn byte_to_volume(b: u8) -> u32 {
    VolumeScale::DEFAULT.to_internal(b)
}

/// Convert internal volume to a wire byte using the default scale
#[inline]
pub fn volume_to_byte(v: u32) -> u8 {
    VolumeScale::DEFAULT.to_byte(v)
}
