//! Time-ordered 128-bit value generation.
//!
//! Values follow the UUIDv7 layout, with the sub-millisecond part of the
//! timestamp stored in bits that UUIDv7 leaves to the implementation:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |    sub_ms (high 12)   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|lo |                        rand                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! `sub_ms` is the time past the millisecond in 100 ns ticks (`0..=9999`, 14
//! bits); `lo` holds its two low bits. `ver` is `0111` and `var` is `10`. The
//! 60 `rand` bits come from a cryptographically secure generator.

use chrono::{DateTime, Utc};
use rand::RngCore;
use uuid::Uuid;

use crate::error::IdError;

/// Largest millisecond timestamp that fits the 48-bit field.
pub const MAX_UNIX_MS: i64 = (1 << 48) - 1;

const NANOS_PER_MS: u32 = 1_000_000;
const NANOS_PER_TICK: u32 = 100;

/// Generates a time-ordered value for the given instant.
pub fn generate(timestamp: DateTime<Utc>) -> Result<Uuid, IdError> {
    let unix_ms = timestamp.timestamp_millis();
    if unix_ms < 0 {
        return Err(IdError::TimestampBeforeEpoch);
    }
    if unix_ms > MAX_UNIX_MS {
        return Err(IdError::TimestampOverflow);
    }

    // Leap seconds push subsec nanos past 1e9; the modulo keeps this below 10_000.
    let sub_ms = (timestamp.timestamp_subsec_nanos() % NANOS_PER_MS) / NANOS_PER_TICK;

    let mut bytes = [0u8; 16];
    bytes[..6].copy_from_slice(&unix_ms.to_be_bytes()[2..]);
    bytes[6..8].copy_from_slice(&((sub_ms >> 2) as u16).to_be_bytes());
    bytes[6] |= 0x70;

    rand::rng().fill_bytes(&mut bytes[8..]);
    bytes[8] = 0x80 | (((sub_ms & 0x3) as u8) << 4) | (bytes[8] & 0x0f);

    Ok(Uuid::from_bytes(bytes))
}

/// Generates a time-ordered value for the current instant.
pub fn generate_now() -> Result<Uuid, IdError> {
    generate(Utc::now())
}

/// Returns the millisecond timestamp held in the top 48 bits of `value`.
#[must_use]
pub fn timestamp_ms(value: &Uuid) -> u64 {
    let mut ms = [0u8; 8];
    ms[2..].copy_from_slice(&value.as_bytes()[..6]);
    u64::from_be_bytes(ms)
}

/// Returns the instant held in the top 48 bits of `value`, at millisecond precision.
#[must_use]
pub fn timestamp(value: &Uuid) -> Option<DateTime<Utc>> {
    i64::try_from(timestamp_ms(value))
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}
