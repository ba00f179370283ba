//! Error types raised while building signatures.

use thiserror::Error;

/// Errors raised while turning raw input into a [`Signature`](crate::Signature).
///
/// These surface to the caller; the profile layer decides how to present
/// them. Nothing here is silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// A birth date string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid birth date '{input}'")]
    InvalidDate {
        /// Text supplied by the caller.
        input: String,
        /// Source error from `chrono`.
        #[source]
        source: chrono::ParseError,
    },
    /// Year, month and day do not form a calendar date.
    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    OutOfRangeDate {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
        /// Requested day of month.
        day: u32,
    },
    /// A Western sign name was not recognised.
    #[error("unknown western sign '{input}'")]
    UnknownWesternSign {
        /// Text supplied by the caller.
        input: String,
    },
    /// A Chinese animal name was not recognised.
    #[error("unknown chinese animal '{input}'")]
    UnknownAnimal {
        /// Text supplied by the caller.
        input: String,
    },
    /// A signature key did not have the `{west}_{east}` shape.
    #[error("malformed signature key '{input}' (expected west_east)")]
    MalformedKey {
        /// Text supplied by the caller.
        input: String,
    },
    /// A pair key did not have the `{key}|{key}` shape.
    #[error("malformed pair key '{input}' (expected west_east|west_east)")]
    MalformedPairKey {
        /// Text supplied by the caller.
        input: String,
    },
}
