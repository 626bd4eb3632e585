//! The single error taxonomy shared by every crate in this workspace.
//!
//! Each variant is one of the kinds a caller needs to distinguish; no
//! component invents its own error type, and no error crosses a crate
//! boundary translated into a different kind. Signature verification
//! failure is deliberately absent here — `Transaction::verify` and
//! `PublicKey::verify_signature` return `bool`, not `Result`, since a
//! failed check is an answer, not a failure to answer.

/// Convenience alias used throughout this workspace.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A buffer, string, seed, signature, or name had the wrong length.
    #[error("invalid length for {what}: expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A setter received an argument that does not match its declared
    /// semantic type (e.g. a non-`PublicKey` byte slice).
    #[error("invalid type: {what}")]
    InvalidType { what: String },

    /// A numeric value fell outside its declared interval.
    #[error("{what} out of range [{min}, {max}]: got {got}")]
    InvalidRange {
        what: &'static str,
        min: i128,
        max: i128,
        got: i128,
    },

    /// A field was accessed that does not exist for the transaction's
    /// current version.
    #[error("field `{field}` is not available for this transaction version")]
    InvalidField { field: String },

    /// A getter was called before the field was ever written.
    #[error("field `{field}` has not been set yet")]
    FieldNotSet { field: String },

    /// `version` was written a second time.
    #[error("field `{field}` has already been set")]
    FieldAlreadySet { field: String },

    /// A prefix string was the wrong length, contained a character
    /// outside `a..z`, or decoded to a version with its reserved high
    /// bit set.
    #[error("invalid prefix: {reason}")]
    InvalidPrefix { reason: String },

    /// A Bech32 string failed to decode: mixed case, missing
    /// separator, empty human-readable part, too few data characters,
    /// bad checksum, or non-canonical padding.
    #[error("invalid bech32 string: {reason}")]
    InvalidBech32 { reason: String },
}
