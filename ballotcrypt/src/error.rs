use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("ballotcrypt: unsupported curve {0:?}, valid curves are secp256k1, secp256r1, secp384r1, secp521r1")]
    UnsupportedCurve(String),

    #[error("ballotcrypt: malformed input {input:?}, expected to match {pattern}")]
    MalformedInput { input: String, pattern: String },

    #[error("ballotcrypt: point is not on the curve")]
    PointNotOnCurve,

    #[error("ballotcrypt: hashing exhausted after {0} attempts")]
    EncodingExhausted(usize),

    #[error("ballotcrypt: no adjustment byte encodes the chunk as a curve point")]
    PointEncodingExhausted,

    #[error("ballotcrypt: invalid point encoding")]
    InvalidEncoding,

    #[error("ballotcrypt: mismatched lengths: {0} generators and {1} points")]
    MismatchedLength(usize, usize),

    #[error("ballotcrypt: commitment has no opening")]
    NotOpenable,

    #[error("ballotcrypt: ciphertext failed authentication")]
    Authentication,

    #[error("ballotcrypt: invalid participant id {0}")]
    InvalidParticipantId(u32),

    #[error("ballotcrypt: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ballotcrypt: base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
