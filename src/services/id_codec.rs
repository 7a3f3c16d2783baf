/*
 * Responsibility
 * - 公開 ID ↔ 内部 ID の変換 (encode/decode)
 * - 連番の clipId をそのままクライアントに見せないための層
 * - Extractor や DTO からはこの service を使う (方式変更の影響を局所化)
 */
use sqids::{Error as SqidsError, Sqids};
use std::{error::Error, fmt};

#[derive(Debug)]
pub enum IdCodecError {
    InvalidMinLength { value: usize },
    Sqids(SqidsError),
    NegativeId { value: i64 },
    Undecodable,
}

impl fmt::Display for IdCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdCodecError::InvalidMinLength { value } => {
                write!(f, "SQIDS_MIN_LENGTH must fit in u8, got {}", value)
            }
            IdCodecError::Sqids(e) => write!(f, "sqids error: {}", e),
            IdCodecError::NegativeId { value } => {
                write!(f, "id must be non-negative, got {}", value)
            }
            IdCodecError::Undecodable => write!(f, "public id does not decode to a single id"),
        }
    }
}

impl Error for IdCodecError {}

impl From<SqidsError> for IdCodecError {
    fn from(e: SqidsError) -> Self {
        IdCodecError::Sqids(e)
    }
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self, IdCodecError> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String, IdCodecError> {
        if id < 0 {
            return Err(IdCodecError::NegativeId { value: id });
        }
        let encoded = self.sqids.encode(&[id as u64])?;
        Ok(encoded)
    }

    pub fn decode(&self, public_id: &str) -> Result<i64, IdCodecError> {
        let nums = self.sqids.decode(public_id);
        match nums.as_slice() {
            [n] => i64::try_from(*n).map_err(|_| IdCodecError::Undecodable),
            _ => Err(IdCodecError::Undecodable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> IdCodec {
        IdCodec::new(10, "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789").unwrap()
    }

    #[test]
    fn encode_decode_roundtrip() {
        let codec = codec();
        let public = codec.encode(42).unwrap();
        assert!(public.len() >= 10);
        assert_eq!(codec.decode(&public).unwrap(), 42);
    }

    #[test]
    fn negative_id_is_rejected() {
        let codec = codec();
        assert!(matches!(
            codec.encode(-1),
            Err(IdCodecError::NegativeId { value: -1 })
        ));
    }

    #[test]
    fn garbage_does_not_decode() {
        let codec = codec();
        assert!(codec.decode("!!!not-an-id!!!").is_err());
    }
}
