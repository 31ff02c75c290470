use crate::error::FetchError;
use serde::de::DeserializeOwned;

/// Decode a raw payload into the record type the caller expects.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FetchError> {
    Ok(serde_json::from_slice(bytes)?)
}
