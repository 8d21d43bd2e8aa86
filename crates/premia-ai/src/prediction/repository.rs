use super::domain::PredictionRecord;

/// Storage abstraction so the service module can be exercised in
/// isolation. Records are write-once: a single `put` per accepted
/// request, keyed by the prediction id, no read-modify-write.
pub trait PredictionStore: Send + Sync {
    fn put(&self, record: PredictionRecord) -> Result<(), StoreError>;
}

/// Error enumeration for storage failures. The core performs no
/// retries; a failed write surfaces as a fault.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
