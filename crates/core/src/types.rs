/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Alert identifiers are random UUIDs (v4).
pub type AlertId = uuid::Uuid;
