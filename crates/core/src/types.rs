/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Platform video identifier (e.g. `dQw4w9WgXcQ`).
pub type VideoId = String;
