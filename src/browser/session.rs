use chrono::{DateTime, Utc};

/// Bookkeeping entry for one in-flight validation call. Tracked for
/// observability only; every call allocates and tears down its own browser
/// context, so correctness never depends on this record.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl SessionRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            active: true,
        }
    }
}
