/// All primary keys are UUIDs assigned by the application before insert.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a new primary key. Keys are UUID v7, so they sort by creation time.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}
