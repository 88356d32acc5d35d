pub mod record;
pub mod store;

pub use record::{PrayerDate, PrayerRecord, ValidationError};
pub use store::{FileStore, RecordStore, StoreError};
