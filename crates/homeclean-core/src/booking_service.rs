use std::{fmt, sync::Arc};

use homeclean_domain::BookingRecord;
use tracing::{info, warn};

use crate::{CoreError, KeyValueStore};

/// Storage key shared by the booking wizard and the bookings list.
pub const BOOKINGS_KEY: &str = "bookings";

/// Non-fatal persistence problem to surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageNotice {
    /// Existing collection could not be parsed and was discarded.
    CorruptCollection { key: String, reason: String },
    /// Store could not be read or written; the booking was not saved.
    Unavailable { key: String, reason: String },
}

impl fmt::Display for StorageNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageNotice::CorruptCollection { key, reason } => write!(
                f,
                "Saved data under `{key}` was unreadable and has been reset ({reason})."
            ),
            StorageNotice::Unavailable { key, reason } => {
                write!(f, "Could not save to `{key}`: {reason}")
            }
        }
    }
}

/// Records read from the store plus any recovery applied while reading.
#[derive(Debug, Clone, Default)]
pub struct CollectionLoad {
    pub records: Vec<BookingRecord>,
    pub recovered: Option<StorageNotice>,
}

#[derive(Debug, Clone)]
pub struct AppendReport {
    pub total: usize,
    pub recovered: Option<StorageNotice>,
}

/// Ordered, most-recent-first booking log stored under a single key.
#[derive(Clone)]
pub struct BookingRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl BookingRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, BOOKINGS_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the collection; unparsable data is treated as empty.
    pub fn load(&self) -> Result<CollectionLoad, CoreError> {
        let Some(raw) = self.store.get_item(&self.key)? else {
            return Ok(CollectionLoad::default());
        };
        if raw.trim().is_empty() {
            return Ok(CollectionLoad::default());
        }
        match serde_json::from_str::<Vec<BookingRecord>>(&raw) {
            Ok(records) => Ok(CollectionLoad {
                records,
                recovered: None,
            }),
            Err(err) => {
                warn!(key = %self.key, error = %err, "discarding corrupt booking collection");
                Ok(CollectionLoad {
                    records: Vec::new(),
                    recovered: Some(StorageNotice::CorruptCollection {
                        key: self.key.clone(),
                        reason: err.to_string(),
                    }),
                })
            }
        }
    }

    pub fn list(&self) -> Result<Vec<BookingRecord>, CoreError> {
        Ok(self.load()?.records)
    }

    /// Inserts `record` at the head and writes the whole collection back.
    pub fn append(&self, record: BookingRecord) -> Result<AppendReport, CoreError> {
        let CollectionLoad {
            mut records,
            recovered,
        } = self.load()?;
        records.insert(0, record);
        self.save(&records)?;
        Ok(AppendReport {
            total: records.len(),
            recovered,
        })
    }

    fn save(&self, records: &[BookingRecord]) -> Result<(), CoreError> {
        let json = serde_json::to_string(records)?;
        self.store.set_item(&self.key, &json)
    }
}

/// Outcome of persisting a finished booking.
#[derive(Debug, Clone)]
pub struct PersistReport {
    pub record: BookingRecord,
    pub stored: bool,
    pub notices: Vec<StorageNotice>,
}

/// Writes finished bookings without ever failing the booking flow.
pub struct BookingPersister<'a> {
    repository: &'a BookingRepository,
}

impl<'a> BookingPersister<'a> {
    pub fn new(repository: &'a BookingRepository) -> Self {
        Self { repository }
    }

    pub fn persist(&self, record: BookingRecord) -> PersistReport {
        match self.repository.append(record.clone()) {
            Ok(report) => {
                info!(
                    service = %record.service_type,
                    date = %record.date,
                    price = record.price,
                    total = report.total,
                    "booking saved"
                );
                PersistReport {
                    record,
                    stored: true,
                    notices: report.recovered.into_iter().collect(),
                }
            }
            Err(err) => {
                warn!(key = %self.repository.key(), error = %err, "booking not saved");
                PersistReport {
                    record,
                    stored: false,
                    notices: vec![StorageNotice::Unavailable {
                        key: self.repository.key().to_string(),
                        reason: err.to_string(),
                    }],
                }
            }
        }
    }
}
