//! Timestamp store trait definition.

use chrono::{DateTime, Utc};

use super::errors::StoreError;

/// Durable slot holding the instant of the last successful pull.
///
/// Implementations must treat missing, unreadable or corrupt state as
/// "never pulled" on read; only writes report failures.
pub trait TimestampStore: Send + Sync {
    /// Short backend name for logs (e.g. "file", "settings").
    fn name(&self) -> &'static str;

    /// Record `instant` as the sole last-pull marker, replacing any prior value.
    fn save(&self, instant: DateTime<Utc>) -> Result<(), StoreError>;

    /// The stored instant, or `None` if never set or unreadable.
    fn read(&self) -> Option<DateTime<Utc>>;
}

impl<T: TimestampStore + ?Sized> TimestampStore for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn save(&self, instant: DateTime<Utc>) -> Result<(), StoreError> {
        (**self).save(instant)
    }

    fn read(&self) -> Option<DateTime<Utc>> {
        (**self).read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MemoryStore {
        value: Mutex<Option<DateTime<Utc>>>,
    }

    impl TimestampStore for MemoryStore {
        fn name(&self) -> &'static str {
            "memory"
        }

        fn save(&self, instant: DateTime<Utc>) -> Result<(), StoreError> {
            *self.value.lock().unwrap() = Some(instant);
            Ok(())
        }

        fn read(&self) -> Option<DateTime<Utc>> {
            *self.value.lock().unwrap()
        }
    }

    #[test]
    fn test_store_usable_as_trait_object() {
        let store: Box<dyn TimestampStore> = Box::new(MemoryStore {
            value: Mutex::new(None),
        });
        assert!(store.read().is_none());

        let now = Utc::now();
        store.save(now).unwrap();
        assert_eq!(store.read(), Some(now));
        assert_eq!(store.name(), "memory");
    }
}
