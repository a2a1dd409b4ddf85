use crate::error::{LedgerError, LedgerErrorExt};
use tracing::debug;
use ts64_domain::stash::{STATS_KEY, StatKind, StatsRecord};
use ts64_storage::{KeyValueStore, StoredValue};

/// Stash counters kept in the `TS64_META_stats` record.
///
/// Reads always go to the store; nothing is cached. Callers that increment from
/// several tasks must serialize the read-modify-write themselves.
#[derive(Debug, Clone)]
pub struct StatsLedger<S> {
    store: S,
}

impl<S: KeyValueStore> StatsLedger<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Current counters. An absent record reads as all zeros.
    ///
    /// # Errors
    /// * [`LedgerError::Store`] when the store cannot be read.
    /// * [`LedgerError::Json`] / [`LedgerError::Corrupted`] when the record is not a counter object.
    pub async fn get(&self) -> Result<StatsRecord, LedgerError> {
        match self.store.get(STATS_KEY).await.context("Reading stats record")? {
            None => Ok(StatsRecord::default()),
            Some(StoredValue::Record(json)) => {
                serde_json::from_value(json).context("Parsing stats record")
            },
            Some(other) => Err(LedgerError::Corrupted {
                message: format!("expected a record, found {} bytes of payload", other.footprint()).into(),
                context: Some(STATS_KEY.into()),
            }),
        }
    }

    /// Adds one to `kind` and returns the updated counters.
    ///
    /// # Errors
    /// See [`StatsLedger::get`]; also fails when the record cannot be written.
    pub async fn increment(&self, kind: StatKind) -> Result<StatsRecord, LedgerError> {
        let mut stats = self.get().await?;
        stats.bump(kind);
        self.put(&stats).await?;
        debug!(kind = kind.as_str(), count = stats.count(kind), "Ledger incremented");
        Ok(stats)
    }

    /// Writes an all-zero record.
    ///
    /// # Errors
    /// [`LedgerError::Store`] when the record cannot be written.
    pub async fn reset(&self) -> Result<(), LedgerError> {
        self.put(&StatsRecord::default()).await
    }

    async fn put(&self, stats: &StatsRecord) -> Result<(), LedgerError> {
        let json = serde_json::to_value(stats).context("Serializing stats record")?;
        self.store.set(STATS_KEY, StoredValue::Record(json)).await.context("Writing stats record")
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}
