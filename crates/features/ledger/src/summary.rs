use crate::error::{LedgerError, LedgerErrorExt};
use crate::stats::StatsLedger;
use ts64_domain::stash::{STASH_PREFIX, StatsRecord};
use ts64_storage::KeyValueStore;

/// Cells in the utilization bar.
pub const BAR_WIDTH: usize = 30;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Point-in-time view of vault occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultSummary {
    /// Number of `STASH_` keys.
    pub total_stashes: usize,
    pub stats: StatsRecord,
    /// Stored size of every stash value. Legacy text values count by length.
    pub total_bytes: u64,
    pub capacity_bytes: u64,
}

impl VaultSummary {
    /// Scans the store and the ledger.
    ///
    /// Each stash is read by key, so a stash deleted after the listing is
    /// skipped instead of shifting sizes onto other keys.
    ///
    /// # Errors
    /// Propagates store and ledger read failures.
    pub async fn collect<S>(store: &S, ledger: &StatsLedger<S>, capacity_bytes: u64) -> Result<Self, LedgerError>
    where
        S: KeyValueStore,
    {
        let keys = store.list_keys().await.context("Listing keys")?;

        let mut total_stashes = 0;
        let mut total_bytes = 0u64;
        for key in keys.iter().filter(|k| k.starts_with(STASH_PREFIX)) {
            let Some(value) = store.get(key).await.context("Reading stash")? else {
                continue;
            };
            total_stashes += 1;
            total_bytes = total_bytes.saturating_add(value.footprint() as u64);
        }

        let stats = ledger.get().await?;
        Ok(Self { total_stashes, stats, total_bytes, capacity_bytes })
    }

    /// Kilobytes with one decimal place.
    #[must_use]
    pub fn kilobytes(&self) -> String {
        format!("{:.1}", self.total_bytes as f64 / KIB)
    }

    /// Megabytes with two decimal places.
    #[must_use]
    pub fn megabytes(&self) -> String {
        format!("{:.2}", self.total_bytes as f64 / MIB)
    }

    /// Capacity in megabytes with one decimal place.
    #[must_use]
    pub fn capacity_megabytes(&self) -> String {
        format!("{:.1}", self.capacity_bytes as f64 / MIB)
    }

    /// Utilization in percent, capped at 100. A zero capacity counts as full.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.capacity_bytes == 0 {
            return 100.0;
        }
        (self.total_bytes as f64 / self.capacity_bytes as f64 * 100.0).min(100.0)
    }

    /// [`VaultSummary::percentage`] with two decimal places.
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.2}", self.percentage())
    }

    /// `█` for each filled cell, `░` for the rest.
    #[must_use]
    pub fn bar(&self) -> String {
        // Floor the rounded label so the bar never disagrees with the printed percentage.
        let shown: f64 = self.percentage_label().parse().unwrap_or_default();
        let filled = ((shown / 100.0 * BAR_WIDTH as f64).floor() as usize).min(BAR_WIDTH);
        let mut bar = "█".repeat(filled);
        bar.push_str(&"░".repeat(BAR_WIDTH - filled));
        bar
    }
}
