//! # Stats Ledger
//!
//! Text, audio and video counters persisted as one `TS64_META_stats` record, and
//! the [`VaultSummary`] behind the `status` command.
//!
//! Counters move by one per successful stash creation and return to zero only on
//! purge. Restoring a backup never touches them.

mod error;
mod stats;
mod summary;

pub use crate::error::{LedgerError, LedgerErrorExt};
pub use crate::stats::StatsLedger;
pub use crate::summary::{BAR_WIDTH, VaultSummary};
