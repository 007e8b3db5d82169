//! Session layer for Veritas.
//!
//! Provides the persistence, account, and campaign-log ports with a JSON
//! in-memory store behind them, GM campaign management, the bounded
//! recent-rolls feed, the live-stream snapshot, and [`TableSession`], which
//! runs rule-engine actions against stored records.

pub mod campaign;
pub mod config;
pub mod error;
pub mod memory;
pub mod ports;
pub mod roll_log;
pub mod session;
pub mod stream;

pub use campaign::{PlayerLookup, Roster, ThreatDamage};
pub use config::TableConfig;
pub use error::{TableError, TableResult};
pub use memory::MemoryStore;
pub use ports::{Accounts, CampaignLogger, Collection, Record, Store};
pub use roll_log::RollLog;
pub use session::TableSession;
pub use stream::StreamSnapshot;
