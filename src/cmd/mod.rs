//! One-shot CLI commands.

pub mod sync_now;

pub use sync_now::SyncNowArgs;
