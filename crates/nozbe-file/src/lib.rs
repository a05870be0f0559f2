//! nozbe-file - Filesystem helpers for nozbe-sync.

mod helper;

pub use helper::FileHelper;
