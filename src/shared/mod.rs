//! Cross-cutting pieces: configuration, the memoizing cache, exit codes.

pub mod cache;
pub mod config;
pub mod exit;

pub use cache::MemoCache;
pub use self::config::AppConfig;
pub use exit::RunExit;
