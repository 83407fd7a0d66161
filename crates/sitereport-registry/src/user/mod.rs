//! In-memory user directory.

pub mod directory;

pub use directory::UserDirectory;
