//! Configuration providers shared across the workspace. Crate-specific
//! schemas (e.g. `rvoip-daemon`'s YAML document) live in their own crates;
//! this module only carries the provider abstraction and a file-backed
//! implementation of it.

pub mod provider;

pub use provider::{ConfigProvider, ConfigSource, FileConfigProvider};
