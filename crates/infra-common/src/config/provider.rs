//! The `ConfigProvider` trait every configuration source (file, env,
//! in-memory override) implements, plus a simple file-backed provider.

use std::any::Any;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::types::{Error, Result};

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    File,
    Environment,
    Memory,
}

/// A named source of configuration values, keyed by dotted path (`a.b.c`).
pub trait ConfigProvider: Send + Sync {
    fn name(&self) -> &str;
    fn source(&self) -> ConfigSource;
    fn get<U: DeserializeOwned>(&self, key: &str) -> Result<U>;
    fn get_raw(&self, key: &str) -> Result<Box<dyn Any>>;
    fn has(&self, key: &str) -> bool;
    fn keys(&self) -> Vec<String>;
    fn reload(&self) -> Result<()>;
}

/// A provider backed by a single JSON document on disk, reloadable on
/// demand. Keys are looked up as top-level object fields.
pub struct FileConfigProvider {
    name: String,
    path: PathBuf,
    document: std::sync::RwLock<serde_json::Value>,
}

impl FileConfigProvider {
    pub fn load(name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = Self::read(&path)?;
        Ok(Self {
            name: name.into(),
            path,
            document: std::sync::RwLock::new(document),
        })
    }

    fn read(path: &Path) -> Result<serde_json::Value> {
        let text = fs::read_to_string(path).map_err(|e| Error::Io(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| Error::Configuration(e.to_string()))
    }
}

impl ConfigProvider for FileConfigProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn source(&self) -> ConfigSource {
        ConfigSource::File
    }

    fn get<U: DeserializeOwned>(&self, key: &str) -> Result<U> {
        let document = self.document.read().unwrap();
        let value = document
            .get(key)
            .ok_or_else(|| Error::Configuration(format!("missing key: {}", key)))?;
        serde_json::from_value(value.clone()).map_err(|e| Error::Configuration(e.to_string()))
    }

    fn get_raw(&self, key: &str) -> Result<Box<dyn Any>> {
        let value: serde_json::Value = self.get(key)?;
        Ok(Box::new(value))
    }

    fn has(&self, key: &str) -> bool {
        self.document.read().unwrap().get(key).is_some()
    }

    fn keys(&self) -> Vec<String> {
        self.document
            .read()
            .unwrap()
            .as_object()
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn reload(&self) -> Result<()> {
        let document = Self::read(&self.path)?;
        *self.document.write().unwrap() = document;
        Ok(())
    }
}
