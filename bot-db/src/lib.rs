pub mod monitored;

pub use monitored::{MonitoredChannel, MonitoredChannels};

use color_eyre::eyre::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use sled::{Db, Tree};
use std::path::Path;

pub trait ReadWriteTree {
    fn typed_insert<K: Serialize, V: DeserializeOwned + Serialize>(
        &self,
        key: &K,
        value: &V,
    ) -> Result<Option<V>>;

    fn typed_get<K: Serialize, V: DeserializeOwned>(&self, key: &K) -> Result<Option<V>>;

    fn typed_remove<K: Serialize, V: DeserializeOwned>(&self, key: &K) -> Result<Option<V>>;

    fn typed_contains<K: Serialize>(&self, key: &K) -> Result<bool>;
}

impl ReadWriteTree for Tree {
    /// Returns the value previously stored under `key`, if any.
    fn typed_insert<K: Serialize, V: DeserializeOwned + Serialize>(
        &self,
        key: &K,
        value: &V,
    ) -> Result<Option<V>> {
        let key = bincode::serialize::<K>(key)?;
        let value = bincode::serialize::<V>(value)?;
        Ok(self
            .insert(key, value)?
            .map(|old| bincode::deserialize::<V>(&old))
            .transpose()?)
    }

    fn typed_get<K: Serialize, V: DeserializeOwned>(&self, key: &K) -> Result<Option<V>> {
        Ok(self
            .get(bincode::serialize::<K>(key)?)?
            .map(|value| bincode::deserialize::<V>(&value))
            .transpose()?)
    }

    fn typed_remove<K: Serialize, V: DeserializeOwned>(&self, key: &K) -> Result<Option<V>> {
        Ok(self
            .remove(bincode::serialize::<K>(key)?)?
            .map(|value| bincode::deserialize::<V>(&value))
            .transpose()?)
    }

    fn typed_contains<K: Serialize>(&self, key: &K) -> Result<bool> {
        Ok(self.contains_key(bincode::serialize::<K>(key)?)?)
    }
}

#[derive(Debug, Clone)]
pub struct MizukiDb(Db);

impl MizukiDb {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = sled::open(path)
            .wrap_err_with(|| format!("Failed to open database at {}", path.display()))?;
        Ok(Self(db))
    }

    /// A database that lives only as long as this handle. Used by tests.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .wrap_err("Failed to open temporary database")?;
        Ok(Self(db))
    }

    fn open_tree(&self, name: impl AsRef<[u8]>) -> Result<Tree> {
        self.0.open_tree(name).wrap_err("Failed to open tree")
    }
}
