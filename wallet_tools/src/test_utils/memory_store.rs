use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
        MutexGuard,
    },
};

use log::*;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    data_objects::{LoyaltyClass, LoyaltyObject},
    traits::WalletObjects,
    WalletApiError,
};

/// An in-memory stand-in for the Wallet Objects API. Resources are kept as JSON, and patches are merged key by key,
/// the way the real API applies PATCH bodies. Inserting an id that already exists fails with a 409, as the API does.
#[derive(Debug, Default)]
pub struct MemoryWalletStore {
    classes: Mutex<HashMap<String, Value>>,
    objects: Mutex<HashMap<String, Value>>,
    inserts: AtomicUsize,
    patches: AtomicUsize,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn patches(&self) -> usize {
        self.patches.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.inserts() + self.patches()
    }

    /// Seeds the store without counting as a write.
    pub fn put_class(&self, class: &LoyaltyClass) {
        let id = class.id.clone().unwrap_or_default();
        put(&self.classes, id, class);
    }

    /// Seeds the store without counting as a write.
    pub fn put_object(&self, object: &LoyaltyObject) {
        let id = object.id.clone().unwrap_or_default();
        put(&self.objects, id, object);
    }

    pub fn class(&self, id: &str) -> Option<LoyaltyClass> {
        get(&self.classes, id).ok()
    }

    pub fn object(&self, id: &str) -> Option<LoyaltyObject> {
        get(&self.objects, id).ok()
    }

    /// The stored JSON of an object, including any fields the typed view doesn't model.
    pub fn raw_object(&self, id: &str) -> Option<Value> {
        self.objects.lock().ok().and_then(|m| m.get(id).cloned())
    }

    fn insert<T: Serialize + DeserializeOwned>(
        &self,
        store: &Mutex<HashMap<String, Value>>,
        id: Option<&String>,
        resource: &T,
    ) -> Result<T, WalletApiError> {
        let id = id.ok_or_else(|| WalletApiError::QueryError { status: 400, message: "Missing id".into() })?;
        let mut map = lock(store)?;
        if map.contains_key(id) {
            return Err(WalletApiError::QueryError { status: 409, message: format!("{id} already exists") });
        }
        let value = to_value(resource)?;
        map.insert(id.clone(), value.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);
        trace!("Inserted {id}");
        from_value(value)
    }

    fn patch<T: Serialize + DeserializeOwned>(
        &self,
        store: &Mutex<HashMap<String, Value>>,
        id: &str,
        patch: &T,
    ) -> Result<T, WalletApiError> {
        let mut map = lock(store)?;
        let stored = map.get(id).cloned().ok_or_else(|| WalletApiError::NotFound(id.to_string()))?;
        if let (Value::Object(mut merged), Value::Object(patch)) = (stored, to_value(patch)?) {
            merged.extend(patch);
            map.insert(id.to_string(), Value::Object(merged));
        }
        self.patches.fetch_add(1, Ordering::SeqCst);
        trace!("Patched {id}");
        get_locked(&map, id)
    }
}

type Collection = HashMap<String, Value>;

fn lock(store: &Mutex<Collection>) -> Result<MutexGuard<'_, Collection>, WalletApiError> {
    store.lock().map_err(|e| WalletApiError::RestResponseError(e.to_string()))
}

fn to_value<T: Serialize>(resource: &T) -> Result<Value, WalletApiError> {
    serde_json::to_value(resource).map_err(|e| WalletApiError::JsonError(e.to_string()))
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, WalletApiError> {
    serde_json::from_value(value).map_err(|e| WalletApiError::JsonError(e.to_string()))
}

fn put<T: Serialize>(store: &Mutex<HashMap<String, Value>>, id: String, resource: &T) {
    if let (Ok(mut map), Ok(value)) = (store.lock(), serde_json::to_value(resource)) {
        map.insert(id, value);
    }
}

fn get<T: DeserializeOwned>(store: &Mutex<HashMap<String, Value>>, id: &str) -> Result<T, WalletApiError> {
    let map = lock(store)?;
    get_locked(&map, id)
}

fn get_locked<T: DeserializeOwned>(map: &HashMap<String, Value>, id: &str) -> Result<T, WalletApiError> {
    let value = map.get(id).cloned().ok_or_else(|| WalletApiError::NotFound(id.to_string()))?;
    from_value(value)
}

impl WalletObjects for MemoryWalletStore {
    async fn fetch_class(&self, resource_id: &str) -> Result<LoyaltyClass, WalletApiError> {
        get(&self.classes, resource_id)
    }

    async fn insert_class(&self, class: &LoyaltyClass) -> Result<LoyaltyClass, WalletApiError> {
        self.insert(&self.classes, class.id.as_ref(), class)
    }

    async fn patch_class(&self, resource_id: &str, patch: &LoyaltyClass) -> Result<LoyaltyClass, WalletApiError> {
        self.patch(&self.classes, resource_id, patch)
    }

    async fn fetch_object(&self, resource_id: &str) -> Result<LoyaltyObject, WalletApiError> {
        get(&self.objects, resource_id)
    }

    async fn insert_object(&self, object: &LoyaltyObject) -> Result<LoyaltyObject, WalletApiError> {
        self.insert(&self.objects, object.id.as_ref(), object)
    }

    async fn patch_object(&self, resource_id: &str, patch: &LoyaltyObject) -> Result<LoyaltyObject, WalletApiError> {
        self.patch(&self.objects, resource_id, patch)
    }
}
