use crate::storage::RemoteStorage;
use crate::store::RecordStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub remote: RemoteStorage,
    pub store: Arc<Mutex<RecordStore>>,
}

impl AppState {
    pub fn new(remote: RemoteStorage) -> Self {
        Self {
            remote,
            store: Arc::new(Mutex::new(RecordStore::default())),
        }
    }
}
