use async_trait::async_trait;
use na_core::{Error, Result, Storage};
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn get_error_message() -> &'static str;

    /// Open the backend; `url` overrides its default location.
    async fn new(url: Option<&str>) -> Result<Self> where Self: Sized;
}

pub fn available_backends() -> Vec<&'static str> {
    let mut backends = vec!["memory"];
    #[cfg(feature = "sqlite")]
    backends.push("sqlite");
    backends
}

/// Open the storage backend registered under `kind`.
pub async fn create_storage(kind: &str, url: Option<&str>) -> Result<Arc<dyn Storage>> {
    let storage: Arc<dyn Storage> = match kind {
        "memory" => Arc::new(open::<MemoryStorage>(url).await?),
        #[cfg(feature = "sqlite")]
        "sqlite" => Arc::new(open::<SQLiteStorage>(url).await?),
        other => {
            return Err(Error::Config(format!(
                "Unknown storage backend '{}'. Available backends: {}",
                other,
                available_backends().join(", ")
            )))
        }
    };
    info!("Opened {} storage", kind);
    Ok(storage)
}

async fn open<T: StorageBackend>(url: Option<&str>) -> Result<T> {
    T::new(url)
        .await
        .map_err(|e| Error::Storage(format!("{} ({})", T::get_error_message(), e)))
}

pub mod prelude {
    pub use super::{available_backends, create_storage, StorageBackend};
    pub use super::backends::*;
}
