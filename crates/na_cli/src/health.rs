use na_core::{ArticleStorage, Error, Result, Storage};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const RETRY_DELAY: Duration = Duration::from_secs(2);

async fn check_storage(storage: &Arc<dyn Storage>) -> Result<()> {
    let articles = storage.list_articles().await?;
    info!("🏦 Storage holds {} articles", articles.len());
    Ok(())
}

/// Probe the store until it answers, at most `max_retries` times.
pub async fn check_storage_with_retry(
    storage: &Arc<dyn Storage>,
    storage_type: &str,
    max_retries: u32,
    timeout: Duration,
) -> Result<()> {
    let mut last_error = None;

    for attempt in 1..=max_retries {
        match tokio::time::timeout(timeout, check_storage(storage)).await {
            Ok(Ok(())) => {
                info!("🏦 Storage backend initialized successfully (using {})", storage_type);
                return Ok(());
            }
            Ok(Err(e)) => last_error = Some(e),
            Err(_) => {
                last_error = Some(Error::Storage(format!(
                    "Storage health check timed out after {:?}",
                    timeout
                )))
            }
        }

        if attempt < max_retries {
            warn!("Storage health check failed, retrying {}/{}...", attempt, max_retries);
            tokio::time::sleep(RETRY_DELAY).await;
        }
    }

    Err(last_error.unwrap_or_else(|| {
        Error::Storage("Storage health check failed after all retries".to_string())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use na_storage::backends::MemoryStorage;

    #[tokio::test]
    async fn test_healthy_storage() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        check_storage_with_retry(&storage, "memory", 3, Duration::from_secs(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_no_attempts_is_an_error() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let result = check_storage_with_retry(&storage, "memory", 0, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(Error::Storage(_))));
    }
}
