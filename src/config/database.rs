use crate::{
    constants::{
        DEFAULT_DB_NAME, MONGODB_URI, STORE_CONNECT_ATTEMPTS, STORE_RETRY_COOLDOWN_MS,
        STORE_RETRY_DELAY_MS, STORE_TIMEOUT_MS,
    },
    errors::{ServiceError, ServiceResult},
};
use log::{info, warn};
use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc},
    error::Error as MongoError,
    options::ClientOptions,
};
use std::{
    str::FromStr,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};
use tokio::sync::OnceCell;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub connect_attempts: u32,
    pub retry_delay: Duration,
    pub server_selection_timeout: Duration,
    /// How long a failed connection cycle is reported as-is before the next
    /// caller may run the retry policy again.
    pub retry_cooldown: Duration,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            uri: MONGODB_URI.clone(),
            connect_attempts: parse_or(&STORE_CONNECT_ATTEMPTS, 3),
            retry_delay: Duration::from_millis(parse_or(&STORE_RETRY_DELAY_MS, 500)),
            server_selection_timeout: Duration::from_millis(parse_or(&STORE_TIMEOUT_MS, 5000)),
            retry_cooldown: Duration::from_millis(parse_or(&STORE_RETRY_COOLDOWN_MS, 30_000)),
        }
    }
}

#[cfg(test)]
impl StoreConfig {
    /// Single quick attempt against a port nothing listens on.
    pub fn unreachable() -> Self {
        Self {
            uri: "mongodb://127.0.0.1:1/agrioth_test".to_string(),
            connect_attempts: 1,
            retry_delay: Duration::from_millis(10),
            server_selection_timeout: Duration::from_millis(100),
            retry_cooldown: Duration::from_secs(30),
        }
    }
}

fn parse_or<T: FromStr>(raw: &str, fallback: T) -> T {
    raw.trim().parse().unwrap_or(fallback)
}

pub async fn connect_to_database(config: &StoreConfig) -> Result<Database, MongoError> {
    let mut client_options = ClientOptions::parse(config.uri.as_str()).await?;
    client_options.server_selection_timeout = Some(config.server_selection_timeout);
    client_options.connect_timeout = Some(config.server_selection_timeout);

    let client = Client::with_options(client_options)?;
    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DB_NAME));

    database.run_command(doc! { "ping": 1 }).await?;
    Ok(database)
}

/// Lazily connected handle on the dashboard database.
///
/// The first operation that needs the store connects with the bounded retry
/// policy of [`StoreConfig`]. A successful connection is kept for the life of
/// the handle and the driver pool takes care of dropped sockets from then on.
/// A failed cycle leaves the handle empty and is remembered: callers inside
/// the cooldown get `StoreUnreachable` at once, the first caller after it
/// runs the policy again.
pub struct Store {
    config: StoreConfig,
    database: OnceCell<Database>,
    last_failure: Mutex<Option<(Instant, String)>>,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            database: OnceCell::new(),
            last_failure: Mutex::new(None),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.database.initialized()
    }

    pub async fn database(&self) -> ServiceResult<&Database> {
        if let Some(database) = self.database.get() {
            return Ok(database);
        }
        self.recent_failure()?;
        self.database
            .get_or_try_init(|| self.connect_with_retry())
            .await
    }

    fn recent_failure(&self) -> ServiceResult<()> {
        let last_failure = self
            .last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match last_failure.as_ref() {
            Some((at, reason)) if at.elapsed() < self.config.retry_cooldown => {
                Err(ServiceError::StoreUnreachable(reason.clone()))
            }
            _ => Ok(()),
        }
    }

    fn record_failure(&self, reason: String) {
        *self
            .last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some((Instant::now(), reason));
    }

    pub async fn collection(&self, name: &str) -> ServiceResult<Collection<Document>> {
        Ok(self.database().await?.collection::<Document>(name))
    }

    pub async fn collection_exists(&self, name: &str) -> ServiceResult<bool> {
        let names = self.database().await?.list_collection_names().await?;
        Ok(names.iter().any(|existing| existing == name))
    }

    async fn connect_with_retry(&self) -> ServiceResult<Database> {
        // Callers queued behind a cycle that just failed.
        self.recent_failure()?;

        let attempts = self.config.connect_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match connect_to_database(&self.config).await {
                Ok(database) => {
                    info!(
                        "Connected to database '{}' (attempt {}/{})",
                        database.name(),
                        attempt,
                        attempts
                    );
                    return Ok(database);
                }
                Err(err) => {
                    warn!(
                        "Database connection attempt {}/{} failed: {}",
                        attempt, attempts, err
                    );
                    last_error = err.to_string();
                    if attempt < attempts {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        self.record_failure(last_error.clone());
        Err(ServiceError::StoreUnreachable(last_error))
    }
}
