//! Store gateway.
//!
//! Owns the single connection to the document store and hands out typed
//! collections. All store calls go through [`StoreGateway::bound`] so each one is
//! subject to the deadline of its [`CallClass`].

use std::future::Future;

use bson::doc;
use mongodb::{Client, Collection, Database, options::ClientOptions};
use tracing::{info, instrument};

use crate::error::{AppError, AppResult};

use self::timeout::{CallClass, StoreTimeouts};

/// Per-call deadlines.
pub mod timeout;

pub const AUTHORS_COLLECTION: &str = "authors";
pub const BOOKS_COLLECTION: &str = "books";

/// Connection to the document store.
///
/// Cloning is cheap and every clone shares the same underlying client and its
/// connection pool, which is safe for concurrent use.
#[derive(Debug, Clone)]
pub struct StoreGateway {
    database: Database,
    timeouts: StoreTimeouts,
}

/// Builds driver options from a connection string.
///
/// Driver-level retries are disabled: a failed call surfaces as it is.
async fn client_options(uri: &str, timeouts: &StoreTimeouts) -> AppResult<ClientOptions> {
    let connect_timeout = timeouts.get(CallClass::Connect);

    let mut options = ClientOptions::parse(uri).await?;
    options.connect_timeout = Some(connect_timeout);
    options.server_selection_timeout = Some(connect_timeout);
    options.retry_reads = Some(false);
    options.retry_writes = Some(false);

    Ok(options)
}

impl StoreGateway {
    /// Connects to the store and verifies the connection with a `ping`.
    ///
    /// Meant to be called once at process start.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StartupFailure`] if the URI is invalid or the server does
    /// not answer within the connect deadline.
    #[instrument(skip(uri))]
    pub async fn connect(uri: &str, database: &str, timeouts: StoreTimeouts) -> AppResult<Self> {
        let database = timeouts
            .bound(CallClass::Connect, async {
                let options = client_options(uri, &timeouts).await?;
                let client = Client::with_options(options)?;
                let database = client.database(database);
                database.run_command(doc! { "ping": 1 }).await?;
                Ok::<_, AppError>(database)
            })
            .await
            .map_err(AppError::startup)?;

        info!(database = %database.name(), "Connected to store");

        Ok(Self { database, timeouts })
    }

    /// Runs a store call under the deadline of its class.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreTimeout`] on expiry, or the call's own error.
    pub async fn bound<F, T>(&self, class: CallClass, call: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.timeouts.bound(class, call).await
    }

    pub fn authors<T: Send + Sync>(&self) -> Collection<T> {
        self.database.collection(AUTHORS_COLLECTION)
    }

    pub fn books<T: Send + Sync>(&self) -> Collection<T> {
        self.database.collection(BOOKS_COLLECTION)
    }
}
