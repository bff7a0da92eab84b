//! A simulated database connection, the canonical singleton resource.
//!
//! Every `DatabaseConnection` takes the next id from a process-wide sequence when it
//! is opened, which makes "how many connections were created" observable. The
//! `connected` flag lives in an atomic owned by the connection itself: whoever shares
//! the connection shares that flag, and a [`LazySingleton`](crate::LazySingleton)
//! does not guard it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use thiserror::Error;

/// Connection string used by [`DatabaseConnection::with_defaults`].
pub const DEFAULT_CONNECTION_STRING: &str = "postgresql://localhost:5432/mydb";

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseError {
    #[error("not connected to database (connection id {connection_id}); call connect() first")]
    NotConnected { connection_id: u64 },
}

/// What a simulated query reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub connection_id: u64,
    pub sql: String,
}

#[derive(Debug)]
pub struct DatabaseConnection {
    connection_string: String,
    connected: AtomicBool,
    connection_id: u64,
}

impl DatabaseConnection {
    /// Creates a disconnected connection with a fresh id.
    pub fn open(connection_string: impl Into<String>) -> Self {
        let connection_id = NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed);
        let connection_string = connection_string.into();

        log::info!("database connection instance created (id {connection_id})");

        Self {
            connection_string,
            connected: AtomicBool::new(false),
            connection_id,
        }
    }

    pub fn with_defaults() -> Self {
        Self::open(DEFAULT_CONNECTION_STRING)
    }

    /// Marks the connection as connected. Returns `false` if it already was.
    pub fn connect(&self) -> bool {
        let changed = self
            .connected
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();

        if changed {
            log::info!("connected to database (id {})", self.connection_id);
        } else {
            log::debug!("already connected to database (id {})", self.connection_id);
        }
        changed
    }

    /// Marks the connection as disconnected. Returns `false` if it was not connected.
    pub fn disconnect(&self) -> bool {
        let changed = self
            .connected
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();

        if changed {
            log::info!("disconnected from database (id {})", self.connection_id);
        }
        changed
    }

    /// Simulates running `sql`.
    ///
    /// # Errors
    ///
    /// - [`DatabaseError::NotConnected`] unless [`connect`](Self::connect) was called.
    pub fn query(&self, sql: &str) -> Result<QueryOutcome, DatabaseError> {
        if !self.is_connected() {
            return Err(DatabaseError::NotConnected {
                connection_id: self.connection_id,
            });
        }

        log::debug!("executing query: {sql} (connection id {})", self.connection_id);
        Ok(QueryOutcome {
            connection_id: self.connection_id,
            sql: sql.to_string(),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn connection_id(&self) -> u64 {
        self.connection_id
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}
