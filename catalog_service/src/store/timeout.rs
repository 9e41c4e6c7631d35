use std::{
    fmt::{self, Display, Formatter},
    future::Future,
    time::Duration,
};

use tracing::warn;

use crate::error::{AppError, AppResult};

/// Class of a store call, which fixes its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallClass {
    /// Connection establishment at process start.
    Connect,
    /// Single-document writes and reads by primary identifier.
    Point,
    /// Reads that walk a cursor, full collection scans and batch lookups.
    Scan,
}

impl Display for CallClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => f.write_str("connect"),
            Self::Point => f.write_str("point"),
            Self::Scan => f.write_str("scan"),
        }
    }
}

/// Hard per-call deadlines for store access.
///
/// A deadline is not a retry budget: when it expires the call fails with
/// [`AppError::StoreTimeout`] and nothing is attempted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub connect: Duration,
    pub point: Duration,
    pub scan: Duration,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl StoreTimeouts {
    pub const DEFAULT: Self = Self {
        connect: Duration::from_secs(10),
        point: Duration::from_secs(5),
        scan: Duration::from_secs(30),
    };

    pub const fn get(&self, class: CallClass) -> Duration {
        match class {
            CallClass::Connect => self.connect,
            CallClass::Point => self.point,
            CallClass::Scan => self.scan,
        }
    }

    /// Runs a store call under the deadline of its class.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreTimeout`] if the call does not complete in time, or
    /// whatever error the call itself produced.
    pub async fn bound<F, T>(&self, class: CallClass, call: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let after = self.get(class);
        match tokio::time::timeout(after, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%class, ?after, "Store call timed out");
                Err(AppError::StoreTimeout { class, after })
            }
        }
    }
}
