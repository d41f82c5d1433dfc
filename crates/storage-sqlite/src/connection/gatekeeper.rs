// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU64,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{sync::RwLock, task::spawn_blocking, time::sleep};

use crate::{Error, Result};

use super::{ConnectionPool, PooledConnection, get_pooled_connection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub acquire_read_timeout_millis: NonZeroU64,
    pub acquire_write_timeout_millis: NonZeroU64,
}

/// Manage database connections for asynchronous tasks
///
/// Only a single writer is allowed to access the `SQLite` database
/// at any given time. This is required to prevent both synchronous
/// locking when obtaining a connection and timeouts when concurrently
/// trying to execute write operations on a shared `SQLite` database
/// instance.
#[allow(missing_debug_implementations)]
pub struct Gatekeeper {
    connection_pool: Arc<RwLock<ConnectionPool>>,
    acquire_read_timeout: Duration,
    acquire_write_timeout: Duration,
    decommissioned: AtomicBool,
}

impl Gatekeeper {
    #[must_use]
    pub fn new(connection_pool: ConnectionPool, config: Config) -> Self {
        let Config {
            acquire_read_timeout_millis,
            acquire_write_timeout_millis,
        } = config;
        let acquire_read_timeout = Duration::from_millis(acquire_read_timeout_millis.get());
        let acquire_write_timeout = Duration::from_millis(acquire_write_timeout_millis.get());
        Self {
            connection_pool: Arc::new(RwLock::new(connection_pool)),
            acquire_read_timeout,
            acquire_write_timeout,
            decommissioned: AtomicBool::new(false),
        }
    }

    pub fn decommission(&self) {
        self.decommissioned.store(true, Ordering::Release);
    }

    fn check_not_decommissioned(&self) -> Result<()> {
        if self.decommissioned.load(Ordering::Acquire) {
            return Err(Error::TaskTimeout {
                reason: "connection pool has been decommissioned".to_string(),
            });
        }
        Ok(())
    }

    pub async fn spawn_blocking_read_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let timeout = sleep(self.acquire_read_timeout);
        tokio::pin!(timeout);
        tokio::select! {
            () = &mut timeout => Err(Error::TaskTimeout { reason: "database is locked".to_string() }),
            guard = self.connection_pool.read() => {
                self.check_not_decommissioned()?;
                let connection = get_pooled_connection(&guard)?;
                spawn_blocking(move || connection_handler(connection)).await
                    .map_err(Error::TaskScheduling)
            },
        }
    }

    pub async fn spawn_blocking_write_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let timeout = sleep(self.acquire_write_timeout);
        tokio::pin!(timeout);
        tokio::select! {
            () = &mut timeout => Err(Error::TaskTimeout { reason: "database is locked".to_string() }),
            guard = self.connection_pool.write() => {
                self.check_not_decommissioned()?;
                let connection = get_pooled_connection(&guard)?;
                spawn_blocking(move || connection_handler(connection)).await
                    .map_err(Error::TaskScheduling)
            },
        }
    }
}
