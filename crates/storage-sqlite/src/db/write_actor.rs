//! Single-writer actor for SQLite. All mutations funnel through one OS
//! thread, and every job runs inside its own immediate transaction, so a
//! job either commits whole or leaves no trace.

use std::thread;

use diesel::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use opentodo_core::errors::{DatabaseError, Error, Result};

use super::DbPool;
use crate::errors::StorageError;

type WriteJob = Box<dyn FnOnce(&mut SqliteConnection) + Send + 'static>;

/// Cloneable handle to the writer thread. Dropping every handle shuts the
/// writer down once its queue drains.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::UnboundedSender<WriteJob>,
}

/// Carries the job's own failure through the transaction wrapper without
/// losing diesel errors raised by the wrapper itself.
enum TxError {
    App(Error),
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(err: diesel::result::Error) -> Self {
        TxError::Db(err)
    }
}

impl WriteHandle {
    pub async fn exec<T, F>(&self, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let wrapped: WriteJob = Box::new(move |conn| {
            let result = conn
                .immediate_transaction(|tx| job(tx).map_err(TxError::App))
                .map_err(|e| match e {
                    TxError::App(err) => err,
                    TxError::Db(err) => StorageError::from(err).into(),
                });
            let _ = reply_tx.send(result);
        });
        self.tx.send(wrapped).map_err(|_| writer_gone())?;
        reply_rx.await.map_err(|_| writer_gone())?
    }
}

fn writer_gone() -> Error {
    Error::Database(DatabaseError::Internal(
        "Database writer is unavailable".to_string(),
    ))
}

pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<WriteJob>();
    thread::spawn(move || {
        while let Some(job) = rx.blocking_recv() {
            match pool.get() {
                Ok(mut conn) => job(&mut conn),
                Err(e) => {
                    // Dropping the job closes the caller's reply channel.
                    error!("Writer could not obtain a connection: {}", e);
                }
            }
        }
    });
    WriteHandle { tx }
}
