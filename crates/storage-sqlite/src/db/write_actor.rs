//! Single-writer actor for the SQLite store.
//!
//! SQLite allows one writer at a time. All mutations funnel through one
//! dedicated connection owned by a background task, and each job runs inside
//! an immediate transaction, so a partially applied write (e.g. a price row
//! with a dangling asset reference) is never observable and concurrent
//! upserts of the same key serialize in commit order.

use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use secmaster_core::errors::{Error, Result};

use super::DbPool;
use crate::errors::StorageError;

/// Carries the job's typed error through diesel's transaction combinator,
/// which needs `From<diesel::result::Error>` for commit/rollback failures.
struct TxError(Error);

impl From<diesel::result::Error> for TxError {
    fn from(e: diesel::result::Error) -> Self {
        TxError(StorageError::QueryFailed(e).into())
    }
}

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending write jobs to the writer task.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, ErasedReply)>,
}

impl WriteHandle {
    /// Runs `job` inside one immediate transaction on the writer's
    /// connection and returns its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer task stopped while the store is still in use");

        ret_rx
            .await
            .expect("writer task dropped a reply without sending a result")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer job result had an unexpected type"))
            })
    }
}

/// Spawns the writer task over a dedicated connection from `pool`.
pub fn spawn_writer(pool: &DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, ErasedReply)>(1024);

    let mut conn = pool
        .get()
        .expect("failed to reserve the writer connection from the pool");

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, TxError, _>(|c| job(c).map_err(TxError))
                .map_err(|TxError(e)| e);

            // Receiver may have given up (timeout/cancel); nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
