//! Connection lifetime around a unit of work.

use std::io::Write;

use futures_util::future::LocalBoxFuture;

use super::errors::{RunError, RunResult};
use super::plan::demo_plan;
use super::report::Reporter;
use super::runner::{QueryRunner, RunSummary};
use crate::books::Book;
use crate::observability::Logger;
use crate::store::{BookStore, StoreConfig};

/// Opens the store, checks it is reachable, runs `work`, and closes the
/// store exactly once whatever the outcome.
///
/// If the connection string itself is unusable there is nothing to close.
pub async fn with_store<T, F>(config: &StoreConfig, work: F) -> RunResult<T>
where
    F: for<'s> FnOnce(&'s BookStore) -> LocalBoxFuture<'s, RunResult<T>>,
{
    let store = BookStore::open(config).await?;

    let result = match store.ping().await {
        Ok(()) => work(&store).await,
        Err(e) => Err(RunError::from(e)),
    };

    store.close().await;
    result
}

/// Runs the full demonstration, reporting through `reporter`.
pub async fn run_demo<W>(config: &StoreConfig, reporter: Reporter<W>) -> RunResult<RunSummary>
where
    W: Write + 'static,
{
    with_store(config, move |store| {
        Box::pin(async move {
            let plan = demo_plan();
            QueryRunner::new(store, reporter).run(&plan).await
        })
    })
    .await
}

/// Loads `books` into the collection, dropping it first when `reset` is set.
pub async fn seed(config: &StoreConfig, books: Vec<Book>, reset: bool) -> RunResult<usize> {
    with_store(config, move |store| {
        Box::pin(async move {
            if reset {
                store.drop_collection().await?;
                Logger::info("COLLECTION_DROPPED", &[("collection", store.collection_name())]);
            }

            let inserted = store.insert_books(&books).await?;
            let inserted_str = inserted.to_string();
            Logger::info(
                "COLLECTION_SEEDED",
                &[
                    ("collection", store.collection_name()),
                    ("inserted", inserted_str.as_str()),
                ],
            );
            Ok::<_, RunError>(inserted)
        })
    })
    .await
}
