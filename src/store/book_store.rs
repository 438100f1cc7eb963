//! The single connection handle to the `books` collection.

use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::results::{DeleteResult, UpdateResult};
use mongodb::{Client, Collection, Database};

use super::errors::{StoreError, StoreResult};
use crate::books::Book;
use crate::observability::Logger;
use crate::query::{explain_command, Filter, FindSpec, IndexSpec};

/// Database the demo runs against unless told otherwise
pub const DEFAULT_DATABASE: &str = "plp_bookstore";

/// Collection the demo runs against unless told otherwise
pub const DEFAULT_COLLECTION: &str = "books";

/// Where to connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl StoreConfig {
    /// The demo's database and collection on the given server
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

/// Client plus collection handle.
///
/// Opened once, closed once: [`BookStore::close`] consumes the store.
pub struct BookStore {
    client: Client,
    database: Database,
    books: Collection<Document>,
}

impl BookStore {
    /// Parses the connection string and builds the handle.
    ///
    /// No round trip happens here; call [`BookStore::ping`] to check the
    /// server is reachable.
    pub async fn open(config: &StoreConfig) -> StoreResult<Self> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(StoreError::InvalidUri)?;
        let database = client.database(&config.database);
        let books = database.collection::<Document>(&config.collection);

        Ok(Self {
            client,
            database,
            books,
        })
    }

    /// Round trip to the server
    pub async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(StoreError::Connect)?;

        Logger::info(
            "STORE_CONNECTED",
            &[
                ("collection", self.collection_name()),
                ("database", self.database_name()),
            ],
        );
        Ok(())
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    pub fn collection_name(&self) -> &str {
        self.books.name()
    }

    /// Runs a find and drains the cursor
    pub async fn find(&self, spec: &FindSpec) -> StoreResult<Vec<Document>> {
        let cursor = self
            .books
            .find(spec.filter_document())
            .with_options(spec.options())
            .await
            .map_err(StoreError::operation("find"))?;

        cursor
            .try_collect()
            .await
            .map_err(StoreError::operation("find"))
    }

    /// Applies `update` to the first document matching `filter`
    pub async fn update_one(&self, filter: &Filter, update: Document) -> StoreResult<UpdateResult> {
        self.books
            .update_one(filter.to_document(), update)
            .await
            .map_err(StoreError::operation("update_one"))
    }

    /// Removes the first document matching `filter`
    pub async fn delete_one(&self, filter: &Filter) -> StoreResult<DeleteResult> {
        self.books
            .delete_one(filter.to_document())
            .await
            .map_err(StoreError::operation("delete_one"))
    }

    /// Runs a pipeline and drains the cursor
    pub async fn aggregate(&self, pipeline: &[Document]) -> StoreResult<Vec<Document>> {
        let cursor = self
            .books
            .aggregate(pipeline.to_vec())
            .await
            .map_err(StoreError::operation("aggregate"))?;

        cursor
            .try_collect()
            .await
            .map_err(StoreError::operation("aggregate"))
    }

    /// Creates the index if it does not exist; returns its name
    pub async fn create_index(&self, spec: &IndexSpec) -> StoreResult<String> {
        let created = self
            .books
            .create_index(spec.to_model())
            .await
            .map_err(StoreError::operation("create_index"))?;

        Ok(created.index_name)
    }

    pub async fn list_index_names(&self) -> StoreResult<Vec<String>> {
        self.books
            .list_index_names()
            .await
            .map_err(StoreError::operation("list_indexes"))
    }

    /// Raw explain response for a find at `executionStats` verbosity
    pub async fn explain(&self, spec: &FindSpec) -> StoreResult<Document> {
        self.database
            .run_command(explain_command(self.collection_name(), spec))
            .await
            .map_err(StoreError::operation("explain"))
    }

    /// Inserts records; returns how many were stored
    pub async fn insert_books(&self, books: &[Book]) -> StoreResult<usize> {
        if books.is_empty() {
            return Ok(0);
        }

        let inserted = self
            .books
            .clone_with_type::<Book>()
            .insert_many(books)
            .await
            .map_err(StoreError::operation("insert_many"))?;

        Ok(inserted.inserted_ids.len())
    }

    pub async fn count(&self, filter: &Filter) -> StoreResult<u64> {
        self.books
            .count_documents(filter.to_document())
            .await
            .map_err(StoreError::operation("count_documents"))
    }

    /// Drops the collection with its indexes
    pub async fn drop_collection(&self) -> StoreResult<()> {
        self.books
            .drop()
            .await
            .map_err(StoreError::operation("drop_collection"))
    }

    /// Drops the whole database
    pub async fn drop_database(&self) -> StoreResult<()> {
        self.database
            .drop()
            .await
            .map_err(StoreError::operation("drop_database"))
    }

    /// Releases the connection.
    pub async fn close(self) {
        self.client.shutdown().await;
        Logger::info("STORE_CLOSED", &[]);
    }
}
