use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DeleteOutcome, Document, Filter, User};

// Expose the DynamoDB store module
pub mod dynamo;

/// UserStore trait defining the interface for user storage implementations
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Returns every stored user document, in the store's natural order
    async fn find_all(&self) -> Result<Vec<Document>>;

    /// Returns documents whose fields equal every value in the filter
    async fn find(&self, filter: &Filter) -> Result<Vec<Document>>;

    /// Inserts or replaces a user keyed on its id, assigning one if missing
    async fn upsert_one(&self, user: User) -> Result<User>;

    /// Removes at most one user with the given phone number
    async fn delete_one_by_phone_number(&self, phone_number: &str) -> Result<DeleteOutcome>;

    /// Removes the user with the given identifier
    async fn delete_one_by_object_id(&self, id: &str) -> Result<DeleteOutcome>;
}
