use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{Result, ServiceError};
use crate::models::{filter_eq, parse_id, DeleteOutcome, Document, Filter, User, PHONE_NUMBER_FIELD};
use crate::store::UserStore;

/// MockUserStore is a simple in-memory implementation of UserStore for testing.
/// Documents keep insertion order, like a table scan on a fresh table.
pub struct MockUserStore {
    documents: Mutex<Vec<Document>>,
    failing: bool,
}

impl MockUserStore {
    /// Create a new empty MockUserStore
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    /// Create a MockUserStore with initial test data.
    /// Users without an id get one assigned.
    pub fn with_data(users: Vec<User>) -> Self {
        let store = Self::new();

        {
            let mut documents = store.documents.lock().unwrap();
            for mut user in users {
                user.id.get_or_insert_with(Uuid::new_v4);
                documents.push(Document::from_user(&user).unwrap());
            }
        }

        store
    }

    /// Create a MockUserStore where every operation fails like an unreachable store
    pub fn failing() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    /// Number of stored documents
    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    fn check_available(&self) -> Result<()> {
        if self.failing {
            Err(ServiceError::InternalError(
                "Mock store is unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn remove_where(&self, predicate: impl Fn(&Document) -> bool) -> DeleteOutcome {
        let mut documents = self.documents.lock().unwrap();
        match documents.iter().position(|d| predicate(d)) {
            Some(index) => {
                documents.remove(index);
                DeleteOutcome::deleted(1)
            }
            None => DeleteOutcome::deleted(0),
        }
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_all(&self) -> Result<Vec<Document>> {
        self.check_available()?;
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Document>> {
        self.check_available()?;
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.matches(filter))
            .cloned()
            .collect())
    }

    async fn upsert_one(&self, mut user: User) -> Result<User> {
        self.check_available()?;
        user.id.get_or_insert_with(Uuid::new_v4);
        let document = Document::from_user(&user)?;

        let mut documents = self.documents.lock().unwrap();
        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }

        Ok(user)
    }

    async fn delete_one_by_phone_number(&self, phone_number: &str) -> Result<DeleteOutcome> {
        self.check_available()?;
        let filter = filter_eq(PHONE_NUMBER_FIELD, phone_number);
        Ok(self.remove_where(|d| d.matches(&filter)))
    }

    async fn delete_one_by_object_id(&self, id: &str) -> Result<DeleteOutcome> {
        self.check_available()?;
        let id = parse_id(id)?;
        Ok(self.remove_where(|d| d.id == id))
    }
}
