use axum::Router;
use std::sync::Arc;
use user_directory_shared::models::User;
use user_directory_shared::test_utils::mock_user_store::MockUserStore;
use user_directory_shared::test_utils::test_logging::init_test_logging;

use crate::routes;

/// Builds a router over a mock store seeded with the given users
pub fn create_test_app(users: Vec<User>) -> (Router, Arc<MockUserStore>) {
    init_test_logging();
    let store = Arc::new(MockUserStore::with_data(users));
    let app = routes::create_router_with_store(store.clone(), "");
    (app, store)
}

/// Builds a router whose store fails every call
pub fn create_failing_app() -> Router {
    init_test_logging();
    routes::create_router_with_store(Arc::new(MockUserStore::failing()), "")
}

pub fn test_user(phone_number: &str, first_name: &str) -> User {
    User {
        phone_number: Some(phone_number.to_string()),
        first_name: Some(first_name.to_string()),
        last_name: Some("Lovelace".to_string()),
        ads_enabled: Some(false),
        is_active: Some(true),
        ..User::default()
    }
}
