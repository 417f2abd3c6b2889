use serde_json::json;
use uuid::Uuid;

use crate::models::{filter_eq, User};
use crate::store::{dynamo::DynamoUserStore, UserStore};
use crate::test_utils::dynamo_test_utils::{
    clear_dynamo_table, create_dynamo_client, create_users_table, use_dynamodb,
};
use crate::test_utils::test_logging::init_test_logging;

const TEST_TABLE_NAME: &str = "users-test-table";

async fn create_test_store() -> DynamoUserStore {
    let client = create_dynamo_client().await;
    if let Err(e) = create_users_table(&client, TEST_TABLE_NAME).await {
        eprintln!("Error setting up test table: {}", e);
    }
    clear_dynamo_table(&client, TEST_TABLE_NAME).await;
    DynamoUserStore::with_client_and_table(client, TEST_TABLE_NAME.to_string())
}

// Runs against a local DynamoDB; skipped unless USE_DYNAMODB=true
#[tokio::test]
async fn test_dynamo_user_store_lifecycle() {
    init_test_logging();
    if !use_dynamodb() {
        println!("Skipping DynamoDB test, set USE_DYNAMODB=true to run it");
        return;
    }

    let store = create_test_store().await;

    let saved = store
        .upsert_one(User {
            phone_number: Some("+15551234".to_string()),
            first_name: Some("Ada".to_string()),
            is_active: Some(true),
            ..User::default()
        })
        .await
        .unwrap();
    let id = saved.id.unwrap();

    let all = store.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(all[0].fields["first_name"], json!("Ada"));

    let by_phone = store
        .find(&filter_eq("phone_number", "+15551234"))
        .await
        .unwrap();
    assert_eq!(by_phone.len(), 1);

    let by_id = store
        .find(&filter_eq("id", id.to_string()))
        .await
        .unwrap();
    assert_eq!(by_id.len(), 1);

    let none = store
        .find(&filter_eq("phone_number", "+10000000"))
        .await
        .unwrap();
    assert!(none.is_empty());

    let outcome = store.delete_one_by_phone_number("+10000000").await.unwrap();
    assert_eq!(outcome.deleted_count, 0);

    let outcome = store
        .delete_one_by_object_id(&Uuid::new_v4().to_string())
        .await
        .unwrap();
    assert_eq!(outcome.deleted_count, 0);

    let outcome = store.delete_one_by_phone_number("+15551234").await.unwrap();
    assert_eq!(outcome.deleted_count, 1);
    assert!(store.find_all().await.unwrap().is_empty());
}
