use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use log::{debug, info};
use serde_dynamo::{from_item, to_attribute_value, to_item};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::env;
use uuid::Uuid;

use crate::error::{map_delete_dynamo_error, map_put_dynamo_error, map_scan_dynamo_error, Result};
use crate::models::{
    filter_eq, parse_id, DeleteOutcome, Document, Filter, User, ID_FIELD, PHONE_NUMBER_FIELD,
};

const TABLE_NAME: &str = "users-table";

/// DynamoDB store for users
pub struct DynamoUserStore {
    client: Client,
    table_name: String,
}

impl DynamoUserStore {
    /// Creates a new DynamoDB store
    pub async fn new() -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        // Point at a local DynamoDB when an endpoint override is configured
        if let Ok(endpoint) = env::var("DYNAMODB_ENDPOINT_URL") {
            info!("Using DynamoDB endpoint override: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;
        let client = Client::new(&config);

        // Use environment variable for table name if available
        let table_name =
            env::var("DYNAMODB_USERS_TABLE").unwrap_or_else(|_| TABLE_NAME.to_string());

        Self { client, table_name }
    }

    /// Creates a new DynamoDB store with the specified client and table name.
    /// This is mainly useful for testing with a local DynamoDB instance.
    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// Scans the table, following pagination, keeping items that match the filter
    async fn scan(&self, filter: &Filter) -> Result<Vec<Document>> {
        let mut request = self.client.scan().table_name(&self.table_name);

        if !filter.is_empty() {
            let mut expr_attr_names = HashMap::new();
            let mut expr_attr_values = HashMap::new();
            let mut conditions = Vec::with_capacity(filter.len());

            for (i, (field, value)) in filter.iter().enumerate() {
                let attribute_value: AttributeValue = to_attribute_value(value)?;
                expr_attr_names.insert(format!("#f{}", i), field.clone());
                expr_attr_values.insert(format!(":v{}", i), attribute_value);
                conditions.push(format!("#f{} = :v{}", i, i));
            }

            request = request
                .filter_expression(conditions.join(" AND "))
                .set_expression_attribute_names(Some(expr_attr_names))
                .set_expression_attribute_values(Some(expr_attr_values));
        }

        let mut documents = Vec::new();
        let mut last_key = None;
        loop {
            let response = request
                .clone()
                .set_exclusive_start_key(last_key)
                .send()
                .await
                .map_err(map_scan_dynamo_error)?;

            for item in response.items() {
                let fields: Map<String, Value> = from_item(item.clone())?;
                documents.push(Document::from_fields(fields)?);
            }

            last_key = response.last_evaluated_key().cloned();
            if last_key.is_none() {
                break;
            }
        }

        debug!(
            "Scanned table '{}' with {} filter field(s): {} document(s)",
            self.table_name,
            filter.len(),
            documents.len()
        );
        Ok(documents)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<DeleteOutcome> {
        let response = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_FIELD, AttributeValue::S(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(map_delete_dynamo_error)?;

        // ALL_OLD only returns attributes when an item was actually removed
        let deleted_count = u64::from(response.attributes().is_some());
        debug!("Deleted user {}: deleted_count={}", id, deleted_count);

        Ok(DeleteOutcome::deleted(deleted_count))
    }
}

#[async_trait]
impl super::UserStore for DynamoUserStore {
    async fn find_all(&self) -> Result<Vec<Document>> {
        self.scan(&Filter::new()).await
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Document>> {
        self.scan(filter).await
    }

    /// Replaces the whole item; a user without an id is stored under a fresh one
    async fn upsert_one(&self, mut user: User) -> Result<User> {
        let id = *user.id.get_or_insert_with(Uuid::new_v4);
        let item = to_item(&user)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_put_dynamo_error)?;

        debug!("Upserted user {} into '{}'", id, self.table_name);
        Ok(user)
    }

    async fn delete_one_by_phone_number(&self, phone_number: &str) -> Result<DeleteOutcome> {
        let matches = self.scan(&filter_eq(PHONE_NUMBER_FIELD, phone_number)).await?;

        match matches.first() {
            Some(document) => self.delete_by_id(document.id).await,
            None => {
                debug!("No user with phone number {} to delete", phone_number);
                Ok(DeleteOutcome::deleted(0))
            }
        }
    }

    async fn delete_one_by_object_id(&self, id: &str) -> Result<DeleteOutcome> {
        let id = parse_id(id)?;
        self.delete_by_id(id).await
    }
}
