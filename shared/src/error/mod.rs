use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

// Helper function to map Scan errors
pub fn map_scan_dynamo_error(err: SdkError<ScanError>) -> ServiceError {
    ServiceError::InternalError(format!("DynamoDB scan error: {}", err))
}

// Helper function to map DeleteItem errors
pub fn map_delete_dynamo_error(err: SdkError<DeleteItemError>) -> ServiceError {
    ServiceError::InternalError(format!("DynamoDB delete_item error: {}", err))
}

// Helper function to map PutItem errors
pub fn map_put_dynamo_error(err: SdkError<PutItemError>) -> ServiceError {
    ServiceError::InternalError(format!("DynamoDB put_item error: {}", err))
}

impl From<serde_dynamo::Error> for ServiceError {
    fn from(err: serde_dynamo::Error) -> Self {
        ServiceError::InternalError(format!("DynamoDB serialization error: {}", err))
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::InternalError(format!("JSON serialization error: {}", err))
    }
}
