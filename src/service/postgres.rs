// PostgreSQL-backed hello-world service
//
// Every call checks out a pooled client and runs a single statement.

use super::{message_not_found, validate_request, HelloWorldService};
use crate::db::queries;
use crate::error::{unavailable_error, AppError};
use crate::models::{HelloWorldMessage, HelloWorldRequest};
use async_trait::async_trait;
use chrono::Utc;
use deadpool_postgres::{Object, Pool};
use tracing::{debug, info};

pub struct PgHelloWorldService {
    // None when the server runs without a database
    pool: Option<Pool>,
}

impl PgHelloWorldService {
    pub fn new(pool: Option<Pool>) -> Self {
        Self { pool }
    }

    async fn client(&self) -> Result<Object, AppError> {
        let pool = self.pool.as_ref().ok_or_else(unavailable_error)?;
        Ok(pool.get().await?)
    }
}

#[async_trait]
impl HelloWorldService for PgHelloWorldService {
    async fn create(&self, request: HelloWorldRequest) -> Result<HelloWorldMessage, AppError> {
        validate_request(&request)?;
        let client = self.client().await?;

        let message = HelloWorldMessage::greeting(&request.name);
        let now = Utc::now();
        let row = client
            .query_one(queries::INSERT_MESSAGE, &[&request.name, &message, &now, &now])
            .await
            .map_err(|e| AppError::Storage(format!("failed to create hello world message: {}", e)))?;

        let created = HelloWorldMessage::from(&row);
        info!("Hello world message created: {} (id: {})", created.name, created.id);
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<HelloWorldMessage>, AppError> {
        let client = self.client().await?;

        let rows = client
            .query(queries::LIST_MESSAGES, &[])
            .await
            .map_err(|e| AppError::Storage(format!("failed to query hello world messages: {}", e)))?;

        debug!("Listed {} hello world messages", rows.len());
        Ok(rows.iter().map(HelloWorldMessage::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<HelloWorldMessage, AppError> {
        let client = self.client().await?;

        let row = client
            .query_opt(queries::GET_MESSAGE_BY_ID, &[&id])
            .await
            .map_err(|e| AppError::Storage(format!("failed to get hello world message: {}", e)))?;

        row.as_ref().map(HelloWorldMessage::from).ok_or_else(message_not_found)
    }
}
