//! In-memory hello-world service
//!
//! Same observable behavior as the SQL implementation, without a database.
//! Ids are assigned sequentially from 1.

use super::{message_not_found, validate_request, HelloWorldService};
use crate::error::AppError;
use crate::models::{HelloWorldMessage, HelloWorldRequest};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Store {
    rows: Vec<HelloWorldMessage>,
    next_id: i32,
}

#[derive(Default)]
pub struct MemoryHelloWorldService {
    store: RwLock<Store>,
}

impl MemoryHelloWorldService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages
    pub async fn len(&self) -> usize {
        self.store.read().await.rows.len()
    }
}

#[async_trait]
impl HelloWorldService for MemoryHelloWorldService {
    async fn create(&self, request: HelloWorldRequest) -> Result<HelloWorldMessage, AppError> {
        validate_request(&request)?;

        let mut store = self.store.write().await;
        store.next_id += 1;

        let now = Utc::now();
        let row = HelloWorldMessage {
            id: store.next_id,
            message: HelloWorldMessage::greeting(&request.name),
            name: request.name,
            created_at: now,
            updated_at: now,
        };
        store.rows.push(row.clone());

        Ok(row)
    }

    async fn list(&self) -> Result<Vec<HelloWorldMessage>, AppError> {
        let mut rows = self.store.read().await.rows.clone();
        // Later inserts win ties on identical timestamps
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<HelloWorldMessage, AppError> {
        self.store
            .read()
            .await
            .rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or_else(message_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_rejects_empty_name_without_writing() {
        let service = MemoryHelloWorldService::new();

        let result = service.create(HelloWorldRequest::new("")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(service.len().await, 0);
    }

    #[tokio::test]
    async fn test_create_derives_message_from_name() {
        let service = MemoryHelloWorldService::new();

        for name in ["Alice", "  ", "名前", "O'Brien"] {
            let row = service.create(HelloWorldRequest::new(name)).await.unwrap();
            assert_eq!(row.name, name);
            assert_eq!(row.message, format!("Hello, {}!", name));
            assert_eq!(row.created_at, row.updated_at);
        }
    }

    #[tokio::test]
    async fn test_list_is_most_recent_first() {
        let service = MemoryHelloWorldService::new();
        let first = service.create(HelloWorldRequest::new("first")).await.unwrap();
        let second = service.create(HelloWorldRequest::new("second")).await.unwrap();
        let third = service.create(HelloWorldRequest::new("third")).await.unwrap();

        let ids: Vec<i32> = service.list().await.unwrap().iter().map(|m| m.id).collect();

        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn test_list_empty_is_not_an_error() {
        let service = MemoryHelloWorldService::new();
        assert_eq!(service.list().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_get_by_id_round_trip() {
        let service = MemoryHelloWorldService::new();
        let created = service.create(HelloWorldRequest::new("Carol")).await.unwrap();

        let fetched = service.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(service.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_get_by_id_unknown_is_not_found() {
        let service = MemoryHelloWorldService::new();
        service.create(HelloWorldRequest::new("Dave")).await.unwrap();

        for id in [0, -1, 2, i32::MAX] {
            assert!(matches!(service.get_by_id(id).await, Err(AppError::NotFound(_))));
        }
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let service = Arc::new(MemoryHelloWorldService::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.create(HelloWorldRequest::new(format!("user-{}", i))).await })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            let row = handle.await.unwrap().unwrap();
            assert!(ids.insert(row.id));
        }

        let listed: HashSet<i32> = service.list().await.unwrap().iter().map(|m| m.id).collect();
        assert_eq!(listed, ids);
    }
}
