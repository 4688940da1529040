// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory user store.
//!
//! Users live in insertion order and are looked up by linear scan. Nothing is
//! persisted; the store starts with two seed users on every boot.

use chrono::Utc;

use crate::error::ApiError;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: Vec<User>,
    last_id: i64,
}

fn user_not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("User with ID {id} not found"))
}

impl InMemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the two seed users (`1` and `2`).
    pub fn seeded() -> Self {
        let now = Utc::now();
        let users = vec![
            User {
                id: "1".to_string(),
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                created_at: now,
            },
            User {
                id: "2".to_string(),
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
                created_at: now,
            },
        ];
        Self { users, last_id: 0 }
    }

    pub fn list_users(&self) -> Vec<User> {
        self.users.clone()
    }

    pub fn get_user(&self, id: &str) -> Result<User, ApiError> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| user_not_found(id))
    }

    pub fn create_user(&mut self, request: CreateUserRequest) -> User {
        let user = User {
            id: self.next_id(),
            name: request.name,
            email: request.email,
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        user
    }

    pub fn update_user(&mut self, id: &str, request: UpdateUserRequest) -> Result<User, ApiError> {
        let user = self
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| user_not_found(id))?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        Ok(user.clone())
    }

    pub fn delete_user(&mut self, id: &str) -> Result<(), ApiError> {
        let index = self
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| user_not_found(id))?;
        self.users.remove(index);
        Ok(())
    }

    /// Creation time in epoch milliseconds, bumped to stay strictly increasing.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn create_request(name: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    #[test]
    fn seeded_store_has_two_users() {
        let store = InMemoryStore::seeded();
        let users = store.list_users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "John Doe");
        assert_eq!(store.get_user("2").unwrap().email, "jane@example.com");
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let mut store = InMemoryStore::new();
        let first = store.create_user(create_request("Alice"));
        let second = store.create_user(create_request("Bob"));

        let first_id: i64 = first.id.parse().unwrap();
        let second_id: i64 = second.id.parse().unwrap();
        assert!(second_id > first_id);
        assert_eq!(store.list_users(), vec![first, second]);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut store = InMemoryStore::seeded();
        let updated = store
            .update_user(
                "1",
                UpdateUserRequest {
                    name: Some("John Updated".into()),
                    email: None,
                },
            )
            .unwrap();
        assert_eq!(updated.name, "John Updated");
        assert_eq!(updated.email, "john@example.com");
        assert_eq!(store.get_user("1").unwrap(), updated);
    }

    #[test]
    fn missing_user_is_not_found() {
        let mut store = InMemoryStore::seeded();

        let err = store.get_user("99").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = store
            .update_user("99", UpdateUserRequest::default())
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = store.delete_user("99").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn delete_removes_user() {
        let mut store = InMemoryStore::seeded();
        store.delete_user("1").unwrap();
        assert_eq!(store.list_users().len(), 1);
        assert!(store.get_user("1").is_err());
    }
}
