//! Common test utilities and fixtures.
//!
//! Shared model types and adapter constructors used across the test suite.

#![allow(dead_code)]

use std::sync::Arc;

use kv_adapter::{Adapter, MemoryStore};
use serde::{Deserialize, Serialize};

// =============================================================================
// Model Types
// =============================================================================

/// Minimal record, the shape most tests store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestModel {
    pub id: i64,
}

/// Shares the `User` prefix with [`UserProfile`] for substring removal tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: User,
    pub bio: Option<String>,
}

/// Unrelated to `User`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub expires_at: u64,
}

/// Exercises every shape the JSON codec is expected to round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub revision: u32,
    pub published: bool,
    pub score: f64,
    pub subtitle: Option<String>,
    pub author: User,
    pub tags: Vec<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub words: Option<u32>,
}

// =============================================================================
// Test Adapters
// =============================================================================

/// A current-strategy adapter and the store it writes to.
pub fn memory_adapter() -> (Adapter<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (Adapter::shared(Arc::clone(&store)), store)
}

/// A legacy-strategy adapter and the store it writes to.
pub fn legacy_memory_adapter() -> (Adapter<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (Adapter::legacy(Arc::clone(&store)), store)
}

pub fn sample_document() -> Document {
    Document {
        title: "Storage keys".to_string(),
        revision: 3,
        published: true,
        score: 0.1 + 0.2,
        subtitle: None,
        author: User {
            name: "adam".to_string(),
        },
        tags: vec!["kv".to_string(), "serde".to_string()],
        sections: vec![
            Section {
                heading: "Legacy".to_string(),
                words: Some(120),
            },
            Section {
                heading: "Current".to_string(),
                words: None,
            },
        ],
    }
}
