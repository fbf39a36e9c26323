//! Tracklog events recording who produced an object and when

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
}

impl User {
    /// The user running this process, from `USER` or `USERNAME`
    pub fn current() -> Self {
        let id = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        Self { id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracklogEvent {
    pub datetime: DateTime<Utc>,
    pub user: User,
    pub event: String,
}

impl TracklogEvent {
    /// A `created` event stamped now by the current user
    pub fn created() -> Self {
        Self {
            datetime: Utc::now(),
            user: User::current(),
            event: "created".to_string(),
        }
    }
}
