//! Persistence collaborators
//!
//! Order and profile storage live outside this core; these traits are the
//! seam the surrounding application plugs its persistence into. The
//! in-memory implementation backs the server and the integration tests.

use async_trait::async_trait;
use shared::{Order, OrderStatus, Profile};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Order persistence collaborator
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Order>;
    async fn list(&self, status: Option<OrderStatus>) -> AppResult<Vec<Order>>;
    /// Upsert the given order value (copy-on-write merge point)
    async fn save(&self, order: Order) -> AppResult<()>;
}

/// Profile persistence collaborator.
///
/// Failures from these methods are opaque to the core; their messages are
/// surfaced verbatim when present.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Profile>;
    async fn save(&self, profile: Profile) -> AppResult<()>;
    async fn change_password(&self, id: Uuid, current: &str, new: &str) -> AppResult<()>;
}

/// In-memory store standing in for the external persistence collaborator
#[derive(Default)]
pub struct MemoryStore {
    orders: RwLock<HashMap<Uuid, Order>>,
    profiles: RwLock<HashMap<Uuid, Profile>>,
    // Stand-in credential map; real credential handling is the
    // collaborator's concern, not this core's.
    passwords: RwLock<HashMap<Uuid, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile with a password, for tests and local runs
    pub async fn seed_profile(&self, profile: Profile, password: &str) {
        self.passwords
            .write()
            .await
            .insert(profile.id, password.to_string());
        self.profiles.write().await.insert(profile.id, profile);
    }

    pub async fn seed_order(&self, order: Order) {
        self.orders.write().await.insert(order.id, order);
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn get(&self, id: Uuid) -> AppResult<Order> {
        self.orders
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Order".to_string()))
    }

    async fn list(&self, status: Option<OrderStatus>) -> AppResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(result)
    }

    async fn save(&self, order: Order) -> AppResult<()> {
        self.orders.write().await.insert(order.id, order);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get(&self, id: Uuid) -> AppResult<Profile> {
        self.profiles
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Profile".to_string()))
    }

    async fn save(&self, profile: Profile) -> AppResult<()> {
        self.profiles.write().await.insert(profile.id, profile);
        Ok(())
    }

    async fn change_password(&self, id: Uuid, current: &str, new: &str) -> AppResult<()> {
        let mut passwords = self.passwords.write().await;
        let stored = passwords
            .get(&id)
            .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;

        if stored != current {
            return Err(AppError::Collaborator(
                "Current password is incorrect".to_string(),
            ));
        }

        passwords.insert(id, new.to_string());
        Ok(())
    }
}
