use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::ProxyOrder;

/// In-memory order book. Cleared whenever the process restarts.
#[derive(Debug, Default)]
pub struct OrderBook {
    pub orders: Vec<ProxyOrder>,
    counter: u32,
}

impl OrderBook {
    /// Allocates the next `PX01`, `PX02`, ... identifier.
    pub fn next_order_id(&mut self) -> String {
        self.counter += 1;
        format!("PX{:02}", self.counter)
    }

    pub fn find(&self, id: &str) -> Option<&ProxyOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ProxyOrder> {
        self.orders.iter_mut().find(|o| o.id == id)
    }
}

#[derive(Clone, Default)]
pub struct AppState {
    pub orders: Arc<RwLock<OrderBook>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
