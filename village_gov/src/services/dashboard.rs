//! Dashboard statistics.

use super::models::DashboardStats;
use crate::net::{ApiResult, SessionGateway};

/// Client for `/dashboard`
#[derive(Clone, Debug)]
pub struct DashboardService {
    gateway: SessionGateway,
}

impl DashboardService {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    /// Counters across all villages (administrators)
    pub async fn admin_stats(&self) -> ApiResult<DashboardStats> {
        self.gateway.get("/dashboard/admin").await?.into_data()
    }

    /// Counters for one village
    pub async fn village_stats(&self, village_id: i64) -> ApiResult<DashboardStats> {
        self.gateway
            .get(&format!("/dashboard/village/{}", village_id))
            .await?
            .into_data()
    }
}
