//! Village CRUD.

use super::models::{Village, VillageRequest};
use crate::net::{ApiResult, SessionGateway};

/// Client for `/villages`
#[derive(Clone, Debug)]
pub struct VillageService {
    gateway: SessionGateway,
}

impl VillageService {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ApiResult<Vec<Village>> {
        self.gateway.get("/villages").await?.into_data()
    }

    pub async fn get(&self, id: i64) -> ApiResult<Village> {
        self.gateway.get(&format!("/villages/{}", id)).await?.into_data()
    }

    pub async fn create(&self, request: &VillageRequest) -> ApiResult<Village> {
        self.gateway.post("/villages", request).await?.into_data()
    }

    pub async fn update(&self, id: i64, request: &VillageRequest) -> ApiResult<Village> {
        self.gateway
            .put(&format!("/villages/{}", id), request)
            .await?
            .into_data()
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.gateway
            .delete::<String>(&format!("/villages/{}", id))
            .await?
            .into_result()
            .map(|_| ())
    }
}
