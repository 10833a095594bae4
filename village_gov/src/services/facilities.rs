//! Facilities belonging to a village.

use super::models::{Facility, FacilityRequest};
use crate::net::{ApiResult, SessionGateway};

/// Client for `/facilities`
#[derive(Clone, Debug)]
pub struct FacilityService {
    gateway: SessionGateway,
}

impl FacilityService {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    pub async fn add(&self, request: &FacilityRequest) -> ApiResult<Facility> {
        self.gateway.post("/facilities", request).await?.into_data()
    }

    pub async fn update(&self, id: i64, request: &FacilityRequest) -> ApiResult<Facility> {
        self.gateway
            .put(&format!("/facilities/{}", id), request)
            .await?
            .into_data()
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.gateway
            .delete::<String>(&format!("/facilities/{}", id))
            .await?
            .into_result()
            .map(|_| ())
    }

    pub async fn by_village(&self, village_id: i64) -> ApiResult<Vec<Facility>> {
        self.gateway
            .get(&format!("/facilities/village/{}", village_id))
            .await?
            .into_data()
    }
}
