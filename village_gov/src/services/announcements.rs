//! Announcements board.

use super::models::{Announcement, AnnouncementRequest};
use crate::net::{ApiResult, SessionGateway};

/// Client for `/announcements`
#[derive(Clone, Debug)]
pub struct AnnouncementService {
    gateway: SessionGateway,
}

impl AnnouncementService {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ApiResult<Vec<Announcement>> {
        self.gateway.get("/announcements").await?.into_data()
    }

    pub async fn create(&self, request: &AnnouncementRequest) -> ApiResult<Announcement> {
        self.gateway.post("/announcements", request).await?.into_data()
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.gateway
            .delete::<String>(&format!("/announcements/{}", id))
            .await?
            .into_result()
            .map(|_| ())
    }
}
