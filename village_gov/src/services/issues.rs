//! Issues raised against villages.

use super::models::{Issue, IssueRequest, IssueStatus};
use crate::net::{ApiResult, SessionGateway};
use reqwest::Method;

/// Client for `/issues`
#[derive(Clone, Debug)]
pub struct IssueService {
    gateway: SessionGateway,
}

impl IssueService {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    /// Raise a new issue as the current user
    pub async fn raise(&self, request: &IssueRequest) -> ApiResult<Issue> {
        self.gateway.post("/issues", request).await?.into_data()
    }

    pub async fn by_village(&self, village_id: i64) -> ApiResult<Vec<Issue>> {
        self.gateway
            .get(&format!("/issues/village/{}", village_id))
            .await?
            .into_data()
    }

    /// Issues reported by the current user
    pub async fn mine(&self) -> ApiResult<Vec<Issue>> {
        self.gateway.get("/issues/me").await?.into_data()
    }

    /// Move an issue to `status`; the status travels as a query parameter
    pub async fn update_status(&self, id: i64, status: IssueStatus) -> ApiResult<Issue> {
        let request = self
            .gateway
            .request(Method::PUT, &format!("/issues/{}/status", id))
            .query(&[("status", status.as_str())]);
        self.gateway.send(request).await?.into_data()
    }
}
