//! Resource models exchanged with the API (camelCase JSON).

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Village record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Village {
    pub id: i64,
    pub name: String,
    pub district: String,
    pub state: String,
    pub population: i64,
    #[serde(default)]
    pub description: String,
}

/// Village create/update body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageRequest {
    pub name: String,
    pub district: String,
    pub state: String,
    pub population: i64,
    pub description: String,
}

/// Facility inside a village (school, well, clinic, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    pub village_id: i64,
    #[serde(default)]
    pub status: String,
}

/// Facility create/update body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub village_id: i64,
    pub status: String,
}

/// Issue lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    Pending,
    InProgress,
    Resolved,
}

impl IssueStatus {
    /// Wire representation, as used in query strings
    pub fn as_str(self) -> &'static str {
        match self {
            IssueStatus::Pending => "PENDING",
            IssueStatus::InProgress => "IN_PROGRESS",
            IssueStatus::Resolved => "RESOLVED",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "PENDING" => Ok(IssueStatus::Pending),
            "IN_PROGRESS" => Ok(IssueStatus::InProgress),
            "RESOLVED" => Ok(IssueStatus::Resolved),
            other => Err(format!(
                "Unknown issue status '{}'. Use PENDING, IN_PROGRESS or RESOLVED",
                other
            )),
        }
    }
}

/// Issue priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssuePriority {
    Low,
    Medium,
    High,
}

impl FromStr for IssuePriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(IssuePriority::Low),
            "MEDIUM" => Ok(IssuePriority::Medium),
            "HIGH" => Ok(IssuePriority::High),
            other => Err(format!(
                "Unknown priority '{}'. Use LOW, MEDIUM or HIGH",
                other
            )),
        }
    }
}

/// Issue raised by a villager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub village_id: i64,
    #[serde(default)]
    pub reporter_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Issue creation body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    pub title: String,
    pub description: String,
    pub priority: IssuePriority,
    pub village_id: i64,
}

/// Government scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Scheme creation body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub benefits: String,
    pub eligibility: String,
}

/// Public announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Announcement creation body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementRequest {
    pub title: String,
    pub content: String,
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_villages: u64,
    pub total_issues: u64,
    pub resolved_issues: u64,
    pub pending_issues: u64,
    pub active_schemes: u64,
}

/// User account as listed by administrators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub village_id: Option<i64>,
}

/// `PUT /user/edit` body; unset fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEditRequest {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub village_id: Option<i64>,
}
