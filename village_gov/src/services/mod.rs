//! Typed clients for the API resources outside the session core.
//!
//! Each service wraps a [`SessionGateway`](crate::net::SessionGateway), so
//! every call carries the bearer token and a 401 anywhere ends the session.
//! A `success: false` envelope comes back as
//! [`ApiError::Rejected`](crate::net::ApiError::Rejected).

pub mod announcements;
pub mod dashboard;
pub mod facilities;
pub mod issues;
pub mod models;
pub mod schemes;
pub mod users;
pub mod villages;

pub use announcements::AnnouncementService;
pub use dashboard::DashboardService;
pub use facilities::FacilityService;
pub use issues::IssueService;
pub use models::{
    Announcement, AnnouncementRequest, DashboardStats, Facility, FacilityRequest, Issue,
    IssuePriority, IssueRequest, IssueStatus, Scheme, SchemeRequest, User, UserEditRequest,
    Village, VillageRequest,
};
pub use schemes::SchemeService;
pub use users::UserService;
pub use villages::VillageService;
