//! Data transfer objects for API requests and responses

pub mod requests;
pub mod responses;

pub use requests::CreateRevenueRequest;
pub use responses::{
    HealthResponse, MemberSummaryResponse, MonthlyTotal, OkResponse, RevenueResponse,
    RevenueSummaryResponse, StatsResponse,
};
