//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of one call.

pub mod context;
pub mod error;
pub mod finance;
pub mod member;
pub mod role_sync;
pub mod stats;

pub use context::{RoleSyncSettings, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use finance::FinanceService;
pub use member::MemberService;
pub use role_sync::{IgnoreReason, RoleSyncOutcome, RoleSyncService};
pub use stats::StatsService;
