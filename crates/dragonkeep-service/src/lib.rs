//! # dragonkeep-service
//!
//! Application layer: the reaction-to-role sync, the stats and member read
//! models, and the revenue ledger use cases, plus their DTOs.

pub mod dto;
pub mod services;

pub use services::{
    FinanceService, IgnoreReason, MemberService, RoleSyncOutcome, RoleSyncService,
    RoleSyncSettings, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    StatsService,
};
