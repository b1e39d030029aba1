//! Database models with SQLx `FromRow` derives

mod revenue;

pub use revenue::RevenueModel;
