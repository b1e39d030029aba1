//! Repository implementations of [`dragonkeep_core::RevenueRepository`]

mod error;
mod memory;
mod revenue;

pub use memory::InMemoryRevenueRepository;
pub use revenue::PgRevenueRepository;
