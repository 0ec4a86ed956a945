pub mod client;
pub mod mileage;

pub use client::MotClient;
pub use mileage::{last_year_mileage, MotHistoryEntry};
