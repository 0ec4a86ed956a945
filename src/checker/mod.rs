pub mod parse;
pub mod session;
pub mod types;

pub use parse::normalize_amount;
pub use session::{Bootstrapped, Confirmed, Extracted, LookedUp, Lookup, Session};
pub use types::{ChargeDetermination, VehicleAttribute, VehicleRecord};

use crate::config::CheckerConfig;
use crate::error::Result;
use tracing::info;

/// Outcome of a full pass through the checker
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    NotFound,
    Checked(Extracted),
}

/// Run the checker flow for one registration over a fresh session
pub async fn check_vehicle(config: &CheckerConfig, vrn: &str) -> Result<CheckOutcome> {
    let bootstrapped = Session::new(config)?.bootstrap().await?;

    let looked_up = match bootstrapped.lookup(vrn).await? {
        Lookup::NotFound => return Ok(CheckOutcome::NotFound),
        Lookup::Found(looked_up) => looked_up,
    };

    let extracted = looked_up.confirm().await?.extract();
    info!(vrn, charged = ?extracted.charged, "clean air zone check complete");

    Ok(CheckOutcome::Checked(extracted))
}
