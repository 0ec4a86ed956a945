pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod mot;
pub mod utils;

pub use error::{CheckerError, Result};
pub use handler::{GatewayEvent, GatewayResponse, Handler, ResponseEnvelope};
