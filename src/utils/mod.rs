pub mod logging;
pub mod runtime;

pub use runtime::block_on;
