pub mod config;
pub mod error;
pub mod error_utils;
pub mod notify;
pub mod types;

pub use error::*;
pub use error_utils::*;
pub use notify::*;
pub use types::*;
