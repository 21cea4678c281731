//! CLI command handling

pub mod configure;
pub mod notify;

pub use configure::*;
pub use notify::*;
