pub mod browser;
pub mod config;
pub mod contact;
pub mod disc;
pub mod error;
pub mod income;
pub mod output;
pub mod stderr_buffer;
pub mod tui;

pub use error::InvalidInput;
