#[cfg(feature = "http")]
pub mod config;
