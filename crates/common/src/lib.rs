pub mod assistant;
pub mod chain;
pub mod config;
pub mod news;
pub mod storage;

#[cfg(feature = "logging")]
pub mod logging;

#[cfg(feature = "s3")]
pub mod s3;
