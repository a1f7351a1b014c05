pub mod config;

pub use config::{AppConfig, ConvertOverrides, OutputConfig, StripeConfig, CONFIG_ENV};
