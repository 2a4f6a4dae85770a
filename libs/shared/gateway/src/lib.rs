pub mod client;

pub use client::{ApiGateway, GatewayError};
