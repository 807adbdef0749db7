pub mod auth_gateway;
pub mod gateway_options;
pub mod in_memory_backend;
pub mod verification_limiter;

pub use auth_gateway::AuthGateway;
pub use gateway_options::GatewayOptions;
pub use in_memory_backend::InMemoryBackend;
pub use verification_limiter::VerificationLimiter;

#[cfg(test)]
mod tests;
