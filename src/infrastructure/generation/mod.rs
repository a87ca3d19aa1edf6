//! Text generation through the configured providers

mod provider_generator;

pub use provider_generator::{ProviderGenerator, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
