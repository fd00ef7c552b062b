// Adapters layer: concrete implementations of the domain ports over HTTP.

pub mod catalog;
pub mod ollama;

pub use catalog::MarvelCatalog;
pub use ollama::OllamaClient;
