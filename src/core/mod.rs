pub mod auth;
pub mod barcode;
pub mod context;
pub mod engine;
pub mod generator;
pub mod prompt;
pub mod think;

pub use crate::domain::model::{Issue, RecapOutcome, RecapRequest};
pub use crate::domain::ports::{Catalog, ChatModel};
pub use crate::utils::error::Result;
