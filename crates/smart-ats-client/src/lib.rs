pub mod backend;
pub mod client;
pub mod error;
pub mod protocol;

pub use backend::AnalysisBackend;
pub use client::SmartAtsClient;
pub use error::ClientError;
