pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod intake;
pub mod mode;
pub mod session;
pub mod view;

pub use config::SmartAtsConfig;
pub use error::{Result, SmartAtsError};
pub use mode::{AnalysisMode, AnalysisPayload};
