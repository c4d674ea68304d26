pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::HandoffConfig;
pub use error::WorkflowError;
pub use models::{CustomerForm, CustomerInfo, SelectedFile, SessionState};
pub use services::session::{Session, SessionEvent, SessionOutcome};
pub use services::workflow::{HandoffReport, HandoffWorkflow};
