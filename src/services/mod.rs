pub mod intake;
pub mod message;
pub mod opener;
pub mod preview;
pub mod progress;
pub mod session;
pub mod workflow;
