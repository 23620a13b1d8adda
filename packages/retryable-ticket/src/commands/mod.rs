//! Subcommand implementations
//!
//! - `deploy` - `deploy-l1`, `deploy-l2`
//! - `update` - `update-l1`
//! - `show` - print both contracts' values
//! - `demo` - the L1 -> L2 retryable flow

pub mod demo;
pub mod deploy;
pub mod show;
pub mod update;

pub use demo::demo;
pub use deploy::{deploy_l1, deploy_l2};
pub use show::show;
pub use update::update_l1;
