//! pharmyx-common — Shared errors and the sandboxed HTTP client used across Pharmyx crates.

pub mod error;
pub mod sandbox;

pub use error::{PharmyxError, Result};
pub use sandbox::SandboxClient;
