// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds CLI parsing and terminal wiring.
pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod error;
pub mod keys;
pub mod layout;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod sampler;
pub mod session;
pub mod stats;
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod util;

pub use error::TyperError;
