pub mod parser;
pub mod types;

pub use types::{BackendKind, BrowserConfig};
pub use parser::parse_config;
