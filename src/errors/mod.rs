pub mod types;

pub use types::XsProofError;
