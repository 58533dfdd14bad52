pub mod finding;
pub mod proof;
pub mod result;

pub use finding::{FindingRecord, ProofReport, ReportEntry};
pub use proof::{ExecutionProof, ExecutionType};
pub use result::ValidationResult;
