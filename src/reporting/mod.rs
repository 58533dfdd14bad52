pub mod revalidate;

pub use revalidate::revalidate_findings;
