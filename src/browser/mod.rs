pub mod driver;
pub mod environment;
pub mod session;

pub use driver::EmbeddedDriver;
pub use environment::Environment;
pub use session::SessionRecord;
