pub mod dispatcher;
pub mod external;

pub use dispatcher::{Dispatcher, ValidationBackend, ValidationRequest, STORED_CHECK_LABEL};
pub use external::ScriptedDriver;
