// Interactive operation: operator input, control thread, shutdown

pub mod command;
pub mod session;
pub mod shutdown;

pub use command::{Command, read_commands, read_operator_input};
pub use session::{Session, SessionReport};
pub use shutdown::{Shutdown, ShutdownTrigger, install_ctrlc};
