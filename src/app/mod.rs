pub mod command;
pub mod interactive_mode;
pub mod snapshot_mode;
