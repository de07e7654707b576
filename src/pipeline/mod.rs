pub mod list;
pub mod view_state;
