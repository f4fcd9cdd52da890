pub mod focus;
pub mod messages;
pub mod task;
