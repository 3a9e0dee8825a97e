pub mod frame_executor;
pub mod infrastructure;
