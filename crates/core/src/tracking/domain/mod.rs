pub mod association;
pub mod face_tracker;
pub mod position_history;
pub mod track;
pub mod tracker_config;
