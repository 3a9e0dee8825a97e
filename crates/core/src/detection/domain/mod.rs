pub mod anchor;
pub mod confidence_threshold;
pub mod config_error;
pub mod detection_decoder;
pub mod detector_config;
pub mod face_detection;
pub mod face_detector;
pub mod non_max_suppression;
pub mod post_processor;
pub mod raw_frame_output;
