pub mod threaded_frame_executor;
