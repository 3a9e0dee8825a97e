pub mod onnx_retinaface_detector;
