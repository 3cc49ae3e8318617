pub mod photo;

pub use photo::{encode_photo, load_photo, CaptureError, PhotoCapture};
