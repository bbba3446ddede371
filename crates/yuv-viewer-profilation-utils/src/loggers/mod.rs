pub mod console;
pub mod frame_rate;
