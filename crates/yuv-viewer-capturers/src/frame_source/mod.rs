pub mod error;
pub mod fixed;
pub mod header;
pub mod stream;
