pub mod pool;

pub use bytes::*;

#[cfg(test)]
mod tests;
