//! Core of yuv-viewer: the traits every frame processor implements, the frame DTO property
//! traits, and the component/pipeline machinery that pumps frames from a source to a sink.

pub mod common;
pub mod error;
pub mod pipeline;
pub mod processors;
pub mod traits;
