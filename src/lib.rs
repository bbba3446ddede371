pub use yuv_viewer_core::*;

#[cfg(feature = "buffers")]
pub mod buffers {
    pub use yuv_viewer_buffer_utils::*;
}

#[cfg(feature = "capture")]
pub mod capture {
    pub use yuv_viewer_capturers::*;
}

#[cfg(feature = "codecs")]
pub mod codecs {
    pub use yuv_viewer_codecs::*;
}

#[cfg(feature = "render")]
pub mod render {
    pub use yuv_viewer_renderers::*;
}

#[cfg(feature = "profilation")]
pub mod profilation {
    pub use yuv_viewer_profilation_utils::*;
}
