use log::{info, warn};
use pixels::{Pixels, SurfaceTexture};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyboardInput, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    platform::run_return::EventLoopExtRunReturn,
    window::{Window, WindowBuilder},
};
use yuv_viewer_codecs::PixelLayout;

use crate::{check_buffer, FrameSink, RenderError};

/// Window size for a frame: halved when the frame is wider than the monitor.
pub fn fit_window(frame: (u32, u32), monitor: Option<(u32, u32)>) -> (u32, u32) {
    match monitor {
        Some((monitor_width, _)) if frame.0 > monitor_width => (frame.0 / 2, frame.1 / 2),
        _ => frame,
    }
}

struct Surface {
    window: Window,
    pixels: Pixels,
    buffer_size: (u32, u32),
}

/// On-screen sink backed by a `pixels` surface. The window is opened with the geometry of
/// the first presented frame; window events are pumped on every frame and a key press or a
/// close request ends the presentation.
pub struct WinitRenderer {
    title: String,
    event_loop: EventLoop<()>,
    surface: Option<Surface>,

    closed: bool,
}

// The event loop and the window never leave the thread that created them: the viewer
// drives the pump on a current-thread runtime.
unsafe impl Send for WinitRenderer {}

impl WinitRenderer {
    /// Must be called from the main thread.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            event_loop: EventLoop::new(),
            surface: None,
            closed: false,
        }
    }

    fn open_surface(&self, width: u32, height: u32) -> Result<Surface, RenderError> {
        let monitor = self
            .event_loop
            .primary_monitor()
            .map(|monitor| (monitor.size().width, monitor.size().height));
        let (window_width, window_height) = fit_window((width, height), monitor);

        let window = WindowBuilder::new()
            .with_title(&self.title)
            .with_inner_size(PhysicalSize::new(window_width, window_height))
            .build(&self.event_loop)
            .map_err(|err| RenderError::Backend(err.to_string()))?;

        let pixels = {
            let surface_size = window.inner_size();
            let surface_texture =
                SurfaceTexture::new(surface_size.width, surface_size.height, &window);
            Pixels::new(width, height, surface_texture)
                .map_err(|err| RenderError::Backend(err.to_string()))?
        };

        info!("Opened {}x{} window for {}x{} frames", window_width, window_height, width, height);

        Ok(Surface {
            window,
            pixels,
            buffer_size: (width, height),
        })
    }

    fn pump_events(&mut self) {
        let Self {
            event_loop,
            surface,
            closed,
            ..
        } = self;

        event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    } => *closed = true,
                    WindowEvent::Resized(size) => {
                        if let Some(surface) = surface.as_mut() {
                            match surface.pixels.resize_surface(size.width, size.height) {
                                Ok(()) => info!("Scale window to {}x{}", size.width, size.height),
                                Err(err) => warn!("Unable to rescale surface: {}", err),
                            }
                        }
                    }
                    _ => (),
                },
                Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
                _ => (),
            }
        });
    }
}

impl FrameSink for WinitRenderer {
    fn layout(&self) -> PixelLayout {
        PixelLayout::Rgba
    }

    fn present(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        channels: usize,
    ) -> Result<(), RenderError> {
        check_buffer(pixels, width, height, channels)?;

        if self.surface.is_none() {
            self.surface = Some(self.open_surface(width, height)?);
        }

        self.pump_events();
        if self.closed {
            return Err(RenderError::WindowClosed);
        }

        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return Err(RenderError::Backend("no window surface".to_string())),
        };

        if surface.buffer_size != (width, height) {
            info!("Frame geometry changed to {}x{}", width, height);
            surface
                .pixels
                .resize_buffer(width, height)
                .map_err(|err| RenderError::Backend(err.to_string()))?;
            surface.buffer_size = (width, height);
        }

        surface.pixels.frame_mut().copy_from_slice(pixels);
        surface
            .pixels
            .render()
            .map_err(|err| RenderError::Backend(err.to_string()))?;

        surface.window.request_redraw();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::fit_window;

    #[test]
    fn oversized_frames_get_a_halved_window() {
        assert_eq!(fit_window((3840, 2160), Some((1920, 1080))), (1920, 1080));
        assert_eq!(fit_window((1280, 720), Some((1920, 1080))), (1280, 720));
        assert_eq!(fit_window((3840, 2160), None), (3840, 2160));
    }
}
