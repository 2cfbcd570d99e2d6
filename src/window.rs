//! Native host: a winit window drawn with [`GpuSurface`].
//!
//! Redraw requests are the frame scheduler, cursor events feed the pointer
//! state and window resizes go through the field's throttle. While the window
//! is minimized no redraws are requested. Closing the window or pressing
//! Escape cancels the loop.

use std::sync::Arc;

use log::{error, info, warn};
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::HostError;
use crate::frame::{CancellationToken, Constellation, FrameOutcome, FrameScheduler, Viewport};
use crate::gpu::GpuSurface;
use crate::input::pointer_event;

impl Viewport for Window {
    fn viewport_size(&self) -> (u32, u32) {
        let size = self.inner_size();
        (size.width, size.height)
    }
}

/// Schedules frames by asking winit for a redraw.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

/// Open a window and run the constellation until it is closed.
pub fn run(config: FieldConfig) -> Result<(), HostError> {
    run_with_cancellation(config, CancellationToken::never())
}

/// Like [`run`], but the loop also stops when `token` is cancelled.
pub fn run_with_cancellation(config: FieldConfig, token: CancellationToken) -> Result<(), HostError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, token);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    config: FieldConfig,
    token: CancellationToken,
    window: Option<Arc<Window>>,
    gpu: Option<GpuSurface>,
    constellation: Option<Constellation>,
    error: Option<HostError>,
}

impl App {
    fn new(config: FieldConfig, token: CancellationToken) -> Self {
        Self {
            config,
            token,
            window: None,
            gpu: None,
            constellation: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), HostError> {
        let window_attrs = Window::default_attributes()
            .with_title("Constellation")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let mut gpu = pollster::block_on(GpuSurface::new(window.clone()))?;

        let mut constellation = Constellation::new(self.config.clone(), &*window, &mut gpu)
            .with_cancellation(self.token.clone());
        constellation.start(&mut RedrawScheduler(&window));

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.constellation = Some(constellation);
        Ok(())
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        self.token.cancel();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu), Some(constellation)) =
            (&self.window, &mut self.gpu, &mut self.constellation)
        else {
            return;
        };

        let outcome = constellation.frame(
            Instant::now(),
            &**window,
            &mut *gpu,
            &mut RedrawScheduler(window),
        );
        match outcome {
            FrameOutcome::Continue(_) => {}
            FrameOutcome::Suspended(_) => return,
            FrameOutcome::Stopped => {
                event_loop.exit();
                return;
            }
        }

        match gpu.present() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, exiting");
                self.token.cancel();
                event_loop.exit();
            }
            Err(e) => warn!("render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            error!("failed to start: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(pointer) = pointer_event(&event) {
            if let Some(constellation) = &mut self.constellation {
                constellation.handle_pointer(pointer);
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("window closed");
                self.stop(event_loop);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.stop(event_loop);
            }
            WindowEvent::Resized(_) => {
                if let (Some(window), Some(constellation)) = (&self.window, &mut self.constellation)
                {
                    constellation.resized(Instant::now());
                    // Minimizing suspends the loop; any resize may be the restore
                    constellation.resume(&mut RedrawScheduler(window));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
