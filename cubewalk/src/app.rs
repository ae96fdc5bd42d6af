use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::Duration;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use thiserror::Error;

use winit::dpi::{PhysicalPosition, PhysicalSize, Size};
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowBuilder};

use crate::clock::FrameClock;
use crate::input::KeyState;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("failed to create OpenGL context: {0}")]
    Context(String),
    #[error("failed to load OpenGL entry points")]
    Loader,
}

pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Hide the cursor and warp it back to the window center each
    /// frame, turning absolute positions into a mouse-look delta.
    pub capture_cursor: bool,
}

/// Everything a frame callback gets to see. There is no other mutable
/// state; the loop thread owns all of it.
pub struct FrameInput {
    pub dt: Duration,
    pub keys: KeyState,
    pub mouse_delta: (f32, f32),
    pub size: (u32, u32),
}

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    capture_cursor: bool,
    size: (u32, u32),
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(config.width, config.height)))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title(&config.title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| {
                configs.next().expect("no OpenGL config offered")
            })
            .map_err(|e| AppError::Window(e.to_string()))?;

        let window = window.ok_or_else(|| AppError::Window("no window was created".into()))?;
        let handle = Some(window.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(handle);

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr) }
            .map_err(|e| AppError::Context(e.to_string()))?
            .make_current(&gl_window.surface)
            .map_err(|e| AppError::Context(e.to_string()))?;

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).expect("symbol name").as_c_str())
                .cast()
        });

        if !gl::Viewport::is_loaded() || !gl::CreateProgram::is_loaded() {
            return Err(AppError::Loader);
        }

        let size: (u32, u32) = gl_window.window.inner_size().into();
        unsafe {
            gl::Viewport(0, 0, size.0 as i32, size.1 as i32);
        }

        if config.capture_cursor {
            let _ = gl_window.window.set_cursor_grab(CursorGrabMode::Confined);
            gl_window.window.set_cursor_visible(false);
        }

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            capture_cursor: config.capture_cursor,
            size,
        })
    }

    /// Runs the loop until Escape or an OS close request. Each iteration
    /// polls input, hands a [`FrameInput`] to the callback, then swaps
    /// buffers.
    pub fn run<F>(self, mut frame_fn: F) -> !
    where
        F: FnMut(&FrameInput) + 'static,
    {
        let App {
            event_loop,
            gl_context,
            gl_window,
            capture_cursor,
            mut size,
        } = self;

        let mut keys = KeyState::default();
        let mut mouse_delta = (0.0_f32, 0.0_f32);
        let mut clock = FrameClock::new();

        event_loop.run(move |event, _window_target, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(new_size) => {
                        if new_size.width != 0 && new_size.height != 0 {
                            gl_window.surface.resize(
                                &gl_context,
                                NonZeroU32::new(new_size.width).expect("checked above"),
                                NonZeroU32::new(new_size.height).expect("checked above"),
                            );
                            unsafe {
                                gl::Viewport(0, 0, new_size.width as i32, new_size.height as i32);
                            }
                            size = (new_size.width, new_size.height);
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        if capture_cursor {
                            let center = PhysicalPosition::new(
                                size.0 as f64 / 2.0,
                                size.1 as f64 / 2.0,
                            );

                            mouse_delta.0 += (position.x - center.x) as f32;
                            mouse_delta.1 += (center.y - position.y) as f32;

                            let _ = gl_window.window.set_cursor_position(center);
                        }
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        if let Some(key) = input.virtual_keycode {
                            let pressed = input.state == ElementState::Pressed;

                            if key == VirtualKeyCode::Escape && pressed {
                                control_flow.set_exit();
                            } else {
                                keys.apply(key, pressed);
                            }
                        }
                    }
                    WindowEvent::CloseRequested => {
                        control_flow.set_exit();
                    }
                    _ => (),
                },
                Event::MainEventsCleared => {
                    let input = FrameInput {
                        dt: clock.tick(),
                        keys,
                        mouse_delta,
                        size,
                    };

                    frame_fn(&input);
                    mouse_delta = (0.0, 0.0);

                    if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                        eprintln!("failed to swap buffers: {e}");
                        control_flow.set_exit();
                    }

                    if let Some(report) = clock.take_report() {
                        eprintln!(
                            "{:.1} fps ({:.2} ms/frame, {} frames)",
                            report.fps, report.avg_frame_ms, report.frames
                        );
                    }
                }
                _ => (),
            }
        })
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width.max(1)).expect("clamped to 1"),
            NonZeroU32::new(height.max(1)).expect("clamped to 1"),
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs) }
            .map_err(|e| AppError::Window(e.to_string()))?;

        Ok(Self { window, surface })
    }
}
