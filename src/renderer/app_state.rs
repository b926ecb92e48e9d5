use crate::{
    image::grammar::Image,
    renderer::{
        gpu_state::GpuState,
        view_state::{initial_window, Command, InitialWindow, ViewState},
    },
};
use anyhow::{ensure, Result};
use wgpu::SurfaceError;
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub title: String,
    pub fit_to_window: bool,
}

/// AppState is the state that is created by user input.
pub struct AppState<'a> {
    gpu_state: GpuState<'a>,
    window: &'a Window,
    size: PhysicalSize<u32>,
    image_size: (u32, u32),
    view_state: ViewState,
}

impl<'a> AppState<'a> {
    pub async fn new(window: &'a Window, image: &Image, view_state: ViewState) -> Result<Self> {
        let gpu_state = GpuState::new(window, image.as_ref()).await?;

        Ok(Self {
            gpu_state,
            window,
            size: window.inner_size(),
            image_size: image.dimensions(),
            view_state,
        })
    }

    pub const fn window(&self) -> &Window {
        self.window
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.gpu_state.configure_surface(&new_size);
        }
    }

    /// Returns the command a key press maps to, after applying it to the view.
    pub(crate) fn input(&mut self, event: &WindowEvent) -> Option<Command> {
        let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state: ElementState::Pressed,
                    logical_key,
                    ..
                },
            ..
        } = event
        else {
            return None;
        };

        let command = Command::from_key(logical_key)?;
        log::debug!("{command:?}");

        self.view_state.apply(command);

        Some(command)
    }

    pub(crate) fn update(&mut self) {
        let screen = (self.size.width, self.size.height);
        let rect = self.view_state.layout(self.image_size, screen);

        log::trace!("zoom {:.3}, image at {rect:?}", self.view_state.zoom());

        self.gpu_state.place_image(rect, screen);
    }

    pub(crate) fn render(&self) -> Result<(), SurfaceError> {
        self.gpu_state.render()
    }
}

#[allow(clippy::future_not_send)]
pub async fn run(image: Image, options: ViewerOptions) -> Result<()> {
    let (width, height) = image.dimensions();
    ensure!(
        width > 0 && height > 0,
        "Cannot display an empty {width}x{height} image."
    );

    let event_loop = EventLoop::new()?;

    let window = WindowBuilder::new()
        .with_inner_size(PhysicalSize::new(width, height))
        .with_title(&options.title)
        .build(&event_loop)?;

    let monitor = window
        .current_monitor()
        .map(|monitor| (monitor.size().width, monitor.size().height));

    if initial_window((width, height), monitor) == InitialWindow::Maximized {
        window.set_maximized(true);
    }

    // AppState::new uses async code, so we're going to wait for it to finish
    let mut state = AppState::new(&window, &image, ViewState::new(options.fit_to_window)).await?;

    event_loop.run(move |event, control_flow| {
        let Event::WindowEvent {
            ref event,
            window_id,
        } = event
        else {
            return;
        };

        if window_id != state.window().id() {
            return;
        }

        if let Some(command) = state.input(event) {
            if command == Command::Quit {
                control_flow.exit();
            } else {
                state.window().request_redraw();
            }

            return;
        }

        match event {
            WindowEvent::CloseRequested => control_flow.exit(),
            WindowEvent::Resized(physical_size) => {
                state.resize(*physical_size);
                state.window().request_redraw();
            }
            WindowEvent::RedrawRequested => {
                state.update();

                match state.render() {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                        state.resize(state.size);
                        state.window().request_redraw();
                    }
                    // The system is out of memory, we should probably quit
                    Err(SurfaceError::OutOfMemory) => {
                        log::error!("OutOfMemory");
                        control_flow.exit();
                    }
                    // This happens when a frame takes too long to present
                    Err(SurfaceError::Timeout) => {
                        log::warn!("Surface timeout")
                    }
                }
            }
            _ => {}
        }
    })?;

    Ok(())
}
