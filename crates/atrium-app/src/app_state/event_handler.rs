//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use atrium_common::types::Rect;

use super::core::AtriumApp;

impl ApplicationHandler for AtriumApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.host.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }
        self.run_shell_requests(event_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.aux_windows.contains_key(&window_id) {
            if let WindowEvent::CloseRequested = event {
                self.close_auxiliary_window(window_id);
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                let Some(window) = self.window.as_ref() else {
                    return;
                };
                let logical = size.to_logical::<f64>(window.scale_factor());
                if let Some(host) = self.host.as_mut() {
                    host.on_resize(
                        u64::from(window_id),
                        Rect::sized(logical.width, logical.height),
                    );
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}
