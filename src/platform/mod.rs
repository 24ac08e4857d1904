//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges Winit (OS-level events) with the logic thread via crossbeam.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │  ↓               │
//  │  pressed_key()           │    │  GestureBindings │
//  │   └─ press, non-repeat   │    │  ↓               │
//  │   ↓                      │    │  SceneMachine /  │
//  │  InputBuffer             │    │  DecorStage      │
//  │   ↓                      │    └──────────────────┘
//  │  RedrawRequested         │             ↑
//  │   ↓ (flush)              │             │
//  │  Bounded Channel ────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: keys pressed during a frame are
//   sent as one batch, in press order
// - **Graceful channel disconnect**: if the logic thread dies, the
//   platform logs a warning but keeps running so the window can close
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Module Declarations =================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;

//=== Platform ============================================================

/// Window owner and key press aggregator.
///
/// Runs on the main thread and sends batched key presses to the logic
/// thread. This type is not `Send`; it must stay on the main thread.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Title used when the window is created.
    title: String,

    /// Buffers key presses until `RedrawRequested`.
    buffer: InputBuffer,

    /// Channel to the logic thread.
    event_sender: Sender<PlatformEvent>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance. The window is created lazily in
    /// `resumed()`.
    pub(crate) fn new(event_sender: Sender<PlatformEvent>, title: impl Into<String>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            title: title.into(),
            buffer: InputBuffer::new(),
            event_sender,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// [`PlatformError::EventLoopCreation`] if no event loop can be
    /// created, [`PlatformError::EventLoopExecution`] if it fails while
    /// running.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends this frame's key presses to the logic thread.
    ///
    /// On a disconnected channel the keys are dropped with a warning so
    /// the window stays closable.
    fn flush_input_buffer(&mut self) {
        let count = self.buffer.len();
        let Some(keys) = self.buffer.drain() else {
            return;
        };

        trace!(target: "platform::input", "Flushing {} key presses", count);

        if self.event_sender.send(PlatformEvent::Keys(keys)).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} key presses",
                count
            );
        }
    }

    fn request_close(&self, event_loop: &ActiveEventLoop) {
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(800, 600));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.request_close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.request_close(event_loop);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match input_processor::pressed_key(key_event) {
                    Some(key) => self.buffer.push(key),
                    None => trace!(target: "platform::input", "Key event ignored"),
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crossbeam_channel::unbounded;

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(tx, "Reveal");
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, "Reveal");

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_keys() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, "Reveal");
        platform.buffer.push(KeyCode::Enter);
        platform.buffer.push(KeyCode::KeyL);

        platform.flush_input_buffer();

        assert_eq!(
            rx.try_recv().unwrap(),
            PlatformEvent::Keys(vec![KeyCode::Enter, KeyCode::KeyL])
        );
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, "Reveal");
        platform.buffer.push(KeyCode::Space);
        drop(rx);

        // Should not panic, just log warning
        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn multiple_flushes_send_once() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, "Reveal");
        platform.buffer.push(KeyCode::KeyA);

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
