//! Ordered startup with guaranteed reverse-order release.
//!
//! [`ScopedContext::init`] walks [`InitStep::SEQUENCE`]. If a step fails, the
//! steps already acquired are released newest-first before the error is
//! returned; otherwise the same happens when the context is dropped.

use std::fmt;

use macroquad::prelude::*;
use tracing::{debug, error, warn};

use crate::config::DemoConfig;
use crate::error::DemoError;

/// A single bootstrap step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitStep {
    /// Video subsystem and drawable surface.
    Video,
    /// Image decoding.
    Image,
    /// Text rendering. Not used by the scroller itself.
    Text,
    /// Window sizing.
    Window,
    /// Renderer / back buffer.
    Renderer,
    /// Keyboard state table.
    Keyboard,
}

impl InitStep {
    /// Acquisition order.
    pub const SEQUENCE: [InitStep; 6] = [
        InitStep::Video,
        InitStep::Image,
        InitStep::Text,
        InitStep::Window,
        InitStep::Renderer,
        InitStep::Keyboard,
    ];
}

impl fmt::Display for InitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitStep::Video => "video subsystem",
            InitStep::Image => "image subsystem",
            InitStep::Text => "text subsystem",
            InitStep::Window => "window creation",
            InitStep::Renderer => "renderer creation",
            InitStep::Keyboard => "keyboard state",
        };
        f.write_str(name)
    }
}

/// Backend that can bring bootstrap steps up and down.
pub trait Platform {
    /// Bring `step` up. The error string is the subsystem's own message.
    fn acquire(&mut self, step: InitStep) -> Result<(), String>;

    /// Tear `step` down. Only called for steps that were acquired.
    fn release(&mut self, step: InitStep);
}

/// Owns the platform and every acquired step.
pub struct ScopedContext<P: Platform> {
    platform: P,
    acquired: Vec<InitStep>,
}

impl<P: Platform> ScopedContext<P> {
    /// Acquire every step in order. On failure nothing stays acquired.
    pub fn init(platform: P) -> Result<Self, DemoError> {
        let mut ctx = ScopedContext {
            platform,
            acquired: Vec::with_capacity(InitStep::SEQUENCE.len()),
        };

        for step in InitStep::SEQUENCE {
            if let Err(message) = ctx.platform.acquire(step) {
                error!(%step, %message, "startup step failed");
                // dropping `ctx` unwinds what was acquired so far
                return Err(DemoError::Init { step, message });
            }
            debug!(%step, "acquired");
            ctx.acquired.push(step);
        }

        Ok(ctx)
    }

    /// Steps currently held, in acquisition order.
    pub fn acquired(&self) -> &[InitStep] {
        &self.acquired
    }

    /// The underlying platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }
}

impl<P: Platform> Drop for ScopedContext<P> {
    fn drop(&mut self) {
        while let Some(step) = self.acquired.pop() {
            debug!(%step, "released");
            self.platform.release(step);
        }
    }
}

// Smallest valid PNG (1x1 RGBA); decoding it proves the image codec works.
const PNG_PROBE: [u8; 68] = [
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0b, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0xf8,
    0x0f, 0x04, 0x00, 0x09, 0xfb, 0x03, 0xfd, 0x68, 0xfa, 0x1c, 0xcc, 0x00, 0x00, 0x00, 0x00,
    0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// [`Platform`] over the live macroquad window.
///
/// Macroquad creates the window and GL context before `main` runs, so the
/// steps here check that each piece is usable rather than creating it.
#[derive(Debug, Clone)]
pub struct MacroquadPlatform {
    width: u32,
    height: u32,
}

impl MacroquadPlatform {
    /// Expect a surface of the configured window size.
    pub fn new(config: &DemoConfig) -> Self {
        MacroquadPlatform {
            width: config.window_width,
            height: config.window_height,
        }
    }
}

impl Platform for MacroquadPlatform {
    fn acquire(&mut self, step: InitStep) -> Result<(), String> {
        match step {
            InitStep::Video => {
                let (w, h) = (screen_width(), screen_height());
                if w < 1.0 || h < 1.0 {
                    return Err(format!("drawable surface is {}x{}", w, h));
                }
                Ok(())
            }
            InitStep::Image => Image::from_file_with_format(&PNG_PROBE, None)
                .map(|_| ())
                .map_err(|e| format!("{:?}", e)),
            InitStep::Text => {
                let dims = measure_text("Tile", None, 16, 1.0);
                if dims.width <= 0.0 {
                    return Err("default font has no glyph metrics".to_owned());
                }
                Ok(())
            }
            InitStep::Window => {
                let (w, h) = (screen_width() as u32, screen_height() as u32);
                if (w, h) != (self.width, self.height) {
                    warn!(w, h, want_w = self.width, want_h = self.height, "window size differs, requesting resize");
                    request_new_screen_size(self.width as f32, self.height as f32);
                }
                Ok(())
            }
            InitStep::Renderer => {
                clear_background(BLACK);
                Ok(())
            }
            InitStep::Keyboard => {
                debug!(held = get_keys_down().len(), "keyboard state available");
                Ok(())
            }
        }
    }

    fn release(&mut self, _step: InitStep) {
        // The window and GL context live until macroquad's main returns.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recording {
        fail_at: Option<InitStep>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Platform for Recording {
        fn acquire(&mut self, step: InitStep) -> Result<(), String> {
            if self.fail_at == Some(step) {
                return Err("boom".to_owned());
            }
            self.log.borrow_mut().push(format!("+{:?}", step));
            Ok(())
        }

        fn release(&mut self, step: InitStep) {
            self.log.borrow_mut().push(format!("-{:?}", step));
        }
    }

    #[test]
    fn init_acquires_in_order_and_drop_releases_in_reverse() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = ScopedContext::init(Recording {
            fail_at: None,
            log: log.clone(),
        })
        .unwrap();
        assert_eq!(ctx.acquired(), &InitStep::SEQUENCE);
        drop(ctx);

        assert_eq!(
            *log.borrow(),
            vec![
                "+Video", "+Image", "+Text", "+Window", "+Renderer", "+Keyboard",
                "-Keyboard", "-Renderer", "-Window", "-Text", "-Image", "-Video",
            ]
        );
    }

    #[test]
    fn failed_step_unwinds_earlier_steps() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let err = ScopedContext::init(Recording {
            fail_at: Some(InitStep::Window),
            log: log.clone(),
        })
        .err()
        .unwrap();

        assert!(matches!(
            &err,
            DemoError::Init { step: InitStep::Window, message } if message == "boom"
        ));
        assert_eq!(
            *log.borrow(),
            vec!["+Video", "+Image", "+Text", "-Text", "-Image", "-Video"]
        );
    }

    #[test]
    fn first_step_failure_releases_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let result = ScopedContext::init(Recording {
            fail_at: Some(InitStep::Video),
            log: log.clone(),
        });
        assert!(result.is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn step_names_are_readable() {
        assert_eq!(InitStep::Renderer.to_string(), "renderer creation");
    }
}
