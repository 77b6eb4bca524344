use gl;
use sdl2;
use sdl2::event::{Event, WindowEvent};
use sdl2::video::GLProfile;
use std::time::Instant;

pub use sdl2::keyboard::Keycode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

pub enum IoEvents {
    Quit,
    // key code + transition
    Key(Keycode, KeyAction),
    // framebuffer width, height in pixels
    Resize(i32, i32),
}

/// Synchronous event sink. Methods run on the polling thread during
/// `System::dispatch_events`, strictly before the next frame is drawn.
pub trait EventHandler {
    fn on_key(&mut self, system: &mut System, key: Keycode, action: KeyAction);
    fn on_resize(&mut self, system: &mut System, width: i32, height: i32);
}

pub struct System {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_ctx: sdl2::video::GLContext,
    started: Instant,
    mouse_x: f32,
    mouse_y: f32,
    should_close: bool,
    events: Vec<IoEvents>,
}

impl System {
    pub fn new(w: u32, h: u32, title: &str) -> Result<System, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = match video_subsystem
            .window(title, w, h)
            .opengl()
            .resizable()
            .build()
        {
            Ok(w) => w,
            Err(e) => return Err(format!("Error while building OpenGL window: {e}")),
        };

        let gl_ctx = window.gl_create_context()?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (3, 3));

        Ok(System {
            sdl_context,
            video_subsystem,
            window,
            gl_ctx,
            started: Instant::now(),
            mouse_x: 0.0,
            mouse_y: 0.0,
            should_close: false,
            events: Vec::new(),
        })
    }

    /// Drains pending window events and hands them to `handler` on the
    /// calling thread. Non-blocking; returns once the queue is empty.
    pub fn dispatch_events(&mut self, handler: &mut dyn EventHandler) {
        self.poll_io_events();
        for event in std::mem::take(&mut self.events) {
            match event {
                IoEvents::Quit => self.should_close = true,
                IoEvents::Key(key, action) => handler.on_key(self, key, action),
                IoEvents::Resize(width, height) => handler.on_resize(self, width, height),
            }
        }
    }

    fn poll_io_events(&mut self) {
        self.events.clear();
        let mut event_pump = self.sdl_context.event_pump().unwrap();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => self.events.push(IoEvents::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat,
                    ..
                } => {
                    let action = if repeat {
                        KeyAction::Repeat
                    } else {
                        KeyAction::Press
                    };
                    self.events.push(IoEvents::Key(key, action));
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => self.events.push(IoEvents::Key(key, KeyAction::Release)),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (w, h) = self.window.drawable_size();
                    self.events.push(IoEvents::Resize(w as i32, h as i32));
                }
                _ => {}
            }
        }

        let mouse = event_pump.mouse_state();
        self.mouse_x = mouse.x() as f32;
        self.mouse_y = mouse.y() as f32;
    }

    pub fn framebuffer_size(&self) -> (i32, i32) {
        let (w, h) = self.window.drawable_size();
        (w as i32, h as i32)
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn set_should_close(&mut self, close: bool) {
        self.should_close = close;
    }

    /// Cursor position in window coordinates, as of the last event poll.
    pub fn cursor_position(&self) -> (f32, f32) {
        (self.mouse_x, self.mouse_y)
    }

    /// Seconds since subsystem initialization, monotonic.
    pub fn elapsed_seconds(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    pub fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        unsafe { gl::Viewport(0, 0, width, height) };
    }

    pub fn clear_screen(&mut self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}
