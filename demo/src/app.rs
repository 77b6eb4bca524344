use backend::glutils::*;
use backend::math::{Mat4x4, Vec3};
use backend::shaders::Shaders;
use backend::system::{EventHandler, KeyAction, Keycode, System};

const SPIN_DEG_PER_SEC: f32 = 50.0;
const SPIN_AXIS: Vec3 = Vec3 {
    x: -0.2,
    y: 0.0,
    z: 1.0,
};

// x, y, z, r, g, b
const TRIANGLE: [f32; 18] = [
    -0.6, -0.4, 0.0, 1.0, 0.0, 0.0, //
    0.6, -0.4, 0.0, 0.0, 1.0, 0.0, //
    0.0, 0.6, 0.0, 0.0, 0.0, 1.0, //
];

const VERTEX_SHADER_SRC: &str = r#"
#version 330 core
layout (location = 0) in vec3 position;
layout (location = 1) in vec3 color;
uniform mat4 mvp;
out vec3 vertex_color;
void main() {
    vertex_color = color;
    gl_Position = mvp * vec4(position, 1.0);
}
"#;

const FRAGMENT_SHADER_SRC: &str = r#"
#version 330 core
in vec3 vertex_color;
out vec4 frag_color;
void main() {
    frag_color = vec4(vertex_color, 1.0);
}
"#;

/// Framebuffer dimensions and their midpoint, tracked across resizes.
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub center_x: f32,
    pub center_y: f32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Viewport {
        let mut v = Viewport {
            width: 0,
            height: 0,
            center_x: 0.0,
            center_y: 0.0,
        };
        v.resize(width, height);
        v
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.center_x = width as f32 / 2.0;
        self.center_y = height as f32 / 2.0;
    }

    /// Aspect-preserving orthographic projection. A zero height yields an
    /// infinite ratio; deliberately unguarded.
    pub fn projection(&self) -> Mat4x4 {
        let ratio = self.width as f32 / self.height as f32;
        Mat4x4::ortho(-ratio, ratio, -1.0, 1.0, 1.0, -1.0)
    }
}

pub fn quit_requested(key: Keycode, action: KeyAction) -> bool {
    action == KeyAction::Press && key == Keycode::Escape
}

/// Offset mapping the cursor into a small translation around the origin;
/// Y is inverted because screen Y grows downward.
pub fn cursor_offset(viewport: &Viewport, mouse_x: f32, mouse_y: f32) -> (f32, f32) {
    let ratio_x = mouse_x / viewport.width as f32;
    let ratio_y = mouse_y / viewport.height as f32;
    (
        ratio_x - viewport.center_x / viewport.width as f32,
        -ratio_y + viewport.center_y / viewport.height as f32,
    )
}

pub fn spin_angle_deg(elapsed: f32) -> f32 {
    elapsed * SPIN_DEG_PER_SEC
}

pub struct App {
    viewport: Viewport,
    projection: Mat4x4,
    shaders: Shaders,
    vao: u32,
}

impl App {
    /// Compiles the triangle pipeline and caches the current framebuffer
    /// dimensions. The projection stays identity until the first resize
    /// event delivers real framebuffer geometry.
    pub fn new(system: &System) -> Result<App, String> {
        let (width, height) = system.framebuffer_size();

        let shaders = Shaders::from_str(VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC)?;

        let vao = gl_make_vertex_array();
        gl_make_array_buffer();
        gl_buffer_data_arr_stat(&TRIANGLE);
        gl_vertex_attrib_ptr_enab(0, 3, 6, 0);
        gl_vertex_attrib_ptr_enab(1, 3, 6, 3);
        check_gl_err();

        Ok(App {
            viewport: Viewport::new(width, height),
            projection: Mat4x4::identity(),
            shaders,
            vao,
        })
    }

    pub fn draw_scene(&mut self, system: &mut System) {
        system.clear_screen(0.0, 0.0, 0.0);

        let (mouse_x, mouse_y) = system.cursor_position();
        let (dx, dy) = cursor_offset(&self.viewport, mouse_x, mouse_y);
        let angle = spin_angle_deg(system.elapsed_seconds());

        let modelview =
            Mat4x4::translation(dx, dy, 0.0) * Mat4x4::rotation_deg(angle, SPIN_AXIS);
        let mvp = self.projection * modelview;

        self.shaders.use_program();
        self.shaders.set_mat4fv("mvp", &mvp);
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
        }
    }
}

impl EventHandler for App {
    fn on_key(&mut self, system: &mut System, key: Keycode, action: KeyAction) {
        if quit_requested(key, action) {
            system.set_should_close(true);
        }
    }

    fn on_resize(&mut self, system: &mut System, width: i32, height: i32) {
        self.viewport.resize(width, height);
        system.set_viewport(width, height);
        system.clear_screen(0.0, 0.0, 0.0);
        self.projection = self.viewport.projection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn resize_stores_dimensions_and_center() {
        for (w, h) in [(800, 640), (1, 1), (1920, 1080), (123, 457)] {
            let mut v = Viewport::new(1, 1);
            v.resize(w, h);
            assert_eq!(v.width, w);
            assert_eq!(v.height, h);
            assert_eq!(v.center_x, w as f32 / 2.0);
            assert_eq!(v.center_y, h as f32 / 2.0);
        }
    }

    #[test]
    fn resize_is_idempotent() {
        let mut once = Viewport::new(800, 640);
        once.resize(1024, 768);
        let mut twice = Viewport::new(800, 640);
        twice.resize(1024, 768);
        twice.resize(1024, 768);
        assert_eq!(once.width, twice.width);
        assert_eq!(once.height, twice.height);
        assert_eq!(once.center_x, twice.center_x);
        assert_eq!(once.center_y, twice.center_y);
    }

    #[test]
    fn escape_press_requests_quit() {
        assert!(quit_requested(Keycode::Escape, KeyAction::Press));
    }

    #[test]
    fn other_keys_and_actions_are_ignored() {
        assert!(!quit_requested(Keycode::Escape, KeyAction::Release));
        assert!(!quit_requested(Keycode::Escape, KeyAction::Repeat));
        assert!(!quit_requested(Keycode::Space, KeyAction::Press));
        assert!(!quit_requested(Keycode::Q, KeyAction::Press));
    }

    #[test]
    fn centered_cursor_gives_zero_offset() {
        let v = Viewport::new(800, 640);
        let (dx, dy) = cursor_offset(&v, 400.0, 320.0);
        assert_eq!(dx, 0.0);
        assert_eq!(dy, 0.0);
    }

    #[test]
    fn corner_cursor_offsets() {
        let v = Viewport::new(800, 640);
        let (dx, dy) = cursor_offset(&v, 0.0, 0.0);
        assert!((dx + 0.5).abs() < EPS);
        assert!((dy - 0.5).abs() < EPS);
        let (dx, dy) = cursor_offset(&v, 800.0, 640.0);
        assert!((dx - 0.5).abs() < EPS);
        assert!((dy + 0.5).abs() < EPS);
    }

    #[test]
    fn spin_angle_is_linear_in_time() {
        assert_eq!(spin_angle_deg(0.0), 0.0);
        assert_eq!(spin_angle_deg(2.0), 100.0);
    }

    #[test]
    fn projection_extents_follow_aspect_ratio() {
        // 800x640: ratio 1.25, so left/right = -/+1.25 and bottom/top = -/+1.0
        let p = Viewport::new(800, 640).projection();
        assert!((p[0][0] - 2.0 / 2.5).abs() < EPS);
        assert!((p[1][1] - 1.0).abs() < EPS);
        assert!((p[3][0] - 0.0).abs() < EPS);
        assert!((p[3][1] - 0.0).abs() < EPS);
    }
}
