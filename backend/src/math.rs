use std::mem;
use std::ops::{Index, IndexMut, Mul};

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3 { x, y, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        Vec3::new(self.x / len, self.y / len, self.z / len)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
        Vec4 { x, y, z, w }
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[f32; 4] {
        let ary: &[f32; 4] = unsafe { mem::transmute(self) };
        ary
    }
    #[inline(always)]
    pub fn as_array_mut(&mut self) -> &mut [f32; 4] {
        let ary: &mut [f32; 4] = unsafe { mem::transmute(self) };
        ary
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;
    #[inline(always)]
    fn index<'a>(&'a self, i: usize) -> &'a f32 {
        self.as_array().index(i)
    }
}

impl IndexMut<usize> for Vec4 {
    #[inline(always)]
    fn index_mut<'a>(&'a mut self, i: usize) -> &'a mut f32 {
        self.as_array_mut().index_mut(i)
    }
}

/// Column-major 4x4 matrix; `c0`..`c3` are the columns, as OpenGL expects.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct Mat4x4 {
    pub c0: Vec4,
    pub c1: Vec4,
    pub c2: Vec4,
    pub c3: Vec4,
}

impl Mat4x4 {
    #[inline(always)]
    pub fn as_array(&self) -> &[Vec4; 4] {
        let ary: &[Vec4; 4] = unsafe { mem::transmute(self) };
        ary
    }
    #[inline(always)]
    pub fn as_array_mut(&mut self) -> &mut [Vec4; 4] {
        let ary: &mut [Vec4; 4] = unsafe { mem::transmute(self) };
        ary
    }

    pub fn zero() -> Mat4x4 {
        Mat4x4 {
            c0: Vec4::new(0.0, 0.0, 0.0, 0.0),
            c1: Vec4::new(0.0, 0.0, 0.0, 0.0),
            c2: Vec4::new(0.0, 0.0, 0.0, 0.0),
            c3: Vec4::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn identity() -> Mat4x4 {
        Mat4x4 {
            c0: Vec4::new(1.0, 0.0, 0.0, 0.0),
            c1: Vec4::new(0.0, 1.0, 0.0, 0.0),
            c2: Vec4::new(0.0, 0.0, 1.0, 0.0),
            c3: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    /// Orthographic projection with the same parameterization as glOrtho.
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4x4 {
        let mut m = Mat4x4::zero();
        m[0][0] = 2.0 / (right - left);
        m[1][1] = 2.0 / (top - bottom);
        m[2][2] = -2.0 / (far - near);
        m[3] = Vec4::new(
            -(right + left) / (right - left),
            -(top + bottom) / (top - bottom),
            -(far + near) / (far - near),
            1.0,
        );
        m
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Mat4x4 {
        let mut m = Mat4x4::identity();
        m[3] = Vec4::new(x, y, z, 1.0);
        m
    }

    /// Rotation about an arbitrary axis, matching glRotatef: angle in
    /// degrees, axis normalized before use.
    pub fn rotation_deg(angle_deg: f32, axis: Vec3) -> Mat4x4 {
        let axis = axis.normalized();
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let rad = angle_deg.to_radians();
        let c = rad.cos();
        let s = rad.sin();
        let t = 1.0 - c;

        let mut m = Mat4x4::identity();
        m[0] = Vec4::new(t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0);
        m[1] = Vec4::new(t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0);
        m[2] = Vec4::new(t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0);
        m
    }
}

impl Index<usize> for Mat4x4 {
    type Output = Vec4;
    #[inline(always)]
    fn index<'a>(&'a self, i: usize) -> &'a Vec4 {
        self.as_array().index(i)
    }
}

impl IndexMut<usize> for Mat4x4 {
    #[inline(always)]
    fn index_mut<'a>(&'a mut self, i: usize) -> &'a mut Vec4 {
        self.as_array_mut().index_mut(i)
    }
}

impl Mul for Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, rhs: Mat4x4) -> Mat4x4 {
        let mut m = Mat4x4::zero();
        for j in 0..4 {
            for i in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self[k][i] * rhs[j][k];
                }
                m[j][i] = acc;
            }
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    fn assert_mat_close(a: &Mat4x4, b: &Mat4x4) {
        for j in 0..4 {
            for i in 0..4 {
                assert!((a[j][i] - b[j][i]).abs() < EPS, "column {j} row {i}: {a:?} != {b:?}");
            }
        }
    }

    #[test]
    fn identity_is_multiplicative_neutral() {
        let m = Mat4x4::translation(3.0, -1.0, 2.0);
        assert_mat_close(&(Mat4x4::identity() * m), &m);
        assert_mat_close(&(m * Mat4x4::identity()), &m);
    }

    #[test]
    fn ortho_matches_gl_convention() {
        // 800x640 framebuffer: ratio 1.25, extents (-1.25, 1.25, -1, 1)
        let p = Mat4x4::ortho(-1.25, 1.25, -1.0, 1.0, 1.0, -1.0);
        assert_close(p[0][0], 2.0 / 2.5);
        assert_close(p[1][1], 1.0);
        assert_close(p[2][2], 1.0);
        assert_close(p[3][0], 0.0);
        assert_close(p[3][1], 0.0);
        assert_close(p[3][2], 0.0);
        assert_close(p[3][3], 1.0);
    }

    #[test]
    fn zero_angle_rotation_is_identity() {
        let r = Mat4x4::rotation_deg(0.0, Vec3::new(-0.2, 0.0, 1.0));
        assert_mat_close(&r, &Mat4x4::identity());
    }

    #[test]
    fn quarter_turn_about_z() {
        let r = Mat4x4::rotation_deg(90.0, Vec3::new(0.0, 0.0, 1.0));
        // x axis maps to y, y axis maps to -x
        assert_close(r[0][0], 0.0);
        assert_close(r[0][1], 1.0);
        assert_close(r[1][0], -1.0);
        assert_close(r[1][1], 0.0);
        assert_close(r[2][2], 1.0);
    }

    #[test]
    fn rotation_axis_is_normalized() {
        let a = Mat4x4::rotation_deg(33.0, Vec3::new(0.0, 0.0, 10.0));
        let b = Mat4x4::rotation_deg(33.0, Vec3::new(0.0, 0.0, 1.0));
        assert_mat_close(&a, &b);
    }

    #[test]
    fn translation_stores_offset_in_last_column() {
        let t = Mat4x4::translation(1.0, 2.0, 0.0) * Mat4x4::identity();
        assert_close(t[3][0], 1.0);
        assert_close(t[3][1], 2.0);
        assert_close(t[3][2], 0.0);
    }
}
