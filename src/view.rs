// World → screen math for the wireframe mesh.
// Screen pixels have the origin top-left and y down; world space has y up.

pub const EYE_DISTANCE: f32 = 10.0; // model sits this far in front of the viewer

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Flat mapping: world units scaled to pixels around the screen center.
    Ortho { pixels_per_unit: f32 },
    /// Pinhole camera looking down -z.
    Perspective { fov_y_deg: f32, near: f32, far: f32 },
}

impl Projection {
    pub fn perspective() -> Self {
        Projection::Perspective { fov_y_deg: 45.0, near: 1.0, far: 500.0 }
    }

    /// Project a point already placed in view space. `None` when the
    /// point falls outside the depth range.
    pub fn project(&self, p: [f32; 3], width: usize, height: usize) -> Option<(i32, i32)> {
        let (w, h) = (width as f32, height as f32);
        match *self {
            Projection::Ortho { pixels_per_unit } => {
                let x = w / 2.0 + p[0] * pixels_per_unit;
                let y = h / 2.0 - p[1] * pixels_per_unit;
                Some((x.round() as i32, y.round() as i32))
            }
            Projection::Perspective { fov_y_deg, near, far } => {
                let depth = -p[2];
                if depth < near || depth > far {
                    return None;
                }
                let f = 1.0 / (fov_y_deg.to_radians() / 2.0).tan();
                let aspect = w / h;
                let ndc_x = f / aspect * p[0] / depth;
                let ndc_y = f * p[1] / depth;
                let x = (ndc_x + 1.0) / 2.0 * w;
                let y = (1.0 - ndc_y) / 2.0 * h;
                Some((x.round() as i32, y.round() as i32))
            }
        }
    }
}

/// Rotate `v` by `deg` degrees around `axis` (right-handed, axis need not be unit length).
pub fn rotate(v: [f32; 3], axis: [f32; 3], deg: f32) -> [f32; 3] {
    let len = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
    if len == 0.0 {
        return v;
    }
    let k = [axis[0] / len, axis[1] / len, axis[2] / len];
    let (s, c) = deg.to_radians().sin_cos();

    // Rodrigues: v c + (k × v) s + k (k·v)(1 - c)
    let cross = [
        k[1] * v[2] - k[2] * v[1],
        k[2] * v[0] - k[0] * v[2],
        k[0] * v[1] - k[1] * v[0],
    ];
    let dot = k[0] * v[0] + k[1] * v[1] + k[2] * v[2];
    [0usize, 1, 2].map(|i| v[i] * c + cross[i] * s + k[i] * dot * (1.0 - c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: [f32; 3], b: [f32; 3]) -> bool {
        (0..3).all(|i| (a[i] - b[i]).abs() < 1e-4)
    }

    #[test]
    fn quarter_turn_about_z() {
        assert!(near(rotate([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], 90.0), [0.0, 1.0, 0.0]));
    }

    #[test]
    fn axis_is_fixed_under_rotation() {
        let axis = [5.0, 1.0, 1.0];
        assert!(near(rotate(axis, axis, 37.0), axis));
    }

    #[test]
    fn ortho_maps_origin_to_center_with_y_up() {
        let p = Projection::Ortho { pixels_per_unit: 10.0 };
        assert_eq!(p.project([0.0, 0.0, 0.0], 800, 600), Some((400, 300)));
        assert_eq!(p.project([1.0, 1.0, 9.0], 800, 600), Some((410, 290)));
    }

    #[test]
    fn perspective_centers_the_view_axis() {
        let p = Projection::perspective();
        assert_eq!(p.project([0.0, 0.0, -EYE_DISTANCE], 800, 600), Some((400, 300)));
    }

    #[test]
    fn perspective_shrinks_with_distance() {
        let p = Projection::perspective();
        let (x_near, _) = p.project([1.0, 0.0, -5.0], 800, 600).unwrap();
        let (x_far, _) = p.project([1.0, 0.0, -20.0], 800, 600).unwrap();
        assert!(x_near > x_far && x_far > 400);
    }

    #[test]
    fn perspective_clips_behind_near_plane() {
        let p = Projection::perspective();
        assert_eq!(p.project([0.0, 0.0, -0.5], 800, 600), None);
        assert_eq!(p.project([0.0, 0.0, 3.0], 800, 600), None);
        assert_eq!(p.project([0.0, 0.0, -600.0], 800, 600), None);
    }
}
