// Background mesh: loaded once from a Wavefront OBJ, centered on the origin
// and scaled so its longest side has a fixed length.

use std::path::Path;

use tracing::info;

use crate::error::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds {
    pub fn center(&self) -> [f32; 3] {
        [0usize, 1, 2].map(|i| (self.min[i] + self.max[i]) / 2.0)
    }

    pub fn longest_side(&self) -> f32 {
        (0..3).map(|i| self.max[i] - self.min[i]).fold(0.0, f32::max)
    }
}

impl Mesh {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ignore_points: true,
                ignore_lines: true,
                ..Default::default()
            },
        )
        .map_err(|e| Error::Asset(format!("{}: {e}", path.display())))?;

        // Several objects in one file share one vertex list here.
        let mut vertices = Vec::new();
        let mut triangles = Vec::new();
        for model in &models {
            let base = vertices.len() as u32;
            let m = &model.mesh;
            vertices.extend(m.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]));
            triangles.extend(
                m.indices
                    .chunks_exact(3)
                    .map(|t| [base + t[0], base + t[1], base + t[2]]),
            );
        }

        let mesh = Mesh { vertices, triangles };
        if mesh.bounds().is_none() {
            return Err(Error::Asset(format!("{}: no vertices", path.display())));
        }
        info!(
            path = %path.display(),
            vertices = mesh.vertices.len(),
            triangles = mesh.triangles.len(),
            "mesh loaded"
        );
        Ok(mesh)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.vertices.first()?;
        let mut b = Bounds { min: first, max: first };
        for v in &self.vertices {
            for i in 0..3 {
                b.min[i] = b.min[i].min(v[i]);
                b.max[i] = b.max[i].max(v[i]);
            }
        }
        Some(b)
    }

    /// Copy of the mesh with its box centered at the origin and its longest
    /// side stretched to `size`. A flat point cloud (zero extent) is only
    /// centered.
    pub fn fitted(&self, size: f32) -> Mesh {
        let Some(b) = self.bounds() else {
            return self.clone();
        };
        let c = b.center();
        let longest = b.longest_side();
        let s = if longest > 0.0 { size / longest } else { 1.0 };
        let vertices = self
            .vertices
            .iter()
            .map(|v| [0usize, 1, 2].map(|i| (v[i] - c[i]) * s))
            .collect();
        Mesh { vertices, triangles: self.triangles.clone() }
    }

    /// Unique undirected edges, for wireframe drawing.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<(u32, u32)> = self
            .triangles
            .iter()
            .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_mesh() -> Mesh {
        // 2 x 4 x 1 box from (1,1,1) to (3,5,2), two faces are enough
        Mesh {
            vertices: vec![
                [1.0, 1.0, 1.0],
                [3.0, 1.0, 1.0],
                [3.0, 5.0, 1.0],
                [1.0, 5.0, 2.0],
            ],
            triangles: vec![[0, 1, 2], [0, 2, 3]],
        }
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let b = box_mesh().bounds().unwrap();
        assert_eq!(b.min, [1.0, 1.0, 1.0]);
        assert_eq!(b.max, [3.0, 5.0, 2.0]);
        assert_eq!(b.center(), [2.0, 3.0, 1.5]);
        assert_eq!(b.longest_side(), 4.0);
    }

    #[test]
    fn fitted_is_centered_and_scaled() {
        let m = box_mesh().fitted(5.0);
        let b = m.bounds().unwrap();
        assert_eq!(b.center(), [0.0, 0.0, 0.0]);
        assert!((b.longest_side() - 5.0).abs() < 1e-5);
        assert_eq!(m.triangles, box_mesh().triangles);
    }

    #[test]
    fn shared_edges_are_drawn_once() {
        let e = box_mesh().edges();
        assert_eq!(e, vec![(0, 1), (0, 2), (0, 3), (1, 2), (2, 3)]);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        let m = Mesh { vertices: vec![], triangles: vec![] };
        assert!(m.bounds().is_none());
        assert_eq!(m.fitted(3.0), m);
    }

    #[test]
    fn missing_file_is_an_asset_error() {
        let err = Mesh::load(Path::new("does/not/exist.obj")).unwrap_err();
        assert!(matches!(err, Error::Asset(_)));
    }
}
