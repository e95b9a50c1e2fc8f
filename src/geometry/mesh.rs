use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};

/// Decimal places kept when deciding whether two vertices coincide.
const MERGE_PRECISION: f32 = 1.0e4;

/// Indexed triangle mesh with optional per-face and per-vertex normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals; empty until computed or supplied.
    pub normals: Vec<Vec3>,
    /// Triangles as vertex index triples.
    pub triangles: Vec<[u32; 3]>,
    /// Per-triangle normals; empty until computed.
    pub face_normals: Vec<Vec3>,
}

impl TriangleMesh {
    /// Mesh from positions and triangles, normals not yet computed.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            positions,
            normals: Vec::new(),
            triangles,
            face_normals: Vec::new(),
        }
    }

    /// Mesh from flattened vertex and face arrays.
    ///
    /// Faces that reference a vertex past the end of `vertices` are dropped.
    #[must_use]
    pub fn from_flat(vertices: &[f32], faces: &[u32]) -> Self {
        let positions = super::points_from_flat(vertices);
        let count = positions.len() as u32;
        let mut skipped = 0_usize;
        let triangles = faces
            .chunks_exact(3)
            .filter_map(|f| {
                let tri = [f[0], f[1], f[2]];
                if tri.iter().all(|&i| i < count) {
                    Some(tri)
                } else {
                    skipped += 1;
                    None
                }
            })
            .collect();
        if skipped > 0 {
            log::warn!("dropped {skipped} faces with out-of-range vertex indices");
        }
        Self::new(positions, triangles)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Flattened triangle indices, ready for an index buffer.
    #[must_use]
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Collapse vertices that agree to four decimal places, remap the
    /// triangles and drop any triangle that degenerates in the process.
    /// Normals are invalidated. Returns the number of vertices removed.
    pub fn merge_vertices(&mut self) -> usize {
        let mut unique: FxHashMap<[i64; 3], u32> = FxHashMap::default();
        let mut positions = Vec::with_capacity(self.positions.len());
        let mut remap = Vec::with_capacity(self.positions.len());

        for p in &self.positions {
            let key = [
                (p.x * MERGE_PRECISION).round() as i64,
                (p.y * MERGE_PRECISION).round() as i64,
                (p.z * MERGE_PRECISION).round() as i64,
            ];
            let index = *unique.entry(key).or_insert_with(|| {
                positions.push(*p);
                (positions.len() - 1) as u32
            });
            remap.push(index);
        }

        let removed = self.positions.len() - positions.len();
        self.positions = positions;
        self.triangles = self
            .triangles
            .iter()
            .map(|t| t.map(|i| remap[i as usize]))
            .filter(|[a, b, c]| a != b && b != c && a != c)
            .collect();
        self.normals.clear();
        self.face_normals.clear();
        removed
    }

    /// Unit normal of every triangle, counter-clockwise front faces.
    pub fn compute_face_normals(&mut self) {
        self.face_normals = self
            .triangles
            .iter()
            .map(|&[a, b, c]| {
                let va = self.positions[a as usize];
                let vb = self.positions[b as usize];
                let vc = self.positions[c as usize];
                (vc - vb).cross(va - vb).normalize_or_zero()
            })
            .collect();
    }

    /// Per-vertex normals as the normalized sum of adjacent face normals.
    /// Computes face normals first if they are missing.
    pub fn compute_vertex_normals(&mut self) {
        if self.face_normals.len() != self.triangles.len() {
            self.compute_face_normals();
        }
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for (tri, face_normal) in self.triangles.iter().zip(&self.face_normals) {
            for &i in tri {
                normals[i as usize] += *face_normal;
            }
        }
        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Append `other` with every position mapped through `transform`.
    /// Normals are carried over unchanged when both meshes have them.
    pub fn append_transformed(
        &mut self,
        other: &TriangleMesh,
        transform: impl Fn(Vec3) -> Vec3,
    ) {
        let offset = self.positions.len() as u32;
        let carry_normals = self.normals.len() == self.positions.len()
            && other.normals.len() == other.positions.len();
        self.positions
            .extend(other.positions.iter().map(|&p| transform(p)));
        if carry_normals {
            self.normals.extend_from_slice(&other.normals);
        } else {
            self.normals.clear();
        }
        self.triangles
            .extend(other.triangles.iter().map(|t| t.map(|i| i + offset)));
        self.face_normals.clear();
    }

    /// Unique edges as a flattened line list, in first-seen order.
    #[must_use]
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
        let mut lines = Vec::with_capacity(self.triangles.len() * 4);
        for &[a, b, c] in &self.triangles {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                if seen.insert((u.min(v), u.max(v))) {
                    lines.push(u);
                    lines.push(v);
                }
            }
        }
        lines
    }
}
