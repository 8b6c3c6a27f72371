//! CPU-side mesh buffers produced by the OBJ parser.

/// Flat, tightly packed buffers ready for vertex/index buffer upload.
///
/// `positions` holds 3 floats per vertex. `normals` (3 per vertex) and
/// `texcoords` (2 per vertex) are either sized to the vertex count or empty;
/// an empty buffer means the source file carried no `vn`/`vt` lines and the
/// attribute must not be bound. `indices` is a flat triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    /// Returns `true` if the buffers form a consistent indexed triangle mesh:
    /// non-empty, every index in range, and each optional attribute either
    /// absent or sized to the vertex count.
    pub fn is_valid(&self) -> bool {
        let n = self.vertex_count();
        !self.positions.is_empty()
            && !self.indices.is_empty()
            && self.positions.len() % 3 == 0
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
            && (self.normals.is_empty() || self.normals.len() == 3 * n)
            && (self.texcoords.is_empty() || self.texcoords.len() == 2 * n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> MeshBuffers {
        MeshBuffers {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            normals: Vec::new(),
            texcoords: Vec::new(),
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn counts_and_validity() {
        let mesh = square();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.has_normals());
        assert!(!mesh.has_texcoords());
        assert!(mesh.is_valid());
    }

    #[test]
    fn out_of_range_index_is_invalid() {
        let mut mesh = square();
        mesh.indices[4] = 9;
        assert!(!mesh.is_valid());
    }

    #[test]
    fn short_attribute_buffer_is_invalid() {
        let mut mesh = square();
        mesh.normals = vec![0.0, 0.0, 1.0];
        assert!(!mesh.is_valid());
    }

    #[test]
    fn empty_mesh_is_invalid() {
        assert!(!MeshBuffers::default().is_valid());
    }
}
