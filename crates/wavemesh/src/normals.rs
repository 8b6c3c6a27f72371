//! Per-vertex smooth normal computation for meshes without `vn` data.

use glam::Vec3;

/// Compute area-weighted smooth normals for an indexed triangle mesh.
///
/// Each triangle's cross-product normal (length proportional to its area) is
/// accumulated into its three corner vertices; the sums are normalized at the
/// end. Degenerate triangles contribute nothing, and a vertex whose
/// accumulated normal is zero stays zero. Returns 3 floats per vertex.
///
/// Opt-in: the parser itself never calls this and hands through `vn` data
/// verbatim.
pub fn smooth_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let mut acc = vec![Vec3::ZERO; vertex_count];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
            continue;
        }
        let a = Vec3::from_slice(&positions[3 * i0..3 * i0 + 3]);
        let b = Vec3::from_slice(&positions[3 * i1..3 * i1 + 3]);
        let c = Vec3::from_slice(&positions[3 * i2..3 * i2 + 3]);
        let n = (b - a).cross(c - a);
        acc[i0] += n;
        acc[i1] += n;
        acc[i2] += n;
    }

    let mut out = Vec::with_capacity(3 * vertex_count);
    for n in acc {
        let n = n.normalize_or_zero();
        out.extend_from_slice(&n.to_array());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_quad_points_up() {
        // Unit square in the xy plane, CCW winding: normals are +z.
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0];
        let indices = [0, 1, 2, 0, 2, 3];
        let normals = smooth_normals(&positions, &indices);
        assert_eq!(normals.len(), 12);
        for n in normals.chunks_exact(3) {
            assert!((n[0]).abs() < 1e-6);
            assert!((n[1]).abs() < 1e-6);
            assert!((n[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn unreferenced_vertex_stays_zero() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 5.0, 5.0];
        let indices = [0, 1, 2];
        let normals = smooth_normals(&positions, &indices);
        assert_eq!(&normals[9..12], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn degenerate_triangle_contributes_nothing() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        let indices = [0, 1, 2]; // collinear
        let normals = smooth_normals(&positions, &indices);
        assert!(normals.iter().all(|&f| f == 0.0));
    }
}
