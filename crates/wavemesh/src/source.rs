//! Text acquisition for the parser. All file I/O lives here; `parse_obj`
//! itself only ever sees an in-memory string.

use std::{
    fs,
    io::{BufRead, Read},
    path::Path,
};

use anyhow::{Context, Result};

use crate::{mesh::MeshBuffers, obj};

/// Read a file to a string, with the path in any error.
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Load and parse an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<MeshBuffers> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let mesh = obj::parse_obj(&text)
        .with_context(|| format!("Failed to parse OBJ {}", path.display()))?;
    log::debug!(
        "Parsed {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load and parse an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(mut reader: R) -> Result<MeshBuffers> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read OBJ stream")?;
    Ok(obj::parse_obj(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn temp_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("wavemesh-{}-{}", std::process::id(), name));
        fs::write(&path, contents).expect("write temp obj");
        path
    }

    #[test]
    fn load_from_path_round_trips() {
        let path = temp_obj(
            "square.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let mesh = load_obj_from_path(&path).expect("load");
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_obj_from_path("/no/such/mesh.obj").expect_err("must fail");
        assert!(format!("{err:#}").contains("/no/such/mesh.obj"));
    }

    #[test]
    fn parse_error_carries_location() {
        let path = temp_obj("broken.obj", "v 0 0 0\nf 1 2\n");
        let err = load_obj_from_path(&path).expect_err("must fail");
        let chain = format!("{err:#}");
        assert!(chain.contains("line 2"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn load_from_reader() {
        let mesh = load_obj_from_reader(Cursor::new("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n"))
            .expect("reader load");
        assert_eq!(mesh.triangle_count(), 1);
    }
}
