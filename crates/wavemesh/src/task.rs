//! Background mesh loading.
//!
//! A render loop wants to start loading a mesh and keep drawing frames until
//! the buffers are ready. `MeshTask` runs read+parse on a worker thread; the
//! caller polls `is_finished` (not ready -> skip drawing the mesh this frame)
//! and calls `join` to take ownership of the finished, immutable buffers. The
//! join is the synchronization point, so the buffers are fully populated
//! before the caller can observe them.

use std::{path::PathBuf, thread};

use anyhow::{Context, Result, anyhow};

use crate::{mesh::MeshBuffers, source};

/// Handle to an in-flight background mesh load.
#[derive(Debug)]
pub struct MeshTask {
    handle: thread::JoinHandle<Result<MeshBuffers>>,
}

impl MeshTask {
    /// Start loading the OBJ file at `path` on a worker thread.
    pub fn spawn(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let handle = thread::Builder::new()
            .name("mesh-load".into())
            .spawn(move || {
                log::debug!("Loading mesh from {}", path.display());
                source::load_obj_from_path(&path)
            })
            .context("Failed to spawn mesh loader thread")?;
        Ok(Self { handle })
    }

    /// Returns `true` once the load has completed (successfully or not) and
    /// `join` will not block.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the load and take the result.
    pub fn join(self) -> Result<MeshBuffers> {
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => Err(anyhow!("mesh loader thread panicked")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn background_load_delivers_buffers() {
        let path = std::env::temp_dir().join(format!("wavemesh-task-{}.obj", std::process::id()));
        fs::write(&path, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").expect("write");

        let task = MeshTask::spawn(&path).expect("spawn");
        let mesh = task.join().expect("join");
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_surfaces_as_error() {
        let task = MeshTask::spawn("/no/such/mesh.obj").expect("spawn");
        assert!(task.join().is_err());
    }

    #[test]
    fn is_finished_goes_true() {
        let task = MeshTask::spawn("/no/such/mesh.obj").expect("spawn");
        while !task.is_finished() {
            thread::yield_now();
        }
        assert!(task.join().is_err());
    }
}
