//! Wavefront OBJ parsing into flat, GPU-ready mesh buffers.
//! Core: line-oriented OBJ parser with corner-token deduplication and
//! quad fan triangulation.
//! Extras: smooth-normal computation, file loading, background load task.

pub mod mesh;
pub mod normals;
pub mod obj;
pub mod source;
pub mod task;

pub use mesh::MeshBuffers;
pub use obj::{MalformedKind, MalformedObj, parse_obj};
pub use task::MeshTask;
