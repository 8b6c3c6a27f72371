//! objprobe: load OBJ files and report the resulting mesh buffer statistics.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use wavemesh::{MeshTask, normals};

fn parse_smooth_normals_arg() -> bool {
    // Accept: --smooth-normals[=on|off], default off
    for arg in std::env::args() {
        if arg == "--smooth-normals" {
            return true;
        }
        if let Some(val) = arg.strip_prefix("--smooth-normals=") {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    false
}

fn parse_path_args() -> Vec<PathBuf> {
    std::env::args()
        .skip(1)
        .filter(|arg| !arg.starts_with("--"))
        .map(PathBuf::from)
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let smooth = parse_smooth_normals_arg();
    let paths = parse_path_args();
    if paths.is_empty() {
        bail!("usage: objprobe [--smooth-normals] <file.obj>...");
    }
    log::info!(
        "Probing {} mesh(es), smooth_normals={}",
        paths.len(),
        smooth
    );

    // Spawn every load up front so the files parse in parallel, then report
    // in argument order.
    let mut tasks = Vec::with_capacity(paths.len());
    for path in &paths {
        tasks.push(MeshTask::spawn(path)?);
    }

    for (path, task) in paths.iter().zip(tasks) {
        let mut mesh = task
            .join()
            .with_context(|| format!("Failed to load {}", path.display()))?;
        if smooth && !mesh.has_normals() {
            mesh.normals = normals::smooth_normals(&mesh.positions, &mesh.indices);
            log::info!("{}: filled in smooth normals", path.display());
        }
        log::info!(
            "{}: {} vertices, {} triangles, normals={}, texcoords={}",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.has_normals(),
            mesh.has_texcoords()
        );
    }

    Ok(())
}
