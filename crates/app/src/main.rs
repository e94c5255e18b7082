//! Entry point for meshsoup: load an OBJ (or the literal cube) into an
//! interleaved vertex buffer and report what a renderer would receive.

use std::io::{self, Write};

use anyhow::{Context, Result};
use asset::{MeshBuffer, primitives};

const DEFAULT_MESH: &str = "meshes/cube.obj";

/// Where the vertex data comes from.
#[derive(Debug)]
enum Source {
    Obj(String),
    Cube,
}

fn parse_source_arg() -> Source {
    // Accept: --mesh=PATH, --primitive=cube
    let mut source = Source::Obj(DEFAULT_MESH.to_owned());
    for arg in std::env::args().skip(1) {
        if let Some(val) = arg.strip_prefix("--mesh=") {
            source = Source::Obj(val.to_owned());
        } else if let Some(val) = arg.strip_prefix("--primitive=") {
            source = match val.to_ascii_lowercase().as_str() {
                "cube" => Source::Cube,
                other => {
                    log::warn!("Unknown primitive '{}', keeping {:?}.", other, source);
                    source
                }
            };
        }
    }
    source
}

fn parse_dump_arg() -> Option<usize> {
    // --dump[=N], off by default; bare --dump prints every record
    for arg in std::env::args() {
        if arg == "--dump" {
            return Some(usize::MAX);
        }
        if let Some(val) = arg.strip_prefix("--dump=") {
            return match val.parse::<usize>() {
                Ok(n) => Some(n),
                Err(_) => {
                    log::warn!("Invalid --dump value '{}', dumping everything.", val);
                    Some(usize::MAX)
                }
            };
        }
    }
    None
}

fn load(source: &Source) -> Result<MeshBuffer> {
    match source {
        Source::Obj(path) => asset::load_obj_from_path(path)
            .inspect_err(|err| {
                if let Some(line) = err.line() {
                    log::error!("{path}:{line}: mesh rejected");
                }
            })
            .with_context(|| format!("Failed to load mesh {path}")),
        Source::Cube => Ok(primitives::cube()),
    }
}

fn report(mesh: &MeshBuffer) {
    let layout = mesh.layout();
    log::info!(
        "Layout {:?}: {} floats/vertex, stride {} bytes",
        layout,
        layout.record_size(),
        layout.stride()
    );
    for attr in layout.attributes() {
        log::info!(
            "  location {} {:<8} {} x f32 @ offset {}",
            attr.location,
            attr.name,
            attr.components,
            attr.offset
        );
    }
    log::info!(
        "{} vertices, {} triangles, {} bytes",
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.as_bytes().len()
    );
    match mesh.bounds() {
        Some((lo, hi)) => log::info!("Bounds: min {lo}, max {hi}"),
        None => log::warn!("Mesh is empty, nothing to draw."),
    }
}

fn dump(mesh: &MeshBuffer, limit: usize) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for (i, record) in mesh.records().take(limit).enumerate() {
        write!(out, "{i:>6}:")?;
        for value in record {
            write!(out, " {value:>9.4}")?;
        }
        writeln!(out)?;
    }
    out.flush()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let source = parse_source_arg();
    let dump_limit = parse_dump_arg();
    log::info!("Starting meshsoup. Source: {:?}", source);

    let mesh = load(&source)?;
    report(&mesh);

    if let Some(limit) = dump_limit {
        dump(&mesh, limit).context("Failed to write vertex dump")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_source_loads_literal_data() {
        let mesh = load(&Source::Cube).unwrap();
        assert_eq!(mesh.vertex_count(), 36);
    }

    #[test]
    fn missing_obj_keeps_context() {
        let err = load(&Source::Obj("nope/missing.obj".into())).unwrap_err();
        assert_eq!(err.to_string(), "Failed to load mesh nope/missing.obj");
        assert!(err.root_cause().downcast_ref::<std::io::Error>().is_some());
        assert!(err.downcast_ref::<asset::ObjError>().is_some());
    }

    #[test]
    fn parse_errors_keep_their_line() {
        let dir = std::env::temp_dir().join(format!("meshsoup-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.obj");
        std::fs::write(&path, "v 0 0 0\nv 0 oops 0\n").unwrap();

        let err = load(&Source::Obj(path.display().to_string())).unwrap_err();
        let obj = err.downcast_ref::<asset::ObjError>().unwrap();
        assert_eq!(obj.line(), Some(2));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
