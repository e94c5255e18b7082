//! OBJ loader for the `v` / `vt` / `vn` / `f v/vt/vn` subset.
//!
//! Faces are fan-triangulated and every corner is expanded into a full
//! `[pos.xyz, uv.st, normal.xyz]` record. No index buffer, no dedup.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    num::IntErrorKind,
    path::Path,
};

use crate::{
    error::{Attribute, ObjError, ObjResult},
    mesh::{MeshBuffer, VertexLayout},
};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> ObjResult<MeshBuffer> {
    let path = path.as_ref();
    log::info!("Loading OBJ mesh from {:?}", path);

    let file = File::open(path).map_err(|source| ObjError::Io {
        path: Some(path.to_path_buf()),
        source,
    })?;
    parse_obj(BufReader::new(file)).map_err(|err| match err {
        ObjError::Io { path: None, source } => ObjError::Io {
            path: Some(path.to_path_buf()),
            source,
        },
        other => other,
    })
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> ObjResult<MeshBuffer> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> ObjResult<MeshBuffer> {
    parse_obj(io::Cursor::new(contents))
}

/// One face corner as written in the file (1-based indices).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corner {
    pub position: usize,
    pub texcoord: usize,
    pub normal: usize,
}

/// A classified OBJ line.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjLine {
    Position([f32; 3]),
    TexCoord([f32; 2]),
    Normal([f32; 3]),
    Face(Vec<Corner>),
    /// Blank lines, comments and directives we don't handle (`o`, `g`, `s`, `mtllib`...).
    Ignored,
}

/// Classify a single line. `line_no` is 1-based and only used for errors.
pub fn classify_line(text: &str, line_no: usize) -> ObjResult<ObjLine> {
    let mut tokens = text.split_whitespace();
    let Some(tag) = tokens.next() else {
        return Ok(ObjLine::Ignored);
    };

    let line = match tag {
        "v" => ObjLine::Position([
            parse_f32(tokens.next(), line_no, "x coordinate")?,
            parse_f32(tokens.next(), line_no, "y coordinate")?,
            parse_f32(tokens.next(), line_no, "z coordinate")?,
        ]),
        "vt" => ObjLine::TexCoord([
            parse_f32(tokens.next(), line_no, "s coordinate")?,
            parse_f32(tokens.next(), line_no, "t coordinate")?,
        ]),
        "vn" => ObjLine::Normal([
            parse_f32(tokens.next(), line_no, "nx component")?,
            parse_f32(tokens.next(), line_no, "ny component")?,
            parse_f32(tokens.next(), line_no, "nz component")?,
        ]),
        "f" => {
            // Fewer than 3 corners is kept as is and fans out to nothing.
            let corners = tokens
                .map(|token| parse_corner(token, line_no))
                .collect::<ObjResult<Vec<_>>>()?;
            ObjLine::Face(corners)
        }
        _ => ObjLine::Ignored,
    };
    Ok(line)
}

/// Triangles `(c0, c1, c2), (c0, c2, c3), ...` for a convex polygon.
pub fn fan_triangles(corners: &[Corner]) -> impl Iterator<Item = [Corner; 3]> + '_ {
    corners
        .windows(2)
        .skip(1)
        .map(move |pair| [corners[0], pair[0], pair[1]])
}

/// Attribute lists accumulated so far plus the output buffer.
struct ObjState {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    out: MeshBuffer,
}

impl ObjState {
    fn new() -> Self {
        Self {
            positions: Vec::new(),
            texcoords: Vec::new(),
            normals: Vec::new(),
            out: MeshBuffer::empty(VertexLayout::PositionTexcoordNormal),
        }
    }

    fn apply(&mut self, line: ObjLine, line_no: usize) -> ObjResult<()> {
        match line {
            ObjLine::Position(p) => self.positions.push(p),
            ObjLine::TexCoord(t) => self.texcoords.push(t),
            ObjLine::Normal(n) => self.normals.push(n),
            ObjLine::Face(corners) => {
                for tri in fan_triangles(&corners) {
                    for corner in tri {
                        self.emit_corner(corner, line_no)?;
                    }
                }
            }
            ObjLine::Ignored => {}
        }
        Ok(())
    }

    fn emit_corner(&mut self, corner: Corner, line_no: usize) -> ObjResult<()> {
        let position = lookup(&self.positions, corner.position, Attribute::Position, line_no)?;
        let texcoord = lookup(&self.texcoords, corner.texcoord, Attribute::TexCoord, line_no)?;
        let normal = lookup(&self.normals, corner.normal, Attribute::Normal, line_no)?;
        self.out.push_record(&[position, texcoord, normal]);
        Ok(())
    }
}

fn parse_obj<R: BufRead>(reader: R) -> ObjResult<MeshBuffer> {
    let mut state = ObjState::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ObjError::Io { path: None, source })?;
        let line_no = idx + 1;
        let parsed = classify_line(&line, line_no)?;
        state.apply(parsed, line_no)?;
    }

    log::debug!(
        "OBJ parsed: {} positions, {} texcoords, {} normals -> {} triangles",
        state.positions.len(),
        state.texcoords.len(),
        state.normals.len(),
        state.out.triangle_count()
    );

    Ok(state.out)
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &'static str) -> ObjResult<f32> {
    let token = value.ok_or_else(|| ObjError::InvalidNumber {
        line: line_no,
        what,
        token: "<missing>".to_owned(),
    })?;
    token.parse::<f32>().map_err(|_| ObjError::InvalidNumber {
        line: line_no,
        what,
        token: token.to_owned(),
    })
}

fn parse_corner(token: &str, line_no: usize) -> ObjResult<Corner> {
    let malformed = || ObjError::MalformedCorner {
        line: line_no,
        corner: token.to_owned(),
    };

    let mut split = token.split('/');
    let mut next_index = || -> ObjResult<usize> {
        let part = split.next().ok_or_else(malformed)?;
        match part.parse::<usize>() {
            Ok(index) => Ok(index),
            // Too large to hold, so it can never resolve.
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(usize::MAX),
            Err(_) => Err(malformed()),
        }
    };
    let corner = Corner {
        position: next_index()?,
        texcoord: next_index()?,
        normal: next_index()?,
    };

    if split.next().is_some() {
        return Err(malformed());
    }
    Ok(corner)
}

/// Resolve a 1-based index against the entries parsed so far.
fn lookup<'a, const N: usize>(
    list: &'a [[f32; N]],
    index: usize,
    attribute: Attribute,
    line_no: usize,
) -> ObjResult<&'a [f32]> {
    index
        .checked_sub(1)
        .and_then(|i| list.get(i))
        .map(|v| v.as_slice())
        .ok_or(ObjError::IndexOutOfRange {
            line: line_no,
            attribute,
            index,
            len: list.len(),
        })
}
