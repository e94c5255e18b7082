//! Asset loading: OBJ meshes flattened into interleaved vertex buffers.
//! The OBJ loader emits `[pos.xyz, uv.st, normal.xyz]` records,
//! the literal cube emits `[pos.xyz, uv.st]`.

pub mod error;
pub mod mesh;
pub mod obj;
pub mod primitives;

pub use error::{Attribute, ObjError, ObjResult};
pub use mesh::{MeshBuffer, MeshVertex, TexturedVertex, VertexAttribute, VertexLayout};
pub use obj::{ObjLine, classify_line, load_obj_from_path, load_obj_from_reader, load_obj_from_str};
