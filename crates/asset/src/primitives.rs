//! Literal meshes that don't come from a file.

use crate::mesh::{MeshBuffer, TexturedVertex};

const H: f32 = 0.5;

/// Corner positions of one face, counter-clockwise seen from outside.
const FACES: [[[f32; 3]; 4]; 6] = [
    // +Z
    [[-H, -H, H], [H, -H, H], [H, H, H], [-H, H, H]],
    // -Z
    [[H, -H, -H], [-H, -H, -H], [-H, H, -H], [H, H, -H]],
    // +X
    [[H, -H, H], [H, -H, -H], [H, H, -H], [H, H, H]],
    // -X
    [[-H, -H, -H], [-H, -H, H], [-H, H, H], [-H, H, -H]],
    // +Y
    [[-H, H, H], [H, H, H], [H, H, -H], [-H, H, -H]],
    // -Y
    [[-H, -H, -H], [H, -H, -H], [H, -H, H], [-H, -H, H]],
];

const QUAD_UV: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Two triangles per quad face.
const QUAD_TRIS: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Unit cube centred on the origin, 36 `[pos.xyz, uv.st]` records,
/// each face mapped to the full texture.
pub fn cube() -> MeshBuffer {
    let vertices: Vec<TexturedVertex> = FACES
        .iter()
        .flat_map(|face| {
            QUAD_TRIS.iter().map(move |&i| TexturedVertex {
                position: face[i],
                texcoord: QUAD_UV[i],
            })
        })
        .collect();
    MeshBuffer::from_textured_vertices(&vertices)
}
