//! CPU-side interleaved vertex buffers handed to the renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One vertex attribute inside an interleaved record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    /// Shader attribute location.
    pub location: u32,
    /// Number of `f32` components.
    pub components: usize,
    /// Byte offset from the start of the record.
    pub offset: usize,
}

const POSITION: VertexAttribute = VertexAttribute {
    name: "position",
    location: 0,
    components: 3,
    offset: 0,
};

const TEXCOORD: VertexAttribute = VertexAttribute {
    name: "texcoord",
    location: 1,
    components: 2,
    offset: 12,
};

const NORMAL: VertexAttribute = VertexAttribute {
    name: "normal",
    location: 2,
    components: 3,
    offset: 20,
};

const POSITION_TEXCOORD: &[VertexAttribute] = &[POSITION, TEXCOORD];
const POSITION_TEXCOORD_NORMAL: &[VertexAttribute] = &[POSITION, TEXCOORD, NORMAL];

/// Record layout of a [`MeshBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexLayout {
    /// `[x, y, z, s, t]`
    PositionTexcoord,
    /// `[x, y, z, s, t, nx, ny, nz]`
    PositionTexcoordNormal,
}

impl VertexLayout {
    /// Floats per vertex record.
    pub const fn record_size(self) -> usize {
        match self {
            VertexLayout::PositionTexcoord => 5,
            VertexLayout::PositionTexcoordNormal => 8,
        }
    }

    /// Bytes per vertex record.
    pub const fn stride(self) -> usize {
        self.record_size() * std::mem::size_of::<f32>()
    }

    pub const fn attributes(self) -> &'static [VertexAttribute] {
        match self {
            VertexLayout::PositionTexcoord => POSITION_TEXCOORD,
            VertexLayout::PositionTexcoordNormal => POSITION_TEXCOORD_NORMAL,
        }
    }
}

/// Vertex with position/texcoord/normal, laid out like one 8-float record.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], texcoord: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

/// Vertex with position/texcoord, laid out like one 5-float record.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
}

/// Non-indexed triangle list ("vertex soup"): every corner of every
/// triangle is stored in full, three records per triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBuffer {
    layout: VertexLayout,
    data: Vec<f32>,
}

impl MeshBuffer {
    /// Wraps raw floats. Returns `None` unless `data` holds whole records.
    pub fn new(layout: VertexLayout, data: Vec<f32>) -> Option<Self> {
        (data.len() % layout.record_size() == 0).then_some(Self { layout, data })
    }

    pub fn from_mesh_vertices(vertices: &[MeshVertex]) -> Self {
        Self {
            layout: VertexLayout::PositionTexcoordNormal,
            data: bytemuck::cast_slice(vertices).to_vec(),
        }
    }

    pub fn from_textured_vertices(vertices: &[TexturedVertex]) -> Self {
        Self {
            layout: VertexLayout::PositionTexcoord,
            data: bytemuck::cast_slice(vertices).to_vec(),
        }
    }

    #[inline]
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    #[inline]
    pub fn floats(&self) -> &[f32] {
        &self.data
    }

    /// Byte view for GPU upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.data.as_slice())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.layout.record_size()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over records, one slice of `record_size` floats per vertex.
    pub fn records(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.layout.record_size())
    }

    /// Typed view, only for the 8-float layout.
    pub fn as_mesh_vertices(&self) -> Option<&[MeshVertex]> {
        match self.layout {
            VertexLayout::PositionTexcoordNormal => {
                bytemuck::try_cast_slice(self.data.as_slice()).ok()
            }
            VertexLayout::PositionTexcoord => None,
        }
    }

    /// Typed view, only for the 5-float layout.
    pub fn as_textured_vertices(&self) -> Option<&[TexturedVertex]> {
        match self.layout {
            VertexLayout::PositionTexcoord => {
                bytemuck::try_cast_slice(self.data.as_slice()).ok()
            }
            VertexLayout::PositionTexcoordNormal => None,
        }
    }

    /// Axis-aligned bounds of all positions as `(min, max)`.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.records().map(|r| Vec3::new(r[0], r[1], r[2]));
        let first = positions.next()?;
        Some(positions.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    pub(crate) fn empty(layout: VertexLayout) -> Self {
        Self {
            layout,
            data: Vec::new(),
        }
    }

    pub(crate) fn push_record(&mut self, parts: &[&[f32]]) {
        let start = self.data.len();
        for part in parts {
            self.data.extend_from_slice(part);
        }
        debug_assert_eq!(self.data.len() - start, self.layout.record_size());
    }
}
