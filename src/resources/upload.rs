//! Hand-off of mesh data to the rendering side.
//!
//! The loader never talks to a graphics API itself. Every buffer it needs is
//! requested from a [`BufferAllocator`]; the returned handles end up in the
//! [`Geometry`](crate::data_structures::model::Geometry) of the output tree.

use std::sync::Arc;

/// Creates buffers for geometry data and returns cheap, clonable handles to them.
pub trait BufferAllocator {
    type Buffer: Clone;

    /// Flat `xyz` floats, used for both positions and normals.
    fn vertex_buffer(&self, label: &str, data: &[f32]) -> Self::Buffer;

    /// Triangle indices.
    fn index_buffer(&self, label: &str, data: &[i16]) -> Self::Buffer;
}

/// A buffer kept in host memory by [`HostBuffers`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostBuffer {
    Vertex(Arc<[f32]>),
    Index(Arc<[i16]>),
}

impl HostBuffer {
    pub fn as_vertices(&self) -> Option<&[f32]> {
        match self {
            HostBuffer::Vertex(data) => Some(data),
            HostBuffer::Index(_) => None,
        }
    }

    pub fn as_indices(&self) -> Option<&[i16]> {
        match self {
            HostBuffer::Index(data) => Some(data),
            HostBuffer::Vertex(_) => None,
        }
    }

    /// `true` if both handles refer to the same allocation.
    pub fn shares_storage(&self, other: &HostBuffer) -> bool {
        match (self, other) {
            (HostBuffer::Vertex(a), HostBuffer::Vertex(b)) => Arc::ptr_eq(a, b),
            (HostBuffer::Index(a), HostBuffer::Index(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Allocator keeping geometry in reference-counted host memory, for headless
/// use and for renderers that upload on their own schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostBuffers;

impl BufferAllocator for HostBuffers {
    type Buffer = HostBuffer;

    fn vertex_buffer(&self, _label: &str, data: &[f32]) -> HostBuffer {
        HostBuffer::Vertex(Arc::from(data))
    }

    fn index_buffer(&self, _label: &str, data: &[i16]) -> HostBuffer {
        HostBuffer::Index(Arc::from(data))
    }
}

#[cfg(feature = "gpu")]
mod gpu {
    use wgpu::util::DeviceExt;

    use super::BufferAllocator;

    /// Indices are non-negative, so the `i16` data is bound as `Uint16`.
    impl BufferAllocator for wgpu::Device {
        type Buffer = wgpu::Buffer;

        fn vertex_buffer(&self, label: &str, data: &[f32]) -> wgpu::Buffer {
            self.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{:?} Vertex Buffer", label)),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX,
            })
        }

        fn index_buffer(&self, label: &str, data: &[i16]) -> wgpu::Buffer {
            self.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{:?} Index Buffer", label)),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::INDEX,
            })
        }
    }
}
