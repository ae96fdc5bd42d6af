use std::ffi::c_void;

use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn floats(self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("vertex layout has no attributes")]
    EmptyLayout,
    #[error("data length {len} is not a multiple of the vertex stride {stride}")]
    InvalidDataLength { len: usize, stride: usize },
}

/// Ordered description of one interleaved vertex record.
#[derive(Clone, Debug, Default)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    pub fn push(mut self, attribute: VertexAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Stride of one vertex, in floats.
    pub fn stride(&self) -> usize {
        self.attributes.iter().map(|a| a.floats()).sum()
    }

    /// Float offset of each attribute within a vertex record.
    pub fn offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.attributes.len());
        let mut offset = 0;

        for attribute in &self.attributes {
            offsets.push(offset);
            offset += attribute.floats();
        }

        offsets
    }

    pub fn vertex_count(&self, data: &[f32]) -> Result<usize, GeometryError> {
        let stride = self.stride();

        if stride == 0 {
            return Err(GeometryError::EmptyLayout);
        }

        if data.len() % stride != 0 {
            return Err(GeometryError::InvalidDataLength {
                len: data.len(),
                stride,
            });
        }

        Ok(data.len() / stride)
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }
}

pub struct VertexBuffer {
    vao: u32,
    vbo: u32,
    vertices: usize,
}

impl VertexBuffer {
    /// Uploads one static interleaved float array and records the
    /// attribute pointers in a fresh VAO.
    pub fn with_layout(layout: &VertexLayout, data: &[f32]) -> Result<Self, GeometryError> {
        let vertices = layout.vertex_count(data)?;
        let stride_bytes = (layout.stride() * std::mem::size_of::<f32>()) as i32;

        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                (data.len() * std::mem::size_of::<f32>()) as isize,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            for (i, (attribute, offset)) in layout
                .attributes()
                .iter()
                .zip(layout.offsets())
                .enumerate()
            {
                gl::VertexAttribPointer(
                    i as u32,
                    attribute.floats() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    stride_bytes,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                gl::EnableVertexAttribArray(i as u32);
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        Ok(Self {
            vao,
            vbo,
            vertices,
        })
    }

    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_sums_attribute_widths() {
        let layout = VertexLayout::new()
            .push(VertexAttribute::Vec3)
            .push(VertexAttribute::Vec2)
            .push(VertexAttribute::Float);

        assert_eq!(layout.stride(), 6);
        assert_eq!(layout.offsets(), vec![0, 3, 5]);
    }

    #[test]
    fn vertex_count_divides_data() {
        let layout = VertexLayout::new()
            .push(VertexAttribute::Vec3)
            .push(VertexAttribute::Vec2);

        assert_eq!(layout.vertex_count(&[0.0; 30]).unwrap(), 6);
    }

    #[test]
    fn vertex_count_rejects_partial_vertices() {
        let layout = VertexLayout::new().push(VertexAttribute::Vec3);

        assert!(matches!(
            layout.vertex_count(&[0.0; 7]),
            Err(GeometryError::InvalidDataLength { len: 7, stride: 3 })
        ));
    }

    #[test]
    fn empty_layout_is_rejected() {
        let layout = VertexLayout::new();

        assert!(matches!(
            layout.vertex_count(&[]),
            Err(GeometryError::EmptyLayout)
        ));
    }
}
