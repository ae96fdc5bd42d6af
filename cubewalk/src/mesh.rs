use gl_kit::geometry::{VertexAttribute, VertexLayout};

/// One triangle, interleaved position + color.
#[rustfmt::skip]
pub const TRIANGLE: [f32; 18] = [
    -0.5, -0.5, 0.0,    1.0, 0.0, 0.0,
    0.5, -0.5, 0.0,     0.0, 1.0, 0.0,
    0.0, 0.5, 0.0,      0.0, 0.0, 1.0,
];

/// Unit cube as 12 triangles, interleaved position + texture coordinate.
#[rustfmt::skip]
pub const CUBE: [f32; 180] = [
    -0.5, -0.5, -0.5,   0.0, 0.0,
    0.5, -0.5, -0.5,    1.0, 0.0,
    0.5, 0.5, -0.5,     1.0, 1.0,
    0.5, 0.5, -0.5,     1.0, 1.0,
    -0.5, 0.5, -0.5,    0.0, 1.0,
    -0.5, -0.5, -0.5,   0.0, 0.0,

    -0.5, -0.5, 0.5,    0.0, 0.0,
    0.5, -0.5, 0.5,     1.0, 0.0,
    0.5, 0.5, 0.5,      1.0, 1.0,
    0.5, 0.5, 0.5,      1.0, 1.0,
    -0.5, 0.5, 0.5,     0.0, 1.0,
    -0.5, -0.5, 0.5,    0.0, 0.0,

    -0.5, 0.5, 0.5,     1.0, 0.0,
    -0.5, 0.5, -0.5,    1.0, 1.0,
    -0.5, -0.5, -0.5,   0.0, 1.0,
    -0.5, -0.5, -0.5,   0.0, 1.0,
    -0.5, -0.5, 0.5,    0.0, 0.0,
    -0.5, 0.5, 0.5,     1.0, 0.0,

    0.5, 0.5, 0.5,      1.0, 0.0,
    0.5, 0.5, -0.5,     1.0, 1.0,
    0.5, -0.5, -0.5,    0.0, 1.0,
    0.5, -0.5, -0.5,    0.0, 1.0,
    0.5, -0.5, 0.5,     0.0, 0.0,
    0.5, 0.5, 0.5,      1.0, 0.0,

    -0.5, -0.5, -0.5,   0.0, 1.0,
    0.5, -0.5, -0.5,    1.0, 1.0,
    0.5, -0.5, 0.5,     1.0, 0.0,
    0.5, -0.5, 0.5,     1.0, 0.0,
    -0.5, -0.5, 0.5,    0.0, 0.0,
    -0.5, -0.5, -0.5,   0.0, 1.0,

    -0.5, 0.5, -0.5,    0.0, 1.0,
    0.5, 0.5, -0.5,     1.0, 1.0,
    0.5, 0.5, 0.5,      1.0, 0.0,
    0.5, 0.5, 0.5,      1.0, 0.0,
    -0.5, 0.5, 0.5,     0.0, 0.0,
    -0.5, 0.5, -0.5,    0.0, 1.0,
];

pub fn triangle_layout() -> VertexLayout {
    VertexLayout::new()
        .push(VertexAttribute::Vec3)
        .push(VertexAttribute::Vec3)
}

pub fn cube_layout() -> VertexLayout {
    VertexLayout::new()
        .push(VertexAttribute::Vec3)
        .push(VertexAttribute::Vec2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_matches_its_layout() {
        assert_eq!(triangle_layout().vertex_count(&TRIANGLE).unwrap(), 3);
    }

    #[test]
    fn cube_matches_its_layout() {
        assert_eq!(cube_layout().vertex_count(&CUBE).unwrap(), 36);
    }
}
