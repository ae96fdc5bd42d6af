pub mod app;
pub mod camera;
pub mod clock;
pub mod image;
pub mod input;
pub mod mesh;
