use std::path::PathBuf;
use std::process;

use cgmath::{Deg, Matrix4, Point3, Vector3};
use clap::Parser;

use cubewalk::app::{App, AppConfig};
use cubewalk::camera::Camera;
use cubewalk::image::load_texture;
use cubewalk::mesh;

use gl_kit::geometry::VertexBuffer;
use gl_kit::program::ProgramBuilder;
use gl_kit::renderer::GlRenderer;

const MOVE_SPEED: f32 = 4.0;
const JUMP_IMPULSE: f32 = 6.0;

const CUBE_POSITIONS: [[f32; 3]; 7] = [
    [0.0, 0.5, -3.0],
    [2.5, 0.5, -6.0],
    [-3.0, 0.5, -4.5],
    [-1.5, 2.0, -7.0],
    [4.0, 0.5, -2.0],
    [1.2, 1.5, -9.0],
    [-4.5, 0.5, -8.0],
];

/// Third step: first-person WASD/mouse camera, Space to jump, with a
/// naive gravity model and a frame-time report once a second.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, default_value_t = 1280)]
    width: u32,
    #[arg(long, default_value_t = 720)]
    height: u32,
    /// Mouse look sensitivity, degrees per pixel
    #[arg(long, default_value_t = 0.1)]
    sensitivity: f32,
    /// Vertical field of view, degrees
    #[arg(long, default_value_t = 45.0)]
    fov: f32,
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/scene.vert"))]
    vertex_shader: PathBuf,
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/scene.frag"))]
    fragment_shader: PathBuf,
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/textures/checker.png"))]
    base_texture: PathBuf,
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/textures/badge.png"))]
    overlay_texture: PathBuf,
}

fn main() {
    let args = Args::parse();

    println!("Starting...");

    let app = match App::new(&AppConfig {
        title: "cubewalk - walk".into(),
        width: args.width,
        height: args.height,
        capture_cursor: true,
    }) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{e}");
            process::exit(-1);
        }
    };

    let (program, cube, base, overlay) = match setup(&args) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    program.bind();
    program.set_int("tex0", 0);
    program.set_int("tex1", 1);

    let model_loc = program.uniform_location("model");
    let view_loc = program.uniform_location("view");
    let projection_loc = program.uniform_location("projection");

    let mut renderer = GlRenderer::new();
    renderer.enable_depth_test();

    let mut camera = Camera::new(Point3::new(0.0, 0.0, 3.0));
    let sensitivity = args.sensitivity;
    let fov = args.fov;

    app.run(move |frame| {
        let dt = frame.dt.as_secs_f32();

        camera.look(frame.mouse_delta.0, frame.mouse_delta.1, sensitivity);
        if frame.keys.space {
            camera.jump(JUMP_IMPULSE);
        }
        camera.walk(&frame.keys, MOVE_SPEED, dt);
        camera.fall(dt);

        renderer.clear(0.1, 0.1, 0.15);

        let aspect = frame.size.0 as f32 / frame.size.1.max(1) as f32;
        let view = camera.view_matrix();
        let projection = cgmath::perspective(Deg(fov), aspect, 0.1, 100.0);

        program.bind();
        program.update_matrix4(view_loc, &view);
        program.update_matrix4(projection_loc, &projection);

        base.bind(0);
        overlay.bind(1);

        for (i, pos) in CUBE_POSITIONS.iter().enumerate() {
            let model = Matrix4::from_translation(Vector3::new(pos[0], pos[1], pos[2]))
                * Matrix4::from_angle_y(Deg(25.0 * i as f32));

            program.bind();
            program.update_matrix4(model_loc, &model);
            renderer.draw(&cube, &program);
        }
    });
}

type SceneResources = (
    gl_kit::program::Program,
    VertexBuffer,
    gl_kit::texture::Texture2D,
    gl_kit::texture::Texture2D,
);

fn setup(args: &Args) -> Result<SceneResources, Box<dyn std::error::Error>> {
    let program =
        ProgramBuilder::from_files(&args.vertex_shader, &args.fragment_shader)?.build()?;
    let cube = VertexBuffer::with_layout(&mesh::cube_layout(), &mesh::CUBE)?;
    let base = load_texture(&args.base_texture)?;
    let overlay = load_texture(&args.overlay_texture)?;

    Ok((program, cube, base, overlay))
}
