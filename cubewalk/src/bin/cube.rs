use std::path::PathBuf;
use std::process;

use cgmath::{Deg, InnerSpace, Matrix4, Vector3};
use clap::Parser;

use cubewalk::app::{App, AppConfig};
use cubewalk::image::load_texture;
use cubewalk::mesh;

use gl_kit::geometry::VertexBuffer;
use gl_kit::program::ProgramBuilder;
use gl_kit::renderer::GlRenderer;

/// Second step: textures and model/view/projection matrices on a
/// spinning cube.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
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
        title: "cubewalk - cube".into(),
        width: args.width,
        height: args.height,
        capture_cursor: false,
    }) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{e}");
            process::exit(-1);
        }
    };

    let scene = match setup(&args) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let Scene {
        program,
        cube,
        base,
        overlay,
    } = scene;

    program.bind();
    program.set_int("tex0", 0);
    program.set_int("tex1", 1);

    let model_loc = program.uniform_location("model");
    let view_loc = program.uniform_location("view");
    let projection_loc = program.uniform_location("projection");

    let mut renderer = GlRenderer::new();
    renderer.enable_depth_test();

    let fov = args.fov;
    let mut angle = 0.0_f32;

    app.run(move |frame| {
        angle += 50.0 * frame.dt.as_secs_f32();

        renderer.clear(0.2, 0.3, 0.3);

        let aspect = frame.size.0 as f32 / frame.size.1.max(1) as f32;
        let model =
            Matrix4::from_axis_angle(Vector3::new(0.5, 1.0, 0.0).normalize(), Deg(angle));
        let view = Matrix4::from_translation(Vector3::new(0.0, 0.0, -3.0));
        let projection = cgmath::perspective(Deg(fov), aspect, 0.1, 100.0);

        program.bind();
        program.update_matrix4(model_loc, &model);
        program.update_matrix4(view_loc, &view);
        program.update_matrix4(projection_loc, &projection);

        base.bind(0);
        overlay.bind(1);

        renderer.draw(&cube, &program);
    });
}

struct Scene {
    program: gl_kit::program::Program,
    cube: VertexBuffer,
    base: gl_kit::texture::Texture2D,
    overlay: gl_kit::texture::Texture2D,
}

fn setup(args: &Args) -> Result<Scene, Box<dyn std::error::Error>> {
    let program =
        ProgramBuilder::from_files(&args.vertex_shader, &args.fragment_shader)?.build()?;
    let cube = VertexBuffer::with_layout(&mesh::cube_layout(), &mesh::CUBE)?;
    let base = load_texture(&args.base_texture)?;
    let overlay = load_texture(&args.overlay_texture)?;

    Ok(Scene {
        program,
        cube,
        base,
        overlay,
    })
}
