use std::path::PathBuf;
use std::process;

use clap::Parser;

use cubewalk::app::{App, AppConfig};
use cubewalk::mesh;

use gl_kit::geometry::VertexBuffer;
use gl_kit::program::ProgramBuilder;
use gl_kit::renderer::GlRenderer;

/// First step: compile a shader pair and draw one colored triangle.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/triangle.vert"))]
    vertex_shader: PathBuf,
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/triangle.frag"))]
    fragment_shader: PathBuf,
}

fn main() {
    let args = Args::parse();

    println!("Starting...");

    let app = match App::new(&AppConfig {
        title: "cubewalk - triangle".into(),
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

    let program = match ProgramBuilder::from_files(&args.vertex_shader, &args.fragment_shader)
        .and_then(|b| b.build())
    {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let triangle = match VertexBuffer::with_layout(&mesh::triangle_layout(), &mesh::TRIANGLE) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let mut renderer = GlRenderer::new();

    app.run(move |_frame| {
        renderer.clear(0.2, 0.3, 0.3);
        renderer.draw(&triangle, &program);
    });
}
