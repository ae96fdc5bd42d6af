use std::fmt;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};

use cgmath::Matrix4;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
    Geometry,
}

impl Stage {
    fn gl_kind(self) -> u32 {
        match self {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
            Stage::Geometry => gl::GEOMETRY_SHADER,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
            Stage::Geometry => "geometry",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("could not read shader source {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: Stage, log: String },
    #[error("failed to link shader program:\n{log}")]
    Link { log: String },
}

pub struct ProgramBuilder {
    vertex: String,
    fragment: String,
    geometry: Option<String>,
}

impl ProgramBuilder {
    pub fn new(vertex: &str, fragment: &str) -> Self {
        Self {
            vertex: vertex.to_owned(),
            fragment: fragment.to_owned(),
            geometry: None,
        }
    }

    pub fn from_files<P: AsRef<Path>>(vertex: P, fragment: P) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: read_source(vertex.as_ref())?,
            fragment: read_source(fragment.as_ref())?,
            geometry: None,
        })
    }

    pub fn with_geometry(mut self, source: &str) -> Self {
        self.geometry = Some(source.to_owned());
        self
    }

    pub fn with_geometry_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ShaderError> {
        self.geometry = Some(read_source(path.as_ref())?);
        Ok(self)
    }

    pub fn build(self) -> Result<Program, ShaderError> {
        let mut stages = Vec::with_capacity(3);

        let sources = [
            (Stage::Vertex, Some(&self.vertex)),
            (Stage::Fragment, Some(&self.fragment)),
            (Stage::Geometry, self.geometry.as_ref()),
        ];

        for (stage, source) in sources {
            let source = match source {
                Some(s) => s,
                None => continue,
            };

            match compile_stage(stage, source) {
                Ok(id) => stages.push(id),
                Err(e) => {
                    delete_stages(&stages);
                    return Err(e);
                }
            }
        }

        let id = unsafe {
            let id = gl::CreateProgram();

            for stage in &stages {
                gl::AttachShader(id, *stage);
            }

            gl::LinkProgram(id);

            id
        };

        // Linked binaries do not need the intermediate objects anymore.
        delete_stages(&stages);

        let mut linked = 0;
        unsafe {
            gl::GetProgramiv(id, gl::LINK_STATUS, (&mut linked) as *mut i32);
        }

        if linked == 0 {
            let log = program_log(id);
            unsafe {
                gl::DeleteProgram(id);
            }
            return Err(ShaderError::Link { log });
        }

        Ok(Program { id })
    }
}

pub struct Program {
    id: u32,
}

impl Program {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) }
    }

    pub fn unbind(&self) {
        unsafe { gl::UseProgram(0) }
    }

    /// Fresh driver query on every call, `-1` when the name is not an
    /// active uniform. Callers caching the result should use the
    /// `update_*` methods afterwards.
    pub fn uniform_location(&self, name: &str) -> i32 {
        let c_name = match std::ffi::CString::new(name) {
            Ok(s) => s,
            Err(_) => return -1,
        };

        unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) }
    }

    pub fn set_int(&self, name: &str, value: i32) -> i32 {
        let location = self.uniform_location(name);
        self.update_int(location, value);
        location
    }

    pub fn update_int(&self, location: i32, value: i32) {
        unsafe { gl::Uniform1i(location, value) }
    }

    pub fn set_matrix4(&self, name: &str, value: &Matrix4<f32>) -> i32 {
        let location = self.uniform_location(name);
        self.update_matrix4(location, value);
        location
    }

    pub fn update_matrix4(&self, location: i32, value: &Matrix4<f32>) {
        let cells: &[f32; 16] = value.as_ref();
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, cells.as_ptr()) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_owned(),
        source,
    })
}

fn compile_stage(stage: Stage, source: &str) -> Result<u32, ShaderError> {
    let id = unsafe {
        let id = gl::CreateShader(stage.gl_kind());

        gl::ShaderSource(
            id,
            1,
            (&(source.as_ptr() as *const c_char)) as *const *const c_char,
            (&(source.len() as i32)) as *const i32,
        );
        gl::CompileShader(id);

        id
    };

    let mut compiled = 0;
    unsafe {
        gl::GetShaderiv(id, gl::COMPILE_STATUS, (&mut compiled) as *mut i32);
    }

    if compiled == 0 {
        let log = shader_log(id);
        unsafe {
            gl::DeleteShader(id);
        }
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(id)
}

fn delete_stages(stages: &[u32]) {
    for stage in stages {
        unsafe {
            gl::DeleteShader(*stage);
        }
    }
}

fn shader_log(id: u32) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, (&mut len) as *mut i32);
    }

    let mut buf = vec![0_u8; len.max(0) as usize];
    let mut written = 0;
    unsafe {
        gl::GetShaderInfoLog(
            id,
            len,
            (&mut written) as *mut i32,
            buf.as_mut_ptr() as *mut c_char,
        );
    }

    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

fn program_log(id: u32) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, (&mut len) as *mut i32);
    }

    let mut buf = vec![0_u8; len.max(0) as usize];
    let mut written = 0;
    unsafe {
        gl::GetProgramInfoLog(
            id,
            len,
            (&mut written) as *mut i32,
            buf.as_mut_ptr() as *mut c_char,
        );
    }

    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}
