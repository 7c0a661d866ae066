//! Boundary to the downstream shader compiler and its uniform channel.
//!
//! The builder itself never validates emitted text; correctness of the
//! generated program is a contract with whatever implements
//! [`ShaderCompiler`]. The only recoverable failure in the whole pipeline
//! lives here: compilation can fail, everything upstream of it panics on
//! builder misuse instead.

use thiserror::Error;

/// Failure at the compile/uniform boundary.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The downstream compiler rejected the emitted source. Carries the
    /// original text so the diagnostic can be read against it.
    #[error("shader compilation failed: {diagnostic}")]
    Compilation {
        source_text: String,
        diagnostic: anyhow::Error,
    },
    /// The program has no uniform under the requested name.
    #[error("no uniform named `{name}`")]
    UnknownUniform { name: String },
    /// The program rejected the value shape written to a uniform.
    #[error("uniform `{name}` rejected value: {reason}")]
    UniformMismatch { name: String, reason: String },
}

impl CompileError {
    pub fn compilation(source_text: impl Into<String>, diagnostic: anyhow::Error) -> Self {
        CompileError::Compilation {
            source_text: source_text.into(),
            diagnostic,
        }
    }

    /// The shader source that failed to compile, when available.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            CompileError::Compilation { source_text, .. } => Some(source_text),
            _ => None,
        }
    }
}

/// Value shapes writable onto a compiled program by uniform name. Matches
/// what consumers feed in: scalars, small vectors and precomputed
/// convolution weight/offset arrays.
#[derive(Clone, Debug, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    FloatArray(Vec<f32>),
    Vec2Array(Vec<[f32; 2]>),
}

/// A compiled, linked program handle exposing its uniform channel.
///
/// Every uniform-qualified global the builder declared is addressable by
/// exactly the name used in its declaration (see
/// [`Shader::uniform_names`](crate::shader::Shader::uniform_names)).
pub trait ShaderProgram {
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), CompileError>;
}

/// Compiles emitted source text into an executable program, or fails with a
/// [`CompileError::Compilation`] carrying the source and the diagnostic.
pub trait ShaderCompiler {
    type Program: ShaderProgram;

    fn compile(&mut self, source: &str) -> Result<Self::Program, CompileError>;
}
