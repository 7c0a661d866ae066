//! glsl-forge: build GLSL shader source by composing typed variable and
//! expression objects instead of concatenating strings.
//!
//! A host program registers named globals on a [`Shader`], builds function
//! bodies out of variables and operators, and renders the whole program to
//! source text. The emitted text is handed to a downstream
//! [`ShaderCompiler`]; this crate never re-validates it.
//!
//! ```
//! use glsl_forge::shader::Shader;
//! use glsl_forge::shader::types::TargetProfile;
//!
//! let mut sh = Shader::new(TargetProfile::Desktop);
//! let color = sh.uniforms().vec4("color");
//! let main = sh.function("main");
//! let mut body = sh.body(main);
//! let red = body.lit_vec4(1.0, 0.0, 0.0, 1.0);
//! body.assign(color, red);
//!
//! let source = sh.render();
//! assert!(source.starts_with("uniform vec4 color;\n"));
//! assert!(source.contains("\tvec4 color = vec4(1.0, 0.0, 0.0, 1.0);\n"));
//! ```

pub mod compile;
pub mod shader;

pub use compile::{CompileError, ShaderCompiler, ShaderProgram, UniformValue};
pub use shader::scope::{FunctionBody, GlobalScope, LocalScope};
pub use shader::statement::{Op, Operand, StmtId};
pub use shader::types::{Precision, Qualifier, TargetProfile, ValueKind};
pub use shader::variable::VarId;
pub use shader::{FuncId, Shader};
