//! Shader program builder: composes typed variables and expression nodes
//! into GLSL source text.
//!
//! A [`Shader`] owns arenas of variables and statements, an ordered list of
//! globals (deduplicated by name) and an ordered list of functions. A caller
//! registers globals through the qualifier containers
//! ([`Shader::uniforms`] and friends), builds function bodies through
//! [`Shader::body`], and finally asks [`Shader::render`] for the source
//! text. Rendering is a pure read: calling it twice without intervening
//! mutation yields byte-identical text.
//!
//! Builder misuse (declaring a nameless variable, assigning into an
//! expression, indexing a nameless array, a global with no qualifier) is a
//! contract violation and panics; none of these are recoverable conditions.

pub mod scope;
pub mod statement;
pub mod types;
pub mod variable;

use scope::{FunctionBody, GlobalScope, LocalScope};
use statement::{Statement, StmtId};
use types::{Precision, Qualifier, TargetProfile, ValueKind};
use variable::{ArrayInfo, Literal, Scope, VarId, Variable};

/// Index of a function in its shader's function list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FuncId(pub(crate) usize);

/// One `void name() { ... }` function: an ordered statement list plus the
/// container of its local variables.
#[derive(Debug)]
pub(crate) struct Function {
    name: String,
    body: Vec<StmtId>,
    locals: Vec<VarId>,
}

/// A shader program under construction.
#[derive(Debug, Default)]
pub struct Shader {
    profile: TargetProfile,
    default_precision: Option<Precision>,
    vars: Vec<Variable>,
    stmts: Vec<Statement>,
    globals: Vec<VarId>,
    functions: Vec<Function>,
}

impl Shader {
    pub fn new(profile: TargetProfile) -> Self {
        Shader {
            profile,
            ..Shader::default()
        }
    }

    /// Record a shader-wide default precision. This is stored configuration
    /// for downstream consumers; declarations only ever emit a precision set
    /// on the variable itself via [`Shader::set_precision`].
    pub fn with_default_precision(mut self, precision: Precision) -> Self {
        self.default_precision = Some(precision);
        self
    }

    pub fn profile(&self) -> TargetProfile {
        self.profile
    }

    pub fn default_precision(&self) -> Option<Precision> {
        self.default_precision
    }

    // Qualifier containers.

    pub fn uniforms(&mut self) -> GlobalScope<'_> {
        GlobalScope::new(self, Qualifier::Uniform)
    }

    pub fn attributes(&mut self) -> GlobalScope<'_> {
        GlobalScope::new(self, Qualifier::Attribute)
    }

    pub fn varyings(&mut self) -> GlobalScope<'_> {
        GlobalScope::new(self, Qualifier::Varying)
    }

    pub fn builtins(&mut self) -> GlobalScope<'_> {
        GlobalScope::new(self, Qualifier::BuiltIn)
    }

    /// Container for an arbitrary qualifier.
    ///
    /// # Panics
    /// Creating a variable through a [`Qualifier::None`] container panics:
    /// a global requires a real qualifier.
    pub fn global_scope(&mut self, qualifier: Qualifier) -> GlobalScope<'_> {
        GlobalScope::new(self, qualifier)
    }

    // Functions.

    /// Append a new function. Names are not deduplicated; requesting the
    /// same name twice is caller error and produces two functions.
    pub fn function(&mut self, name: impl Into<String>) -> FuncId {
        let id = FuncId(self.functions.len());
        self.functions.push(Function {
            name: name.into(),
            body: Vec::new(),
            locals: Vec::new(),
        });
        id
    }

    /// Statement builder targeting one function's body.
    pub fn body(&mut self, func: FuncId) -> FunctionBody<'_> {
        FunctionBody::new(self, func)
    }

    /// Local-variable container of one function.
    pub fn locals(&mut self, func: FuncId) -> LocalScope<'_> {
        LocalScope::new(self, func)
    }

    pub fn statement_count(&self, func: FuncId) -> usize {
        self.functions[func.0].body.len()
    }

    // Literal constants.

    pub fn lit_int(&mut self, value: i64) -> VarId {
        self.alloc_var(Variable::constant(ValueKind::Int, Literal::Int(value)))
    }

    pub fn lit_float(&mut self, value: f64) -> VarId {
        self.alloc_var(Variable::constant(ValueKind::Float, Literal::Float(value)))
    }

    pub fn lit_vec2(&mut self, x: f64, y: f64) -> VarId {
        self.alloc_var(Variable::constant(ValueKind::Vec2, Literal::Vec2([x, y])))
    }

    /// `vec2(a, b)` built from two existing variables rather than numbers.
    pub fn lit_vec2_refs(&mut self, x: VarId, y: VarId) -> VarId {
        self.alloc_var(Variable::constant(ValueKind::Vec2, Literal::Vec2Refs(x, y)))
    }

    pub fn lit_vec3(&mut self, x: f64, y: f64, z: f64) -> VarId {
        self.alloc_var(Variable::constant(ValueKind::Vec3, Literal::Vec3([x, y, z])))
    }

    pub fn lit_vec4(&mut self, x: f64, y: f64, z: f64, w: f64) -> VarId {
        self.alloc_var(Variable::constant(
            ValueKind::Vec4,
            Literal::Vec4([x, y, z, w]),
        ))
    }

    pub fn lit_vec4_splat(&mut self, value: f64) -> VarId {
        self.alloc_var(Variable::constant(
            ValueKind::Vec4,
            Literal::Vec4Splat(value),
        ))
    }

    /// An unnamed array built directly from pre-built element variables.
    /// The declared count starts at zero and is set independently through
    /// [`Shader::set_array_count`]; the two are deliberately decoupled.
    pub fn lit_float_array(&mut self, elements: Vec<VarId>) -> VarId {
        self.lit_array(ValueKind::Float, elements)
    }

    pub fn lit_vec2_array(&mut self, elements: Vec<VarId>) -> VarId {
        self.lit_array(ValueKind::Vec2, elements)
    }

    fn lit_array(&mut self, kind: ValueKind, elements: Vec<VarId>) -> VarId {
        let var = Variable {
            name: None,
            kind,
            scope: Scope::Constant,
            precision: None,
            literal: None,
            array: Some(ArrayInfo { count: 0, elements }),
            default_value: None,
            needs_declaration_for_assignment: false,
            needs_declaration_before_assignment: true,
        };
        self.alloc_var(var)
    }

    // Emission.

    /// Render the whole program: global declarations in registration order,
    /// a blank separator line, then each function in registration order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for &global in &self.globals {
            if let Some(declaration) = self.declaration(global) {
                out.push_str(&declaration);
                out.push('\n');
            }
        }
        out.push('\n');
        for func in 0..self.functions.len() {
            out.push_str(&self.render_function(FuncId(func)));
            out.push('\n');
        }
        out
    }

    fn render_function(&self, func: FuncId) -> String {
        let function = &self.functions[func.0];
        let mut out = format!("void {}() {{ \n", function.name);
        for &stmt in &function.body {
            out.push('\t');
            out.push_str(&self.statement_text(stmt));
            out.push_str(";\n");
        }
        out.push_str("}\n");
        out
    }

    /// Names of all uniform-qualified globals in declaration order: the
    /// exact names a compiled program's uniform channel must resolve.
    pub fn uniform_names(&self) -> Vec<&str> {
        self.globals
            .iter()
            .filter_map(|&g| {
                let v = self.var(g);
                match (v.scope, &v.name) {
                    (Scope::Global(Qualifier::Uniform), Some(name)) => Some(name.as_str()),
                    _ => None,
                }
            })
            .collect()
    }

    // Arena plumbing.

    pub(crate) fn var(&self, id: VarId) -> &Variable {
        &self.vars[id.0]
    }

    pub(crate) fn var_mut(&mut self, id: VarId) -> &mut Variable {
        &mut self.vars[id.0]
    }

    pub(crate) fn stmt(&self, id: StmtId) -> &Statement {
        &self.stmts[id.0]
    }

    pub(crate) fn alloc_var(&mut self, var: Variable) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(var);
        id
    }

    pub(crate) fn alloc_stmt(&mut self, stmt: Statement) -> StmtId {
        let id = StmtId(self.stmts.len());
        self.stmts.push(stmt);
        id
    }

    pub(crate) fn find_global(&self, name: &str) -> Option<VarId> {
        self.globals
            .iter()
            .copied()
            .find(|&g| self.var(g).name.as_deref() == Some(name))
    }

    pub(crate) fn register_global(&mut self, var: Variable) -> VarId {
        let id = self.alloc_var(var);
        self.globals.push(id);
        id
    }

    pub(crate) fn find_local(&self, func: FuncId, name: &str) -> Option<VarId> {
        self.functions[func.0]
            .locals
            .iter()
            .copied()
            .find(|&l| self.var(l).name.as_deref() == Some(name))
    }

    pub(crate) fn register_local(&mut self, func: FuncId, var: Variable) -> VarId {
        let id = self.alloc_var(var);
        self.functions[func.0].locals.push(id);
        id
    }

    pub(crate) fn owning_function(&self, id: VarId) -> Option<FuncId> {
        match self.var(id).scope {
            Scope::Local(func) => Some(func),
            Scope::Global(_) | Scope::Constant => None,
        }
    }

    pub(crate) fn push_statement(&mut self, func: FuncId, stmt: StmtId) {
        self.functions[func.0].body.push(stmt);
    }
}
