//! Scope handles: global containers, per-function locals and the statement
//! builder.
//!
//! Every handle borrows the shader mutably and carries its target scope
//! explicitly; there is no ambient "current function" cursor.

use super::statement::{Op, Operand, Statement, StmtId};
use super::types::{Qualifier, ValueKind};
use super::variable::{ArrayInfo, Literal, VarId, Variable};
use super::{FuncId, Shader};

/// Factory for program-scoped variables under one fixed qualifier.
///
/// Lookup is idempotent by name: the first registration wins and later
/// requests for the same name return the same variable, regardless of the
/// kind or qualifier they ask for.
pub struct GlobalScope<'a> {
    shader: &'a mut Shader,
    qualifier: Qualifier,
}

impl<'a> GlobalScope<'a> {
    pub(crate) fn new(shader: &'a mut Shader, qualifier: Qualifier) -> Self {
        GlobalScope { shader, qualifier }
    }

    pub fn int(&mut self, name: &str) -> VarId {
        self.lookup_or_create(name, ValueKind::Int)
    }

    pub fn float(&mut self, name: &str) -> VarId {
        self.lookup_or_create(name, ValueKind::Float)
    }

    pub fn vec2(&mut self, name: &str) -> VarId {
        self.lookup_or_create(name, ValueKind::Vec2)
    }

    pub fn vec3(&mut self, name: &str) -> VarId {
        self.lookup_or_create(name, ValueKind::Vec3)
    }

    pub fn vec4(&mut self, name: &str) -> VarId {
        self.lookup_or_create(name, ValueKind::Vec4)
    }

    pub fn sampler2d(&mut self, name: &str) -> VarId {
        self.lookup_or_create(name, ValueKind::Sampler2D)
    }

    /// A vec4 whose declaration carries a splat initializer, e.g.
    /// `uniform vec4 overlayColor = vec4(0.5);`. When the name is already
    /// registered the first registration wins and the initializer is
    /// ignored, like every other field.
    pub fn vec4_with_default(&mut self, name: &str, value: f64) -> VarId {
        if let Some(existing) = self.shader.find_global(name) {
            return existing;
        }
        let mut var = Variable::global(name, ValueKind::Vec4, self.qualifier);
        var.default_value = Some(Literal::Vec4Splat(value));
        self.shader.register_global(var)
    }

    pub fn float_array(&mut self, name: &str, count: usize) -> VarId {
        self.array(name, ValueKind::Float, count)
    }

    pub fn vec2_array(&mut self, name: &str, count: usize) -> VarId {
        self.array(name, ValueKind::Vec2, count)
    }

    fn array(&mut self, name: &str, kind: ValueKind, count: usize) -> VarId {
        if let Some(existing) = self.shader.find_global(name) {
            return existing;
        }
        let mut var = Variable::global(name, kind, self.qualifier);
        var.array = Some(ArrayInfo {
            count,
            elements: Vec::new(),
        });
        // Arrays cannot be declared inline at an assignment site.
        var.needs_declaration_before_assignment = true;
        self.shader.register_global(var)
    }

    fn lookup_or_create(&mut self, name: &str, kind: ValueKind) -> VarId {
        if let Some(existing) = self.shader.find_global(name) {
            return existing;
        }
        self.shader
            .register_global(Variable::global(name, kind, self.qualifier))
    }
}

/// Factory for one function's local variables, idempotent by name within
/// that function.
pub struct LocalScope<'a> {
    shader: &'a mut Shader,
    func: FuncId,
}

impl<'a> LocalScope<'a> {
    pub(crate) fn new(shader: &'a mut Shader, func: FuncId) -> Self {
        LocalScope { shader, func }
    }

    pub fn int(&mut self, name: &str) -> VarId {
        self.lookup_or_create(name, ValueKind::Int)
    }

    pub fn float(&mut self, name: &str) -> VarId {
        self.lookup_or_create(name, ValueKind::Float)
    }

    pub fn vec2(&mut self, name: &str) -> VarId {
        self.lookup_or_create(name, ValueKind::Vec2)
    }

    pub fn vec4(&mut self, name: &str) -> VarId {
        self.lookup_or_create(name, ValueKind::Vec4)
    }

    fn lookup_or_create(&mut self, name: &str, kind: ValueKind) -> VarId {
        if let Some(existing) = self.shader.find_local(self.func, name) {
            return existing;
        }
        let var = Variable::local(name, kind, self.func);
        self.shader.register_local(self.func, var)
    }
}

/// Statement builder for one function body.
///
/// Assignment kinds are appended to a body on construction; arithmetic and
/// texture nodes are pure operands that only take effect once nested inside
/// an assignment.
pub struct FunctionBody<'a> {
    shader: &'a mut Shader,
    func: FuncId,
}

impl<'a> FunctionBody<'a> {
    pub(crate) fn new(shader: &'a mut Shader, func: FuncId) -> Self {
        FunctionBody { shader, func }
    }

    pub fn locals(&mut self) -> LocalScope<'_> {
        LocalScope::new(self.shader, self.func)
    }

    /// Escape hatch to the owning shader, for literals, swizzles and array
    /// indexing while a body borrow is live.
    pub fn shader(&mut self) -> &mut Shader {
        self.shader
    }

    /// `lhs = rhs`. Appended to the body owning the target. Consumes the
    /// target's first-assignment flag: the first assignment to a local
    /// renders as `type name = rhs`, later ones as `name = rhs`.
    ///
    /// # Panics
    /// Panics when the target is not assignable (an expression node or an
    /// unnamed constant).
    pub fn assign(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> StmtId {
        let lhs = lhs.into();
        let rhs = rhs.into();
        let first = self.check_assignment_target(lhs, true);
        let id = self.shader.alloc_stmt(Statement {
            op: Op::Assign,
            lhs,
            rhs,
            lhs_first_assignment: first,
        });
        self.register(lhs, id);
        id
    }

    /// `lhs += rhs`. Appended like an assignment, but never fuses a
    /// declaration: the target must already have been assigned.
    ///
    /// # Panics
    /// Panics when the target is not assignable.
    pub fn add_assign(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> StmtId {
        let lhs = lhs.into();
        let rhs = rhs.into();
        self.check_assignment_target(lhs, false);
        let id = self.shader.alloc_stmt(Statement {
            op: Op::AddAssign,
            lhs,
            rhs,
            lhs_first_assignment: false,
        });
        self.register(lhs, id);
        id
    }

    pub fn mul(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> StmtId {
        self.pure_node(Op::Mul, lhs.into(), rhs.into())
    }

    pub fn add(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> StmtId {
        self.pure_node(Op::Add, lhs.into(), rhs.into())
    }

    pub fn sub(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> StmtId {
        self.pure_node(Op::Sub, lhs.into(), rhs.into())
    }

    pub fn div(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> StmtId {
        self.pure_node(Op::Div, lhs.into(), rhs.into())
    }

    /// `texture2D(sampler, coord)` sample expression.
    pub fn texture2d(&mut self, sampler: impl Into<Operand>, coord: impl Into<Operand>) -> StmtId {
        self.pure_node(Op::Texture2D, sampler.into(), coord.into())
    }

    pub fn lit_int(&mut self, value: i64) -> VarId {
        self.shader.lit_int(value)
    }

    pub fn lit_float(&mut self, value: f64) -> VarId {
        self.shader.lit_float(value)
    }

    pub fn lit_vec2(&mut self, x: f64, y: f64) -> VarId {
        self.shader.lit_vec2(x, y)
    }

    pub fn lit_vec4(&mut self, x: f64, y: f64, z: f64, w: f64) -> VarId {
        self.shader.lit_vec4(x, y, z, w)
    }

    pub fn lit_vec4_splat(&mut self, value: f64) -> VarId {
        self.shader.lit_vec4_splat(value)
    }

    fn pure_node(&mut self, op: Op, lhs: Operand, rhs: Operand) -> StmtId {
        debug_assert!(!op.is_effect());
        self.shader.alloc_stmt(Statement {
            op,
            lhs,
            rhs,
            lhs_first_assignment: false,
        })
    }

    /// Validate an assignment target and, when `consume` is set, take its
    /// first-assignment flag.
    fn check_assignment_target(&mut self, lhs: Operand, consume: bool) -> bool {
        let Operand::Var(id) = lhs else {
            panic!("assignment target is not assignable: expression node");
        };
        if !self.shader.is_assignable(id) {
            panic!("assignment target is not assignable: unnamed constant");
        }
        if consume && self.shader.var(id).needs_declaration_for_assignment {
            self.shader.var_mut(id).needs_declaration_for_assignment = false;
            return true;
        }
        false
    }

    /// Append an effect statement to the body of whichever function owns its
    /// target: the target's own function for locals, this body's function
    /// for globals and built-ins.
    fn register(&mut self, lhs: Operand, stmt: StmtId) {
        let Operand::Var(id) = lhs else {
            unreachable!("target validated before registration");
        };
        let owner = self.shader.owning_function(id).unwrap_or(self.func);
        self.shader.push_statement(owner, stmt);
    }
}
