//! Expression/statement nodes and their recursive text emission.
//!
//! A statement is either a complete effect (assignment, compound assignment)
//! or a composable sub-expression (arithmetic, texture sampling). Operands
//! are a tagged union of variables and previously built statements, which is
//! what makes arbitrary expression nesting possible.

use super::variable::VarId;
use super::Shader;

/// Index of a statement in its shader's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StmtId(pub(crate) usize);

/// Either a leaf variable or a nested expression node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Var(VarId),
    Stmt(StmtId),
}

impl From<VarId> for Operand {
    fn from(id: VarId) -> Self {
        Operand::Var(id)
    }
}

impl From<StmtId> for Operand {
    fn from(id: StmtId) -> Self {
        Operand::Stmt(id)
    }
}

/// Operator kind. The kind-to-text mapping in [`Shader::statement_text`] is a
/// fixed table; new operators are new table entries, not new node types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Assign,
    AddAssign,
    Mul,
    Add,
    Sub,
    Div,
    /// Function-call form: `texture2D(sampler, coord)`.
    Texture2D,
}

impl Op {
    /// Whether nodes of this kind represent a complete effect and get
    /// appended to a function body on construction.
    pub(crate) fn is_effect(self) -> bool {
        matches!(self, Op::Assign | Op::AddAssign)
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Statement {
    pub(crate) op: Op,
    pub(crate) lhs: Operand,
    pub(crate) rhs: Operand,
    /// Set when constructing an assignment consumed the target's
    /// first-assignment flag; emission then fuses declaration and
    /// initialization into this one statement.
    pub(crate) lhs_first_assignment: bool,
}

impl Shader {
    /// Render an operand's reference text (recursing through nested nodes).
    pub(crate) fn operand_text(&self, operand: Operand) -> String {
        match operand {
            Operand::Var(id) => self.reference(id),
            Operand::Stmt(id) => self.statement_text(id),
        }
    }

    /// Render one statement node to text (without the trailing `;`).
    pub fn statement_text(&self, id: StmtId) -> String {
        let st = self.stmt(id);
        match st.op {
            Op::Assign => self.assignment_text(st, "="),
            Op::AddAssign => self.assignment_text(st, "+="),
            Op::Mul => self.operation_text(st, "*"),
            Op::Add => self.operation_text(st, "+"),
            Op::Sub => self.operation_text(st, "-"),
            Op::Div => self.operation_text(st, "/"),
            Op::Texture2D => self.wrapper_text(st, "texture2D"),
        }
    }

    fn operation_text(&self, st: &Statement, op: &str) -> String {
        format!(
            "{} {} {}",
            self.operand_text(st.lhs),
            op,
            self.operand_text(st.rhs)
        )
    }

    fn wrapper_text(&self, st: &Statement, wrapper: &str) -> String {
        format!(
            "{}({}, {})",
            wrapper,
            self.operand_text(st.lhs),
            self.operand_text(st.rhs)
        )
    }

    fn assignment_text(&self, st: &Statement, op: &str) -> String {
        let lhs = match st.lhs {
            // First assignment to a variable that can be declared inline
            // renders `type name` instead of the plain reference.
            Operand::Var(id)
                if st.lhs_first_assignment
                    && !self.var(id).needs_declaration_before_assignment =>
            {
                self.declaration_reference(id)
            }
            other => self.operand_text(other),
        };
        format!("{} {} {}", lhs, op, self.operand_text(st.rhs))
    }
}
