//! Variables: named bindings, unnamed literal constants and fixed-size arrays.
//!
//! Variables live in an arena owned by [`Shader`]; everything else refers to
//! them through [`VarId`] indices, so there are no back-pointers to manage.

use super::types::{Precision, Qualifier, ValueKind, TargetProfile, fmt_float};
use super::{FuncId, Shader};

/// Index of a variable in its shader's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize);

/// Where a variable is bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Program-scoped, declared outside any function body.
    Global(Qualifier),
    /// Function-scoped, declared at its first assignment inside one body.
    Local(FuncId),
    /// Unnamed inline literal. No scope, no declaration.
    Constant,
}

/// Payload of an unnamed constant, rendered inline at every reference.
#[derive(Clone, Debug)]
pub(crate) enum Literal {
    Int(i64),
    Float(f64),
    Vec2([f64; 2]),
    /// `vec2(a, b)` built from two existing scalar variables.
    Vec2Refs(VarId, VarId),
    Vec3([f64; 3]),
    Vec4([f64; 4]),
    /// `vec4(v)` splat constructor.
    Vec4Splat(f64),
}

/// Fixed-size array bookkeeping.
///
/// `count` and `elements` are intentionally decoupled: `count` is the
/// declared capacity and always wins in declaration text; `elements` is an
/// optional list of pre-built element variables.
#[derive(Clone, Debug, Default)]
pub(crate) struct ArrayInfo {
    pub(crate) count: usize,
    pub(crate) elements: Vec<VarId>,
}

#[derive(Clone, Debug)]
pub(crate) struct Variable {
    pub(crate) name: Option<String>,
    pub(crate) kind: ValueKind,
    pub(crate) scope: Scope,
    pub(crate) precision: Option<Precision>,
    pub(crate) literal: Option<Literal>,
    pub(crate) array: Option<ArrayInfo>,
    /// Initializer folded into the declaration line (e.g. `uniform vec4 x = vec4(0.5);`).
    pub(crate) default_value: Option<Literal>,
    /// True until the first assignment, which then folds the declaration
    /// into that assignment statement.
    pub(crate) needs_declaration_for_assignment: bool,
    /// True for kinds that cannot be declared inline (arrays): the variable
    /// must be declared as a separate statement before any assignment.
    pub(crate) needs_declaration_before_assignment: bool,
}

impl Variable {
    pub(crate) fn global(name: impl Into<String>, kind: ValueKind, qualifier: Qualifier) -> Self {
        if qualifier == Qualifier::None {
            panic!("global variable requires a qualifier");
        }
        Variable {
            name: Some(name.into()),
            kind,
            scope: Scope::Global(qualifier),
            precision: None,
            literal: None,
            array: None,
            default_value: None,
            // Built-ins are declared by the environment; everything else
            // still fuses a declaration into its first assignment.
            needs_declaration_for_assignment: qualifier != Qualifier::BuiltIn,
            needs_declaration_before_assignment: false,
        }
    }

    pub(crate) fn local(name: impl Into<String>, kind: ValueKind, function: FuncId) -> Self {
        Variable {
            name: Some(name.into()),
            kind,
            scope: Scope::Local(function),
            precision: None,
            literal: None,
            array: None,
            default_value: None,
            needs_declaration_for_assignment: true,
            needs_declaration_before_assignment: false,
        }
    }

    pub(crate) fn constant(kind: ValueKind, literal: Literal) -> Self {
        Variable {
            name: None,
            kind,
            scope: Scope::Constant,
            precision: None,
            literal: Some(literal),
            array: None,
            default_value: None,
            needs_declaration_for_assignment: false,
            needs_declaration_before_assignment: false,
        }
    }
}

impl Shader {
    /// Reference text: the minimal form used inside an expression.
    /// Named variables render as their name, constants as their literal.
    pub fn reference(&self, id: VarId) -> String {
        let v = self.var(id);
        if let Some(name) = &v.name {
            name.clone()
        } else {
            self.literal_text(id)
        }
    }

    fn literal_text(&self, id: VarId) -> String {
        let v = self.var(id);
        let Some(literal) = &v.literal else {
            panic!("variable has neither a name nor a literal value");
        };
        self.render_literal(literal)
    }

    pub(crate) fn render_literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) => fmt_float(*f),
            Literal::Vec2([x, y]) => format!("vec2({}, {})", fmt_float(*x), fmt_float(*y)),
            Literal::Vec2Refs(x, y) => {
                format!("vec2({}, {})", self.reference(*x), self.reference(*y))
            }
            Literal::Vec3([x, y, z]) => format!(
                "vec3({}, {}, {})",
                fmt_float(*x),
                fmt_float(*y),
                fmt_float(*z)
            ),
            Literal::Vec4([x, y, z, w]) => format!(
                "vec4({}, {}, {}, {})",
                fmt_float(*x),
                fmt_float(*y),
                fmt_float(*z),
                fmt_float(*w)
            ),
            Literal::Vec4Splat(v) => format!("vec4({})", fmt_float(*v)),
        }
    }

    /// Full declaration line for a variable, or `None` for built-ins, which
    /// the GLSL environment declares itself.
    ///
    /// # Panics
    /// Panics when the variable has no name: declaring a nameless variable
    /// is a builder contract violation.
    pub fn declaration(&self, id: VarId) -> Option<String> {
        let v = self.var(id);
        match v.scope {
            Scope::Global(qualifier) => {
                if !qualifier.is_declared() {
                    return None;
                }
                let name = v
                    .name
                    .as_deref()
                    .unwrap_or_else(|| panic!("can't declare a nameless variable"));
                let mut out = String::new();
                out.push_str(qualifier.glsl());
                out.push(' ');
                if let Some(p) = self.precision_token(id) {
                    out.push_str(p);
                    out.push(' ');
                }
                out.push_str(v.kind.glsl());
                out.push(' ');
                out.push_str(name);
                if let Some(array) = &v.array {
                    out.push_str(&format!("[{}]", array.count));
                }
                if let Some(default) = &v.default_value {
                    out.push_str(" = ");
                    out.push_str(&self.render_literal(default));
                }
                out.push(';');
                Some(out)
            }
            Scope::Local(_) => Some(format!("{};", self.declaration_reference(id))),
            Scope::Constant => panic!("can't declare a nameless variable"),
        }
    }

    /// Bare `type name` pair used to declare-and-assign in one statement.
    ///
    /// # Panics
    /// Panics when the variable has no name.
    pub fn declaration_reference(&self, id: VarId) -> String {
        let v = self.var(id);
        let name = v
            .name
            .as_deref()
            .unwrap_or_else(|| panic!("can't declare a nameless variable"));
        let mut out = String::new();
        if let Some(p) = self.precision_token(id) {
            out.push_str(p);
            out.push(' ');
        }
        out.push_str(v.kind.glsl());
        out.push(' ');
        out.push_str(name);
        if let Some(array) = &v.array {
            out.push_str(&format!("[{}]", array.count));
        }
        out
    }

    /// Precision keyword to emit, if any. Desktop never emits one; embedded
    /// emits only a precision explicitly set on the variable itself. The
    /// shader-wide default is stored configuration and never reaches the
    /// emitted text.
    fn precision_token(&self, id: VarId) -> Option<&'static str> {
        if self.profile() != TargetProfile::Embedded {
            return None;
        }
        self.var(id).precision.map(Precision::glsl)
    }

    /// Set an explicit precision on a variable.
    pub fn set_precision(&mut self, id: VarId, precision: Precision) {
        self.var_mut(id).precision = Some(precision);
    }

    pub fn kind(&self, id: VarId) -> ValueKind {
        self.var(id).kind
    }

    /// Set the declared element count of an array variable.
    ///
    /// # Panics
    /// Panics when the variable is not an array.
    pub fn set_array_count(&mut self, id: VarId, count: usize) {
        let v = self.var_mut(id);
        let Some(array) = &mut v.array else {
            panic!("variable is not an array");
        };
        array.count = count;
    }

    /// Pre-built element variables of a literal array, in order.
    pub fn array_elements(&self, id: VarId) -> &[VarId] {
        match &self.var(id).array {
            Some(array) => &array.elements,
            None => panic!("variable is not an array"),
        }
    }

    /// Synthesize the element variable `name[position]`.
    ///
    /// The element shares the array's kind and scope and is never declared on
    /// its own: the array declaration covers it.
    ///
    /// # Panics
    /// Panics when the variable is not an array, or the array has no name.
    pub fn index(&mut self, array: VarId, position: usize) -> VarId {
        let v = self.var(array);
        if v.array.is_none() {
            panic!("variable is not an array");
        }
        let Some(name) = &v.name else {
            panic!("array must have a name to be subscripted");
        };
        let element = Variable {
            name: Some(format!("{name}[{position}]")),
            kind: v.kind,
            scope: v.scope,
            precision: v.precision,
            literal: None,
            array: None,
            default_value: None,
            needs_declaration_for_assignment: false,
            needs_declaration_before_assignment: false,
        };
        self.alloc_var(element)
    }

    /// Synthesize the `.xy` component reference of a vec3/vec4 variable.
    ///
    /// # Panics
    /// Panics when the variable is not a vec3 or vec4.
    pub fn swizzle_xy(&mut self, id: VarId) -> VarId {
        let v = self.var(id);
        if !matches!(v.kind, ValueKind::Vec3 | ValueKind::Vec4) {
            panic!("only vec3/vec4 variables have an xy swizzle");
        }
        let swizzle = Variable {
            name: Some(format!("{}.xy", self.reference(id))),
            kind: ValueKind::Vec2,
            scope: v.scope,
            precision: None,
            literal: None,
            array: None,
            default_value: None,
            // A component reference is never itself declared.
            needs_declaration_for_assignment: false,
            needs_declaration_before_assignment: false,
        };
        self.alloc_var(swizzle)
    }

    /// Whether a value may appear on the left of an assignment.
    /// Only named variables qualify; constants and expression nodes do not.
    pub(crate) fn is_assignable(&self, id: VarId) -> bool {
        self.var(id).name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::Shader;

    #[test]
    fn test_global_declaration() {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let color = sh.uniforms().vec4("color");
        assert_eq!(sh.declaration(color), Some("uniform vec4 color;".into()));
        assert_eq!(sh.reference(color), "color");
    }

    #[test]
    fn test_builtin_has_no_declaration() {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let pos = sh.builtins().vec4("gl_Position");
        assert_eq!(sh.declaration(pos), None);
        assert_eq!(sh.reference(pos), "gl_Position");
    }

    #[test]
    fn test_precision_embedded_only() {
        let mut sh = Shader::new(TargetProfile::Embedded);
        let color = sh.uniforms().vec4("color");
        sh.set_precision(color, Precision::Lowp);
        assert_eq!(
            sh.declaration(color),
            Some("uniform lowp vec4 color;".into())
        );

        let mut sh = Shader::new(TargetProfile::Desktop);
        let color = sh.uniforms().vec4("color");
        sh.set_precision(color, Precision::Lowp);
        assert_eq!(sh.declaration(color), Some("uniform vec4 color;".into()));
    }

    #[test]
    fn test_default_precision_is_stored_not_emitted() {
        let mut sh = Shader::new(TargetProfile::Embedded).with_default_precision(Precision::Highp);
        let texel = sh.uniforms().float("texelWidth");
        // No per-variable precision, no precision keyword.
        assert_eq!(
            sh.declaration(texel),
            Some("uniform float texelWidth;".into())
        );
        assert_eq!(sh.default_precision(), Some(Precision::Highp));
        // Only an explicit per-variable precision is emitted.
        sh.set_precision(texel, Precision::Mediump);
        assert_eq!(
            sh.declaration(texel),
            Some("uniform mediump float texelWidth;".into())
        );
    }

    #[test]
    fn test_array_declaration_uses_declared_count() {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let coords = sh.varyings().vec2_array("blurCoordinates", 5);
        assert_eq!(
            sh.declaration(coords),
            Some("varying vec2 blurCoordinates[5];".into())
        );
        // Literal elements never influence the declared count.
        sh.set_array_count(coords, 5);
        assert_eq!(
            sh.declaration(coords),
            Some("varying vec2 blurCoordinates[5];".into())
        );
    }

    #[test]
    fn test_array_indexing() {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let coords = sh.varyings().vec2_array("blurCoordinates", 5);
        let first = sh.index(coords, 0);
        assert_eq!(sh.reference(first), "blurCoordinates[0]");
        assert_eq!(sh.kind(first), ValueKind::Vec2);
    }

    #[test]
    #[should_panic(expected = "array must have a name")]
    fn test_indexing_nameless_array_panics() {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let a = sh.lit_float(1.0);
        let arr = sh.lit_float_array(vec![a]);
        sh.index(arr, 0);
    }

    #[test]
    fn test_literal_references() {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let f = sh.lit_float(1.0);
        assert_eq!(sh.reference(f), "1.0");
        let i = sh.lit_int(3);
        assert_eq!(sh.reference(i), "3");
        let v = sh.lit_vec2(0.5, -1.0);
        assert_eq!(sh.reference(v), "vec2(0.5, -1.0)");
        let s = sh.lit_vec4_splat(0.0);
        assert_eq!(sh.reference(s), "vec4(0.0)");
    }

    #[test]
    fn test_vec2_from_references() {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let w = sh.uniforms().float("texelWidth");
        let h = sh.uniforms().float("texelHeight");
        let offset = sh.lit_vec2_refs(w, h);
        assert_eq!(sh.reference(offset), "vec2(texelWidth, texelHeight)");
    }

    #[test]
    fn test_swizzle_xy() {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let coord = sh.attributes().vec4("inputTextureCoordinate");
        let xy = sh.swizzle_xy(coord);
        assert_eq!(sh.reference(xy), "inputTextureCoordinate.xy");
        assert_eq!(sh.kind(xy), ValueKind::Vec2);
    }

    #[test]
    fn test_uniform_with_default_value() {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let overlay = sh.uniforms().vec4_with_default("overlayColor", 0.5);
        assert_eq!(
            sh.declaration(overlay),
            Some("uniform vec4 overlayColor = vec4(0.5);".into())
        );
    }

    #[test]
    fn test_default_value_does_not_overwrite_first_registration() {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let plain = sh.uniforms().vec4("overlayColor");
        let again = sh.uniforms().vec4_with_default("overlayColor", 0.5);
        assert_eq!(plain, again);
        assert_eq!(
            sh.declaration(plain),
            Some("uniform vec4 overlayColor;".into())
        );

        // The other direction keeps the initializer of the first registration.
        let mut sh = Shader::new(TargetProfile::Desktop);
        let with_default = sh.uniforms().vec4_with_default("overlayColor", 0.5);
        sh.uniforms().vec4_with_default("overlayColor", 0.9);
        assert_eq!(
            sh.declaration(with_default),
            Some("uniform vec4 overlayColor = vec4(0.5);".into())
        );
    }
}
