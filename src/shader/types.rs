//! GLSL value kinds, qualifiers, precision and target-profile enums.

/// GLSL value type for shader variables and expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Sampler2D,
}

impl ValueKind {
    /// Returns the GLSL type name for this value kind.
    pub fn glsl(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Vec2 => "vec2",
            ValueKind::Vec3 => "vec3",
            ValueKind::Vec4 => "vec4",
            ValueKind::Sampler2D => "sampler2D",
        }
    }
}

/// Binding role of a global variable.
///
/// Reference: https://www.opengl.org/wiki/Type_Qualifier_(GLSL)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Qualifier {
    None,
    Uniform,
    Attribute,
    Varying,
    /// Declared by the GLSL environment itself (e.g. `gl_Position`).
    /// Participates in expressions but never emits a declaration.
    BuiltIn,
}

impl Qualifier {
    /// Whether a variable with this qualifier gets its own declaration line.
    pub fn is_declared(self) -> bool {
        !matches!(self, Qualifier::BuiltIn)
    }

    pub fn glsl(self) -> &'static str {
        match self {
            Qualifier::None => "none",
            Qualifier::Uniform => "uniform",
            Qualifier::Attribute => "attribute",
            Qualifier::Varying => "varying",
            Qualifier::BuiltIn => "builtIn",
        }
    }
}

/// Numeric precision qualifier. Only emitted for the embedded profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    Lowp,
    Mediump,
    Highp,
}

impl Precision {
    pub fn glsl(self) -> &'static str {
        match self {
            Precision::Lowp => "lowp",
            Precision::Mediump => "mediump",
            Precision::Highp => "highp",
        }
    }
}

/// Emission dialect switch. Desktop GLSL never emits precision qualifiers;
/// the embedded (ES) dialect emits them for variables that carry a precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetProfile {
    #[default]
    Desktop,
    Embedded,
}

/// Format a float as a GLSL literal.
///
/// Trims trailing zeros but always keeps a decimal point so the literal
/// parses as a float, not an int. Non-finite values render as `0.0`.
pub fn fmt_float(v: f64) -> String {
    if v.is_finite() {
        let s = format!("{v:.9}");
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s.contains('.') {
            s.to_string()
        } else {
            format!("{s}.0")
        }
    } else {
        "0.0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glsl_type_names() {
        assert_eq!(ValueKind::Float.glsl(), "float");
        assert_eq!(ValueKind::Vec4.glsl(), "vec4");
        assert_eq!(ValueKind::Sampler2D.glsl(), "sampler2D");
    }

    #[test]
    fn test_builtin_is_not_declared() {
        assert!(!Qualifier::BuiltIn.is_declared());
        assert!(Qualifier::Uniform.is_declared());
        assert!(Qualifier::Varying.is_declared());
    }

    #[test]
    fn test_fmt_float_keeps_decimal_point() {
        assert_eq!(fmt_float(1.0), "1.0");
        assert_eq!(fmt_float(0.0), "0.0");
        assert_eq!(fmt_float(0.5), "0.5");
        assert_eq!(fmt_float(-2.25), "-2.25");
    }

    #[test]
    fn test_fmt_float_trims_noise() {
        assert_eq!(fmt_float(1.5), "1.5");
        assert_eq!(fmt_float(f64::NAN), "0.0");
        assert_eq!(fmt_float(f64::INFINITY), "0.0");
    }
}
