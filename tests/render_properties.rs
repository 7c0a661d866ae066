//! Property tests over the emission rules: registration order, dedup,
//! declaration fusion and render idempotence.

use glsl_forge::shader::Shader;
use glsl_forge::shader::types::{TargetProfile, fmt_float};
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

proptest! {
    /// One declaration line per distinct name, in first-registration order;
    /// re-requesting an existing name never adds a second declaration.
    #[test]
    fn distinct_globals_declare_once_in_order(
        names in proptest::collection::hash_set(ident(), 1..8)
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut sh = Shader::new(TargetProfile::Desktop);
        for name in &names {
            sh.uniforms().float(name);
        }
        for name in &names {
            sh.uniforms().float(name);
        }
        let rendered = sh.render();
        let decls: Vec<&str> = rendered.lines().take_while(|l| !l.is_empty()).collect();
        prop_assert_eq!(decls.len(), names.len());
        for (decl, name) in decls.iter().zip(&names) {
            prop_assert_eq!(decl.to_string(), format!("uniform float {name};"));
        }
    }

    /// Reference text is assignment-invariant.
    #[test]
    fn reference_text_survives_assignment(name in ident(), value in -100.0f64..100.0) {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let main = sh.function("main");
        let var = sh.locals(main).float(&name);
        let before = sh.reference(var);
        let mut body = sh.body(main);
        let rhs = body.lit_float(value);
        body.assign(var, rhs);
        prop_assert_eq!(sh.reference(var), before);
    }

    /// First assignment fuses the declaration; the second does not.
    #[test]
    fn declaration_fuses_only_into_first_assignment(
        name in ident(),
        a in -100.0f64..100.0,
        b in -100.0f64..100.0,
    ) {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let main = sh.function("main");
        let mut body = sh.body(main);
        let var = body.locals().float(&name);
        let lit_a = body.lit_float(a);
        let lit_b = body.lit_float(b);
        let first = body.assign(var, lit_a);
        let second = body.assign(var, lit_b);
        prop_assert_eq!(
            sh.statement_text(first),
            format!("float {name} = {}", fmt_float(a))
        );
        prop_assert_eq!(
            sh.statement_text(second),
            format!("{name} = {}", fmt_float(b))
        );
    }

    /// The declared count always wins over however many literal elements
    /// were separately supplied.
    #[test]
    fn array_declaration_uses_declared_count(
        count in 0usize..32,
        supplied in 0usize..10,
    ) {
        let mut sh = Shader::new(TargetProfile::Desktop);
        let arr = sh.uniforms().float_array("weights", count);
        let elements: Vec<_> = (0..supplied).map(|i| sh.lit_float(i as f64)).collect();
        let lit = sh.lit_float_array(elements);
        prop_assert_eq!(sh.array_elements(lit).len(), supplied);
        prop_assert_eq!(
            sh.declaration(arr),
            Some(format!("uniform float weights[{count}];"))
        );
    }

    /// Rendering is an idempotent read.
    #[test]
    fn render_is_idempotent(
        names in proptest::collection::hash_set(ident(), 1..6),
        values in proptest::collection::vec(-100.0f64..100.0, 6),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut sh = Shader::new(TargetProfile::Desktop);
        let main = sh.function("main");
        for (name, value) in names.iter().zip(&values) {
            let mut body = sh.body(main);
            let var = body.locals().float(name);
            let rhs = body.lit_float(*value);
            body.assign(var, rhs);
        }
        let first = sh.render();
        prop_assert_eq!(sh.render(), first);
    }
}
