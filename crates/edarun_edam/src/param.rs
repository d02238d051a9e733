//! Typed parameter values and their per-destination rendering.
//!
//! Simulators consume the same logical value through several syntaxes: a
//! Verilog parameter override, a VHDL generic, a runtime plusarg, or a
//! preprocessor define. The value itself is tool-agnostic; only the rendering
//! differs, and only for booleans. [`ParamValue::render`] encodes that
//! distinction once so no backend re-implements it.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// The destination a parameter value is rendered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// A Verilog parameter override (e.g. `-gWIDTH=8`).
    VlogParam,
    /// A VHDL generic. Booleans must render as quoted string literals
    /// because VHDL's type system has no bare truthy token.
    Generic,
    /// A runtime plusarg (e.g. `+trace=true`).
    PlusArg,
    /// A preprocessor define (e.g. `+define+DEPTH=4`).
    Define,
}

/// A typed parameter value: boolean, integer, or string.
///
/// The set is closed. TOML floats, arrays, and tables are rejected at
/// deserialization time with an error naming the offending key, so a value
/// that reaches rendering is always representable.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// A boolean value. Rendering depends on the destination.
    Bool(bool),
    /// An integer value, rendered as its decimal literal everywhere.
    Int(i64),
    /// A string value, rendered literally (optionally quoted).
    Str(String),
}

impl ParamValue {
    /// Renders this value in the syntax the destination expects.
    ///
    /// Booleans render as the bare tokens `true`/`false` for parameters,
    /// plusargs, and defines, but as the quoted literals `"true"`/`"false"`
    /// for generics. Using the wrong form for a destination is a correctness
    /// bug, not a style choice.
    pub fn render(&self, kind: ParamKind) -> String {
        self.render_quoted(kind, "")
    }

    /// Renders this value with string values wrapped in `quote` on both
    /// sides.
    ///
    /// VCS-style control files need their own quoting conventions (`"` in
    /// `parameters.txt`, `""` in define flags so the shell keeps one level).
    /// The quote applies to string values only; booleans and integers are
    /// unaffected, and quoted boolean generics keep their fixed `"true"`
    /// form.
    pub fn render_quoted(&self, kind: ParamKind, quote: &str) -> String {
        match self {
            ParamValue::Bool(b) => {
                let token = if *b { "true" } else { "false" };
                match kind {
                    ParamKind::Generic => format!("\"{token}\""),
                    _ => token.to_string(),
                }
            }
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Str(s) => format!("{quote}{s}{quote}"),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Str(s) => write!(f, "{s}"),
        }
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ParamValueVisitor;

        impl<'de> Visitor<'de> for ParamValueVisitor {
            type Value = ParamValue;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a boolean, integer, or string parameter value")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(ParamValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ParamValue::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(ParamValue::Int)
                    .map_err(|_| E::custom(format!("integer parameter value {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ParamValue::Str(v.to_string()))
            }
        }

        deserializer.deserialize_any(ParamValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_renders_everywhere_as_decimal() {
        let v = ParamValue::Int(42);
        for kind in [
            ParamKind::VlogParam,
            ParamKind::Generic,
            ParamKind::PlusArg,
            ParamKind::Define,
        ] {
            assert_eq!(v.render(kind), "42");
        }
    }

    #[test]
    fn bool_bare_for_params_and_plusargs() {
        let v = ParamValue::Bool(true);
        assert_eq!(v.render(ParamKind::VlogParam), "true");
        assert_eq!(v.render(ParamKind::PlusArg), "true");
        assert_eq!(v.render(ParamKind::Define), "true");
        assert_eq!(ParamValue::Bool(false).render(ParamKind::PlusArg), "false");
    }

    #[test]
    fn bool_quoted_for_generics() {
        assert_eq!(ParamValue::Bool(true).render(ParamKind::Generic), "\"true\"");
        assert_eq!(
            ParamValue::Bool(false).render(ParamKind::Generic),
            "\"false\""
        );
    }

    #[test]
    fn same_bool_differs_by_destination() {
        // The quoting distinction between generics and plusargs is the
        // invariant under test, not the exact flag syntax.
        let v = ParamValue::Bool(true);
        assert_ne!(v.render(ParamKind::Generic), v.render(ParamKind::PlusArg));
    }

    #[test]
    fn string_renders_literally() {
        let v = ParamValue::Str("fast".to_string());
        assert_eq!(v.render(ParamKind::VlogParam), "fast");
        assert_eq!(v.render(ParamKind::Generic), "fast");
    }

    #[test]
    fn string_quoting_styles() {
        let v = ParamValue::Str("hello".to_string());
        assert_eq!(v.render_quoted(ParamKind::VlogParam, "\""), "\"hello\"");
        assert_eq!(v.render_quoted(ParamKind::Define, "\"\""), "\"\"hello\"\"");
    }

    #[test]
    fn quoting_does_not_touch_ints_or_bools() {
        assert_eq!(
            ParamValue::Int(7).render_quoted(ParamKind::VlogParam, "\""),
            "7"
        );
        assert_eq!(
            ParamValue::Bool(true).render_quoted(ParamKind::VlogParam, "\""),
            "true"
        );
        assert_eq!(
            ParamValue::Bool(true).render_quoted(ParamKind::Generic, "\""),
            "\"true\""
        );
    }

    #[test]
    fn deserialize_supported_types() {
        #[derive(Deserialize)]
        struct Doc {
            a: ParamValue,
            b: ParamValue,
            c: ParamValue,
        }
        let doc: Doc = toml::from_str("a = true\nb = -3\nc = \"x\"").unwrap();
        assert_eq!(doc.a, ParamValue::Bool(true));
        assert_eq!(doc.b, ParamValue::Int(-3));
        assert_eq!(doc.c, ParamValue::Str("x".to_string()));
    }

    #[test]
    fn deserialize_rejects_float() {
        #[derive(Deserialize, Debug)]
        struct Doc {
            #[allow(dead_code)]
            bad: ParamValue,
        }
        let err = toml::from_str::<Doc>("bad = 1.5").unwrap_err();
        let msg = err.to_string();
        // The TOML error names the offending key.
        assert!(msg.contains("bad"), "error should name the key: {msg}");
    }

    #[test]
    fn deserialize_rejects_array() {
        #[derive(Deserialize)]
        struct Doc {
            #[allow(dead_code)]
            bad: ParamValue,
        }
        assert!(toml::from_str::<Doc>("bad = [1, 2]").is_err());
    }

    #[test]
    fn display_matches_bare_rendering() {
        assert_eq!(format!("{}", ParamValue::Bool(true)), "true");
        assert_eq!(format!("{}", ParamValue::Int(8)), "8");
        assert_eq!(format!("{}", ParamValue::Str("s".to_string())), "s");
    }
}
