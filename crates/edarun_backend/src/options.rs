//! Shared plumbing for typed per-backend option structs.
//!
//! Every backend declares its options as a closed struct with named,
//! documented fields and deserializes its own `[tools.<tool>]` table here.
//! Unknown keys are rejected so a typo fails loudly instead of silently
//! falling back to a default.

use edarun_edam::{BuildDescription, ConfigError};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// Whether Verilog-family files are compiled one command per file or as a
/// single batched invocation.
///
/// The two strategies are mutually exclusive per language bucket: in common
/// mode the per-file commands for that bucket are never emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilationMode {
    /// One compile command per source file, in encounter order.
    #[default]
    #[serde(alias = "sep")]
    Separate,
    /// All files of the bucket merged into one multi-file invocation.
    Common,
}

/// Deserializes the backend's option table into its typed struct.
///
/// A missing table yields the struct's defaults; a present table must
/// deserialize cleanly or the whole plan aborts with a [`ConfigError`]
/// naming the tool.
pub fn tool_options<T>(description: &BuildDescription, tool: &str) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned + Default,
{
    match description.tool_table(tool) {
        None => Ok(T::default()),
        Some(table) => table
            .clone()
            .try_into()
            .map_err(|e| ConfigError::ToolOptions {
                tool: tool.to_string(),
                reason: e.to_string(),
            }),
    }
}

/// Deserializes a field that accepts either a single string or a list of
/// strings, normalizing to a list.
///
/// Tool option lists are commonly written as `vlog_options = "-quiet"` when
/// there is only one token.
pub fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
