//! Variable values files (TOML or JSON tables of strings)

use anyhow::{bail, Context};
use std::fs;
use std::path::Path;
use template_engine::{values_from_json, VariableValues};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuesFormat {
    Toml,
    Json,
}

impl ValuesFormat {
    /// `.json` files are JSON, everything else TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ValuesFormat::Json,
            _ => ValuesFormat::Toml,
        }
    }
}

pub fn load_values<P: AsRef<Path>>(path: P) -> anyhow::Result<VariableValues> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read values file: {}", path.display()))?;
    parse_values(&content, ValuesFormat::from_path(path))
        .with_context(|| format!("Invalid values file: {}", path.display()))
}

pub fn parse_values(content: &str, format: ValuesFormat) -> anyhow::Result<VariableValues> {
    match format {
        ValuesFormat::Json => Ok(values_from_json(content)?),
        ValuesFormat::Toml => {
            let table: toml::Table = toml::from_str(content).context("Failed to parse TOML")?;
            let mut values = VariableValues::new();
            for (name, value) in table {
                let text = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    toml::Value::Datetime(d) => d.to_string(),
                    toml::Value::Array(_) | toml::Value::Table(_) => {
                        bail!("value for '{}' must be a string", name)
                    }
                };
                values.set(name, text);
            }
            Ok(values)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn toml_integers_are_stringified(name in "[a-z]{1,8}", n in any::<i64>()) {
            let values = parse_values(&format!("{} = {}", name, n), ValuesFormat::Toml).unwrap();
            prop_assert_eq!(values.get(&name), n.to_string());
        }

        #[test]
        fn json_strings_are_taken_verbatim(name in "[a-z ]{1,8}", value in ".{0,20}") {
            let map = std::collections::BTreeMap::from([(name.clone(), value.clone())]);
            let json = serde_json::to_string(&map).unwrap();
            let values = parse_values(&json, ValuesFormat::Json).unwrap();
            prop_assert_eq!(values.get(&name), value.as_str());
        }
    }
}
