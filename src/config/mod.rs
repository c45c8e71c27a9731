use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::NamingError;
use crate::naming::transform::NAMESPACE_PATH_SEPARATOR;

/// What to do with a class name that matches none of the entity namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "OptionCode")]
pub enum TrimFallback {
    /// Keep the whole namespaced class name
    UseFull,
    /// Keep only the final path segment
    #[default]
    UseClass,
}

/// Case transform applied to every generated name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "OptionCode")]
pub enum CaseMode {
    #[default]
    Mixed,
    Lower,
    Upper,
}

/// Which operand comes first when two names are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "OptionCode")]
pub enum JoinOrder {
    /// The added name goes in front of the root name
    Prepend,
    /// The added name goes after the root name
    Append,
}

/// Enum options arrive either as the host's integer constants or by name.
#[derive(Deserialize)]
#[serde(untagged)]
enum OptionCode {
    Code(i64),
    Name(String),
}

impl TryFrom<OptionCode> for TrimFallback {
    type Error = String;

    fn try_from(code: OptionCode) -> Result<Self, Self::Error> {
        match code {
            OptionCode::Code(1) => Ok(TrimFallback::UseFull),
            OptionCode::Code(2) => Ok(TrimFallback::UseClass),
            OptionCode::Name(name) => match name.to_ascii_lowercase().as_str() {
                "full" | "use_full" => Ok(TrimFallback::UseFull),
                "class" | "use_class" => Ok(TrimFallback::UseClass),
                _ => Err(format!("unknown trim fallback '{}'", name)),
            },
            OptionCode::Code(other) => Err(format!("unknown trim fallback {}", other)),
        }
    }
}

impl TryFrom<OptionCode> for CaseMode {
    type Error = String;

    fn try_from(code: OptionCode) -> Result<Self, Self::Error> {
        match code {
            OptionCode::Code(0) => Ok(CaseMode::Mixed),
            OptionCode::Code(1) => Ok(CaseMode::Lower),
            OptionCode::Code(2) => Ok(CaseMode::Upper),
            OptionCode::Name(name) => match name.to_ascii_lowercase().as_str() {
                "mixed" => Ok(CaseMode::Mixed),
                "lower" => Ok(CaseMode::Lower),
                "upper" => Ok(CaseMode::Upper),
                _ => Err(format!("unknown case '{}'", name)),
            },
            OptionCode::Code(other) => Err(format!("unknown case {}", other)),
        }
    }
}

impl TryFrom<OptionCode> for JoinOrder {
    type Error = String;

    fn try_from(code: OptionCode) -> Result<Self, Self::Error> {
        match code {
            OptionCode::Code(0) => Ok(JoinOrder::Prepend),
            OptionCode::Code(1) => Ok(JoinOrder::Append),
            OptionCode::Name(name) => match name.to_ascii_lowercase().as_str() {
                "prepend" => Ok(JoinOrder::Prepend),
                "append" => Ok(JoinOrder::Append),
                _ => Err(format!("unknown join order '{}'", name)),
            },
            OptionCode::Code(other) => Err(format!("unknown join order {}", other)),
        }
    }
}

/// Naming strategy configuration
///
/// Built once, through [`NamingConfigBuilder`] or from a flat key-value
/// document, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct NamingConfig {
    #[serde(deserialize_with = "namespace_list")]
    entity_namespaces: Vec<String>,
    namespace_separator: String,
    join_column_separator: String,
    join_table_separator: String,
    trim_fallback: TrimFallback,
    #[serde(rename = "case", alias = "caseMode")]
    case_mode: CaseMode,
    reference_column_name: String,
    join_column_order: JoinOrder,
    join_table_order: JoinOrder,
    #[serde(alias = "trimAbstractPrefix", deserialize_with = "loose_bool")]
    trim_abstract: bool,
    #[serde(deserialize_with = "loose_bool")]
    split_camel_case: bool,
    camel_case_separator: String,
}

/// Option names accepted in a configuration document
pub const OPTION_KEYS: &[&str] = &[
    "entityNamespaces",
    "namespaceSeparator",
    "joinColumnSeparator",
    "joinTableSeparator",
    "trimFallback",
    "case",
    "caseMode",
    "referenceColumnName",
    "joinColumnOrder",
    "joinTableOrder",
    "trimAbstract",
    "trimAbstractPrefix",
    "splitCamelCase",
    "camelCaseSeparator",
];

impl Default for NamingConfig {
    fn default() -> Self {
        NamingConfig {
            entity_namespaces: Vec::new(),
            namespace_separator: "_".to_string(),
            join_column_separator: String::new(),
            join_table_separator: "_".to_string(),
            trim_fallback: TrimFallback::UseClass,
            case_mode: CaseMode::Mixed,
            reference_column_name: "id".to_string(),
            join_column_order: JoinOrder::Prepend,
            join_table_order: JoinOrder::Append,
            trim_abstract: false,
            split_camel_case: false,
            camel_case_separator: String::new(),
        }
    }
}

impl NamingConfig {
    pub fn builder() -> NamingConfigBuilder {
        NamingConfigBuilder::default()
    }

    /// Load from a JSON object of option name → value.
    ///
    /// Missing options keep their defaults. Unknown options and unknown
    /// enum codes are rejected.
    pub fn from_value(value: Value) -> Result<Self, NamingError> {
        let options = match value.as_object() {
            Some(options) => options,
            None => {
                return Err(NamingError::Config(format!(
                    "expected an object of options, got {}",
                    value
                )))
            }
        };

        if let Some(unknown) = options.keys().find(|key| !OPTION_KEYS.contains(&key.as_str())) {
            return Err(NamingError::UnknownOption(unknown.clone()));
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json(input: &str) -> Result<Self, NamingError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    pub fn entity_namespaces(&self) -> &[String] {
        &self.entity_namespaces
    }

    pub fn namespace_separator(&self) -> &str {
        &self.namespace_separator
    }

    pub fn join_column_separator(&self) -> &str {
        &self.join_column_separator
    }

    pub fn join_table_separator(&self) -> &str {
        &self.join_table_separator
    }

    pub fn trim_fallback(&self) -> TrimFallback {
        self.trim_fallback
    }

    pub fn case_mode(&self) -> CaseMode {
        self.case_mode
    }

    pub fn reference_column_name(&self) -> &str {
        &self.reference_column_name
    }

    pub fn join_column_order(&self) -> JoinOrder {
        self.join_column_order
    }

    pub fn join_table_order(&self) -> JoinOrder {
        self.join_table_order
    }

    pub fn trim_abstract(&self) -> bool {
        self.trim_abstract
    }

    pub fn split_camel_case(&self) -> bool {
        self.split_camel_case
    }

    pub fn camel_case_separator(&self) -> &str {
        &self.camel_case_separator
    }
}

/// Builder for [`NamingConfig`]; starts from the defaults.
#[derive(Debug, Clone, Default)]
pub struct NamingConfigBuilder {
    config: NamingConfig,
}

impl NamingConfigBuilder {
    /// Add one entity namespace. Trailing path separators are dropped.
    pub fn entity_namespace(mut self, namespace: impl AsRef<str>) -> Self {
        self.config
            .entity_namespaces
            .push(trim_namespace_entry(namespace.as_ref()));
        self
    }

    pub fn entity_namespaces<I, S>(self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        namespaces
            .into_iter()
            .fold(self, |builder, ns| builder.entity_namespace(ns))
    }

    pub fn namespace_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.namespace_separator = separator.into();
        self
    }

    pub fn join_column_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.join_column_separator = separator.into();
        self
    }

    pub fn join_table_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.join_table_separator = separator.into();
        self
    }

    pub fn trim_fallback(mut self, fallback: TrimFallback) -> Self {
        self.config.trim_fallback = fallback;
        self
    }

    pub fn case_mode(mut self, case: CaseMode) -> Self {
        self.config.case_mode = case;
        self
    }

    pub fn reference_column_name(mut self, name: impl Into<String>) -> Self {
        self.config.reference_column_name = name.into();
        self
    }

    pub fn join_column_order(mut self, order: JoinOrder) -> Self {
        self.config.join_column_order = order;
        self
    }

    pub fn join_table_order(mut self, order: JoinOrder) -> Self {
        self.config.join_table_order = order;
        self
    }

    pub fn trim_abstract(mut self, flag: bool) -> Self {
        self.config.trim_abstract = flag;
        self
    }

    pub fn split_camel_case(mut self, flag: bool) -> Self {
        self.config.split_camel_case = flag;
        self
    }

    pub fn camel_case_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.camel_case_separator = separator.into();
        self
    }

    pub fn build(self) -> NamingConfig {
        self.config
    }
}

fn trim_namespace_entry(namespace: &str) -> String {
    namespace
        .trim_end_matches(NAMESPACE_PATH_SEPARATOR)
        .to_string()
}

fn namespace_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().map(|ns| trim_namespace_entry(ns)).collect())
}

/// Booleans may also arrive as numbers, strings or null.
/// 0, "", "0" and null are false.
fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseBool {
        Bool(bool),
        Int(i64),
        Float(f64),
        Str(String),
        Null,
    }

    match LooseBool::deserialize(deserializer)? {
        LooseBool::Bool(b) => Ok(b),
        LooseBool::Int(i) => Ok(i != 0),
        LooseBool::Float(f) => Ok(f != 0.0),
        LooseBool::Str(s) => Ok(!(s.is_empty() || s == "0")),
        LooseBool::Null => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = NamingConfig::default();
        assert!(config.entity_namespaces().is_empty());
        assert_eq!(config.namespace_separator(), "_");
        assert_eq!(config.join_column_separator(), "");
        assert_eq!(config.join_table_separator(), "_");
        assert_eq!(config.trim_fallback(), TrimFallback::UseClass);
        assert_eq!(config.case_mode(), CaseMode::Mixed);
        assert_eq!(config.reference_column_name(), "id");
        assert_eq!(config.join_column_order(), JoinOrder::Prepend);
        assert_eq!(config.join_table_order(), JoinOrder::Append);
        assert!(!config.trim_abstract());
        assert!(!config.split_camel_case());
        assert_eq!(config.camel_case_separator(), "");
    }

    #[test]
    fn test_builder_trims_namespace_separator() {
        let config = NamingConfig::builder()
            .entity_namespace("App\\Entities\\")
            .entity_namespaces(["Other\\Models", "Legacy\\\\"])
            .build();

        assert_eq!(
            config.entity_namespaces(),
            &["App\\Entities", "Other\\Models", "Legacy"]
        );
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = NamingConfig::from_value(json!({})).unwrap();
        assert_eq!(config, NamingConfig::default());
    }

    #[test]
    fn test_from_value_with_codes() {
        let config = NamingConfig::from_value(json!({
            "entityNamespaces": ["App\\Entities\\"],
            "trimFallback": 1,
            "case": 2,
            "joinColumnOrder": 1,
            "joinTableOrder": 0,
            "trimAbstract": 1,
            "splitCamelCase": true,
            "camelCaseSeparator": "."
        }))
        .unwrap();

        assert_eq!(config.entity_namespaces(), &["App\\Entities"]);
        assert_eq!(config.trim_fallback(), TrimFallback::UseFull);
        assert_eq!(config.case_mode(), CaseMode::Upper);
        assert_eq!(config.join_column_order(), JoinOrder::Append);
        assert_eq!(config.join_table_order(), JoinOrder::Prepend);
        assert!(config.trim_abstract());
        assert!(config.split_camel_case());
        assert_eq!(config.camel_case_separator(), ".");
    }

    #[test]
    fn test_from_json_with_names() {
        let config = NamingConfig::from_json(
            r#"{"case": "lower", "trimFallback": "full", "joinColumnOrder": "Append",
                "referenceColumnName": "key", "namespaceSeparator": "-"}"#,
        )
        .unwrap();

        assert_eq!(config.case_mode(), CaseMode::Lower);
        assert_eq!(config.trim_fallback(), TrimFallback::UseFull);
        assert_eq!(config.join_column_order(), JoinOrder::Append);
        assert_eq!(config.reference_column_name(), "key");
        assert_eq!(config.namespace_separator(), "-");
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = NamingConfig::from_value(json!({"pluralize": true})).unwrap_err();
        assert_eq!(err, NamingError::UnknownOption("pluralize".to_string()));
    }

    #[test]
    fn test_field_names_accepted_as_option_keys() {
        let config = NamingConfig::from_value(json!({
            "caseMode": 2,
            "trimAbstractPrefix": true
        }))
        .unwrap();

        assert_eq!(config.case_mode(), CaseMode::Upper);
        assert!(config.trim_abstract());
    }

    #[test]
    fn test_unknown_option_reported_by_name() {
        let err = NamingConfig::from_json(r#"{"case": 1, "singularize": "yes"}"#).unwrap_err();
        assert_eq!(err, NamingError::UnknownOption("singularize".to_string()));
    }

    #[test]
    fn test_loose_booleans() {
        let truthy = NamingConfig::from_value(json!({
            "trimAbstract": "1",
            "splitCamelCase": "yes"
        }))
        .unwrap();
        assert!(truthy.trim_abstract());
        assert!(truthy.split_camel_case());

        let falsy = NamingConfig::from_value(json!({
            "trimAbstract": "",
            "splitCamelCase": null
        }))
        .unwrap();
        assert!(!falsy.trim_abstract());
        assert!(!falsy.split_camel_case());

        let zero = NamingConfig::from_value(json!({"trimAbstractPrefix": "0"})).unwrap();
        assert!(!zero.trim_abstract());
    }

    #[test]
    fn test_unknown_case_rejected() {
        let err = NamingConfig::from_value(json!({"case": 7})).unwrap_err();
        assert!(matches!(err, NamingError::Config(_)));
    }

    #[test]
    fn test_unknown_join_order_rejected() {
        let err = NamingConfig::from_value(json!({"joinTableOrder": "sideways"})).unwrap_err();
        assert!(matches!(err, NamingError::Config(_)));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = NamingConfig::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, NamingError::Config(_)));
    }
}
