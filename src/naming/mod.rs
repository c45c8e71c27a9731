pub mod transform;

use tracing::{debug, trace};

use crate::config::{JoinOrder, NamingConfig, TrimFallback};
use crate::error::NamingError;
use transform::{
    apply_case, join_operand, last_segment, order_operands, replace_path_separator,
    split_camel_case, split_join_seam, trim_abstract_prefix, trim_namespace,
};

/// Naming operations a host ORM calls while building schema metadata
///
/// Every method is a pure function of the strategy's configuration and
/// its arguments.
pub trait NamingStrategy: Send + Sync {
    /// Table name for a fully-qualified class name
    fn class_to_table_name(&self, class_name: &str) -> String;

    /// Column name for a property. `class_name` is the owning class, if known.
    fn property_to_column_name(&self, property_name: &str, class_name: Option<&str>) -> String;

    /// Name of the column other tables reference
    fn reference_column_name(&self) -> String;

    /// Foreign key column for an association property
    fn join_column_name(&self, property_name: &str) -> String;

    /// Link table between two classes
    fn join_table_name(
        &self,
        source_class: &str,
        target_class: &str,
        property_name: Option<&str>,
    ) -> String;

    /// Foreign key column in a link table pointing at `class_name`
    fn join_key_column_name(&self, class_name: &str, referenced_column: Option<&str>) -> String;
}

/// Naming strategy that folds the class namespace into generated names
///
/// Entity namespaces are stripped from class names (first match wins), the
/// remaining path is joined with the namespace separator, and every result
/// goes through the camel-case split and case transform.
#[derive(Debug, Clone, Default)]
pub struct NamespaceNamingStrategy {
    config: NamingConfig,
}

impl NamespaceNamingStrategy {
    pub fn new(config: NamingConfig) -> Self {
        debug!(
            namespaces = config.entity_namespaces().len(),
            case = ?config.case_mode(),
            split_camel_case = config.split_camel_case(),
            "namespace naming strategy configured"
        );
        NamespaceNamingStrategy { config }
    }

    /// Build from a JSON options document, e.g. `{"entityNamespaces": ["App\\Entities"]}`
    pub fn from_json(input: &str) -> Result<Self, NamingError> {
        Ok(Self::new(NamingConfig::from_json(input)?))
    }

    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Case/split pass; the last step of every public operation.
    fn finish(&self, value: &str) -> String {
        if self.config.split_camel_case() {
            let split = split_camel_case(value, self.config.camel_case_separator());
            apply_case(&split, self.config.case_mode())
        } else {
            apply_case(value, self.config.case_mode())
        }
    }

    /// Join two finished names. Only the seam gets the camel split; the
    /// operands already went through the full pass.
    fn join_finished(
        &self,
        root_name: &str,
        add_name: &str,
        order: JoinOrder,
        separator: &str,
    ) -> String {
        let case = self.config.case_mode();
        let (first, second) = order_operands(root_name, add_name, order);
        let second = join_operand(second, separator, case);

        let joined = if self.config.split_camel_case() {
            split_join_seam(first, separator, &second, self.config.camel_case_separator())
        } else {
            format!("{}{}{}", first, separator, second)
        };
        apply_case(&joined, case)
    }

    fn trim_by_entity_namespaces<'a>(&self, class_name: &'a str) -> &'a str {
        let matched = self
            .config
            .entity_namespaces()
            .iter()
            .find_map(|ns| trim_namespace(class_name, ns));

        if let Some(trimmed) = matched {
            return trimmed;
        }

        trace!(class_name, fallback = ?self.config.trim_fallback(), "no entity namespace matched");
        match self.config.trim_fallback() {
            TrimFallback::UseClass => last_segment(class_name),
            TrimFallback::UseFull => class_name,
        }
    }

    /// Table name before the case/split pass
    fn table_name(&self, class_name: &str) -> String {
        let trimmed = self.trim_by_entity_namespaces(class_name);

        if self.config.trim_abstract() {
            let trimmed = trim_abstract_prefix(trimmed);
            replace_path_separator(&trimmed, self.config.namespace_separator())
        } else {
            replace_path_separator(trimmed, self.config.namespace_separator())
        }
    }
}

impl NamingStrategy for NamespaceNamingStrategy {
    fn class_to_table_name(&self, class_name: &str) -> String {
        self.finish(&self.table_name(class_name))
    }

    fn property_to_column_name(&self, property_name: &str, _class_name: Option<&str>) -> String {
        self.finish(property_name)
    }

    fn reference_column_name(&self) -> String {
        self.finish(self.config.reference_column_name())
    }

    fn join_column_name(&self, property_name: &str) -> String {
        self.join_finished(
            &self.property_to_column_name(property_name, None),
            &self.reference_column_name(),
            self.config.join_column_order(),
            self.config.join_column_separator(),
        )
    }

    fn join_table_name(
        &self,
        source_class: &str,
        target_class: &str,
        _property_name: Option<&str>,
    ) -> String {
        self.join_finished(
            &self.class_to_table_name(source_class),
            &self.class_to_table_name(target_class),
            self.config.join_table_order(),
            self.config.join_table_separator(),
        )
    }

    fn join_key_column_name(&self, class_name: &str, referenced_column: Option<&str>) -> String {
        let referenced = match referenced_column.filter(|name| !name.is_empty()) {
            Some(name) => self.finish(name),
            None => self.reference_column_name(),
        };

        self.join_finished(
            &self.class_to_table_name(class_name),
            &referenced,
            self.config.join_column_order(),
            self.config.join_column_separator(),
        )
    }
}
