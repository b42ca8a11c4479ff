use serde::Serialize;
use std::collections::BTreeMap;

/// How a parameter is edited, and its default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FieldKind {
    Toggle {
        default: bool,
    },
    IntRange {
        min: i64,
        max: i64,
        step: i64,
        default: i64,
    },
    Choice {
        options: &'static [&'static str],
        default: usize,
    },
}

/// Declarative relevance: when a field is worth showing and applying.
///
/// This replaces imperative "checkbox toggles row visibility" wiring; a host
/// re-evaluates relevance against the current values on every render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Condition {
    /// Relevant only while the named toggle field is on.
    Enabled(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub kind: FieldKind,
    pub relevant_when: Option<Condition>,
}

/// Pure-data description of a post-processor's parameter form.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSchema {
    pub fields: Vec<FieldSpec>,
}

impl ParameterSchema {
    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Whether `field` should currently be shown, given the host's values.
    pub fn is_relevant(&self, field: &FieldSpec, values: &ParamValues) -> bool {
        match field.relevant_when {
            None => true,
            Some(Condition::Enabled(id)) => {
                let default = match self.field(id).map(|f| f.kind) {
                    Some(FieldKind::Toggle { default }) => default,
                    _ => false,
                };
                values.bool_or(id, default)
            }
        }
    }
}

/// A single host-provided parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Choice(usize),
}

/// Flat parameter record handed over by the host.
///
/// Unknown ids are ignored; missing or mistyped entries fall back to the
/// schema defaults, so a host can send a sparse record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamValues {
    entries: BTreeMap<&'static str, ParamValue>,
}

impl ParamValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bool(&mut self, id: &'static str, value: bool) -> &mut Self {
        self.entries.insert(id, ParamValue::Bool(value));
        self
    }

    pub fn set_int(&mut self, id: &'static str, value: i64) -> &mut Self {
        self.entries.insert(id, ParamValue::Int(value));
        self
    }

    pub fn set_choice(&mut self, id: &'static str, index: usize) -> &mut Self {
        self.entries.insert(id, ParamValue::Choice(index));
        self
    }

    pub fn bool_or(&self, id: &str, default: bool) -> bool {
        match self.entries.get(id) {
            Some(ParamValue::Bool(v)) => *v,
            _ => default,
        }
    }

    pub fn int_or(&self, id: &str, default: i64) -> i64 {
        match self.entries.get(id) {
            Some(ParamValue::Int(v)) => *v,
            _ => default,
        }
    }

    pub fn choice_or(&self, id: &str, default: usize) -> usize {
        match self.entries.get(id) {
            Some(ParamValue::Choice(v)) => *v,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ParameterSchema {
        ParameterSchema {
            fields: vec![
                FieldSpec {
                    id: "enabled",
                    label: "Enabled",
                    help: "",
                    kind: FieldKind::Toggle { default: false },
                    relevant_when: None,
                },
                FieldSpec {
                    id: "strength",
                    label: "Strength",
                    help: "",
                    kind: FieldKind::IntRange {
                        min: 0,
                        max: 10,
                        step: 1,
                        default: 5,
                    },
                    relevant_when: Some(Condition::Enabled("enabled")),
                },
            ],
        }
    }

    #[test]
    fn relevance_follows_the_gating_toggle() {
        let schema = schema();
        let strength = *schema.field("strength").unwrap();

        let mut values = ParamValues::new();
        assert!(!schema.is_relevant(&strength, &values));

        values.set_bool("enabled", true);
        assert!(schema.is_relevant(&strength, &values));

        values.set_bool("enabled", false);
        assert!(!schema.is_relevant(&strength, &values));
    }

    #[test]
    fn missing_and_mistyped_entries_fall_back_to_defaults() {
        let mut values = ParamValues::new();
        assert_eq!(values.int_or("strength", 5), 5);

        values.set_bool("strength", true);
        assert_eq!(values.int_or("strength", 5), 5);

        values.set_int("strength", 9);
        assert_eq!(values.int_or("strength", 5), 9);
    }
}
