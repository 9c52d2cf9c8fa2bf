//! Structured input validation.
//!
//! Validated types declare their rules statically: [`Validate::field_rules`]
//! returns `(field, rules, value)` triples and a [`Validator`] evaluates
//! them against its rule registry. There is no runtime introspection; what
//! gets validated is exactly what the type declares.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{ValidationError, ValidationFailures};

/// A named rule: returns the failure title when `value` violates it.
pub type RuleFn = fn(field: &str, value: &Value) -> Result<(), String>;

/// One field's declared rules, with its current value as JSON.
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [&'static str],
    pub value: Value,
}

impl FieldRules {
    #[must_use]
    pub fn new(field: &'static str, rules: &'static [&'static str], value: Value) -> Self {
        Self {
            field,
            rules,
            value,
        }
    }
}

/// Statically declared validation rules for a type.
pub trait Validate {
    fn field_rules(&self) -> Vec<FieldRules>;
}

/// Rule registry.
///
/// `new` seeds the built-in `presence` rule; more rules can be chained on
/// with [`Validator::rule`]. A rule name that is not registered is itself
/// reported as a validation failure rather than ignored.
pub struct Validator {
    rules: HashMap<&'static str, RuleFn>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        let mut rules: HashMap<&'static str, RuleFn> = HashMap::new();
        rules.insert("presence", validate_presence);
        Self { rules }
    }

    /// Register an additional rule under `name`.
    #[must_use]
    pub fn rule(mut self, name: &'static str, rule: RuleFn) -> Self {
        self.rules.insert(name, rule);
        self
    }

    /// Evaluate every declared rule of `subject`.
    ///
    /// # Errors
    ///
    /// Returns the accumulated failures when any rule is violated or
    /// unknown.
    pub fn validate(&self, subject: &dyn Validate) -> Result<(), ValidationFailures> {
        let mut failures = Vec::new();

        for declared in subject.field_rules() {
            for rule in declared.rules {
                match self.rules.get(rule) {
                    None => failures.push(ValidationError {
                        code: format!("{}_{rule}", declared.field),
                        field: declared.field.to_string(),
                        title: format!("Invalid validator {rule} for field {}", declared.field),
                    }),
                    Some(check) => {
                        if let Err(title) = check(declared.field, &declared.value) {
                            failures.push(ValidationError {
                                code: format!("{}_{rule}", declared.field),
                                field: declared.field.to_string(),
                                title,
                            });
                        }
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailures(failures))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in `presence` rule: rejects empty values.
pub fn validate_presence(_field: &str, value: &Value) -> Result<(), String> {
    if is_empty_value(value) {
        Err("is invalid".to_string())
    } else {
        Ok(())
    }
}

/// Emptiness per the presence rule: null, empty strings and collections,
/// and zero numbers are empty; booleans never are.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(_) => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct CreatePerson {
        name: String,
        age: i64,
    }

    impl Validate for CreatePerson {
        fn field_rules(&self) -> Vec<FieldRules> {
            vec![
                FieldRules::new("name", &["presence"], json!(self.name)),
                FieldRules::new("age", &["presence"], json!(self.age)),
            ]
        }
    }

    #[test]
    fn valid_subject_passes() {
        let validator = Validator::new();
        let subject = CreatePerson {
            name: "Jason".to_string(),
            age: 34,
        };
        assert!(validator.validate(&subject).is_ok());
    }

    #[test]
    fn empty_fields_fail_presence() {
        let validator = Validator::new();
        let subject = CreatePerson {
            name: String::new(),
            age: 0,
        };
        let failures = validator.validate(&subject).unwrap_err();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures.0[0].code, "name_presence");
        assert_eq!(failures.0[0].field, "name");
        assert_eq!(failures.0[0].title, "is invalid");
        assert_eq!(failures.0[1].code, "age_presence");
    }

    #[test]
    fn unknown_rule_is_reported_not_ignored() {
        struct Widget;
        impl Validate for Widget {
            fn field_rules(&self) -> Vec<FieldRules> {
                vec![FieldRules::new("size", &["bogus"], json!("xl"))]
            }
        }

        let validator = Validator::new();
        let failures = validator.validate(&Widget).unwrap_err();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures.0[0].code, "size_bogus");
        assert_eq!(failures.0[0].title, "Invalid validator bogus for field size");
    }

    #[test]
    fn custom_rules_can_be_registered() {
        struct Widget {
            count: i64,
        }
        impl Validate for Widget {
            fn field_rules(&self) -> Vec<FieldRules> {
                vec![FieldRules::new("count", &["positive"], json!(self.count))]
            }
        }

        let validator = Validator::new().rule("positive", |_, value| {
            if value.as_i64().unwrap_or(0) > 0 {
                Ok(())
            } else {
                Err("must be positive".to_string())
            }
        });

        assert!(validator.validate(&Widget { count: 3 }).is_ok());
        let failures = validator.validate(&Widget { count: -1 }).unwrap_err();
        assert_eq!(failures.0[0].title, "must be positive");
    }

    #[test]
    fn booleans_are_never_empty() {
        struct Flag {
            on: bool,
        }
        impl Validate for Flag {
            fn field_rules(&self) -> Vec<FieldRules> {
                vec![FieldRules::new("on", &["presence"], json!(self.on))]
            }
        }

        let validator = Validator::new();
        assert!(validator.validate(&Flag { on: false }).is_ok());
    }
}
