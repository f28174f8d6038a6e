//! Input field alias tables.

use serde_json::{Map, Value};

/// How an input value is coerced before it is sent to a backend.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    /// Free text; numbers and booleans are stringified
    Text,
    /// Relational identifier; numbers are stringified
    Id,
    /// Monetary amount, sent as a decimal string
    Money,
    /// Quantity, sent as a decimal string
    Quantity,
    /// Boolean flag
    Flag,
    Integer,
    /// `YYYY-MM-DD` or RFC 3339
    Date,
    /// Opaque JSON object, passed through
    Object,
    /// List of line items normalized with their own alias table
    Lines(Vec<InputField>),
}

/// One logical input field and the spellings a client may use for it.
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    /// Canonical snake_case name (used in error messages)
    pub name: &'static str,
    /// camelCase name in the backend payload
    pub rpc_name: String,
    /// Accepted spellings, in check order: snake_case, camelCase, legacy
    pub aliases: Vec<String>,
    pub kind: InputKind,
    /// Applied on create when no alias is present
    pub default: Option<Value>,
}

impl InputField {
    pub fn new(name: &'static str, kind: InputKind) -> Self {
        let camel = to_camel_case(name);
        let mut aliases = vec![name.to_string()];
        if camel != name {
            aliases.push(camel.clone());
        }
        Self {
            name,
            rpc_name: camel,
            aliases,
            kind,
            default: None,
        }
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, InputKind::Text)
    }

    pub fn id(name: &'static str) -> Self {
        Self::new(name, InputKind::Id)
    }

    pub fn money(name: &'static str) -> Self {
        Self::new(name, InputKind::Money)
    }

    pub fn quantity(name: &'static str) -> Self {
        Self::new(name, InputKind::Quantity)
    }

    pub fn flag(name: &'static str) -> Self {
        Self::new(name, InputKind::Flag)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, InputKind::Integer)
    }

    pub fn date(name: &'static str) -> Self {
        Self::new(name, InputKind::Date)
    }

    pub fn object(name: &'static str) -> Self {
        Self::new(name, InputKind::Object)
    }

    pub fn lines(name: &'static str, fields: Vec<InputField>) -> Self {
        Self::new(name, InputKind::Lines(fields))
    }

    /// Backend uses a name other than the camelCase of `name`.
    ///
    /// The backend name is also accepted from clients, after the defaults.
    pub fn rpc(mut self, rpc_name: &str) -> Self {
        self.rpc_name = rpc_name.to_string();
        self.push_alias(rpc_name);
        self
    }

    /// Accept an additional legacy spelling.
    pub fn alias(mut self, alias: &str) -> Self {
        self.push_alias(alias);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn push_alias(&mut self, alias: &str) {
        if !self.aliases.iter().any(|a| a == alias) {
            self.aliases.push(alias.to_string());
        }
    }

    /// Locate the value for this field in raw input.
    ///
    /// Aliases are checked in order and the first non-null one wins.
    pub fn lookup<'a>(&self, raw: &'a Map<String, Value>) -> Option<(&str, &'a Value)> {
        self.aliases.iter().find_map(|alias| {
            raw.get(alias)
                .filter(|v| !v.is_null())
                .map(|v| (alias.as_str(), v))
        })
    }

    /// Every alias that carries a non-null value (for conflict diagnostics).
    pub fn present_aliases<'a>(&'a self, raw: &'a Map<String, Value>) -> Vec<(&'a str, &'a Value)> {
        self.aliases
            .iter()
            .filter_map(|alias| {
                raw.get(alias)
                    .filter(|v| !v.is_null())
                    .map(|v| (alias.as_str(), v))
            })
            .collect()
    }
}

/// `account_code` -> `accountCode`. Already-camel input is returned as is.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_conversion() {
        assert_eq!(to_camel_case("account_code"), "accountCode");
        assert_eq!(to_camel_case("id"), "id");
        assert_eq!(to_camel_case("is_active"), "isActive");
        assert_eq!(to_camel_case("accountCode"), "accountCode");
    }

    #[test]
    fn test_alias_order() {
        let field = InputField::text("account_code").rpc("code").alias("acct_code");
        assert_eq!(field.rpc_name, "code");
        assert_eq!(field.aliases, vec!["account_code", "accountCode", "code", "acct_code"]);
    }

    #[test]
    fn test_single_word_field_has_one_alias() {
        let field = InputField::money("amount");
        assert_eq!(field.aliases, vec!["amount"]);
        assert_eq!(field.rpc_name, "amount");
    }

    #[test]
    fn test_lookup_skips_null_alias() {
        let field = InputField::id("organization_id");
        let raw = json!({"organization_id": null, "organizationId": "org-1"});
        let (alias, value) = field.lookup(raw.as_object().unwrap()).unwrap();
        assert_eq!(alias, "organizationId");
        assert_eq!(value, &json!("org-1"));
    }
}
