//! Output shape descriptors.

use crate::normalize::to_camel_case;

/// Target type of a public field, which also fixes its default.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputKind {
    /// Float in the public contract; absent -> `0`
    Money,
    /// Integer; absent -> `0`
    Integer,
    /// String identifier; absent -> `null`
    Id,
    /// Free text (also dates and enums); absent -> `null`
    Text,
    /// Boolean with a per-field default
    Flag(bool),
    /// Sub-object shaped recursively; absent -> `null`
    Object(OutputShape),
    /// List of sub-objects shaped recursively; absent -> `[]`
    List(OutputShape),
}

/// One public field and where to find it in a backend response.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputField {
    /// snake_case public name
    pub name: &'static str,
    /// Backend keys probed in order; first present wins
    pub sources: Vec<String>,
    pub kind: OutputKind,
}

impl OutputField {
    pub fn new(name: &'static str, kind: OutputKind) -> Self {
        Self {
            name,
            sources: vec![to_camel_case(name)],
            kind,
        }
    }

    pub fn money(name: &'static str) -> Self {
        Self::new(name, OutputKind::Money)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, OutputKind::Integer)
    }

    pub fn id(name: &'static str) -> Self {
        Self::new(name, OutputKind::Id)
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, OutputKind::Text)
    }

    pub fn flag(name: &'static str, default: bool) -> Self {
        Self::new(name, OutputKind::Flag(default))
    }

    pub fn object(name: &'static str, fields: Vec<OutputField>) -> Self {
        Self::new(name, OutputKind::Object(OutputShape::new(fields)))
    }

    pub fn list(name: &'static str, fields: Vec<OutputField>) -> Self {
        Self::new(name, OutputKind::List(OutputShape::new(fields)))
    }

    /// Add a fallback source key, probed after the existing ones.
    pub fn or(mut self, source: &str) -> Self {
        self.sources.push(source.to_string());
        self
    }
}

/// Ordered list of public fields for one resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputShape {
    pub fields: Vec<OutputField>,
}

impl OutputShape {
    pub fn new(fields: Vec<OutputField>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_source_is_camel_case() {
        assert_eq!(OutputField::money("total_amount").sources, vec!["totalAmount"]);
        let field = OutputField::text("account_code").or("code");
        assert_eq!(field.sources, vec!["accountCode", "code"]);
    }
}
