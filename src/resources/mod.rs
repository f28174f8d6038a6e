//! Resource descriptors
//!
//! Every REST resource family is described once, declaratively: input alias
//! table, required fields per operation, output shape, wrapper keys and the
//! backend that owns it. The gateway engine is driven entirely by this table.
//!
//! - [`finance`]: families owned by the finance backend
//! - [`crm`]: families owned by the CRM backend
//! - [`supply_chain`]: families owned by the supply-chain backend

pub mod crm;
pub mod finance;
pub mod supply_chain;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::backend::BackendKind;
use crate::normalize::{InputField, to_camel_case};
use crate::shape::{OutputField, OutputShape};

/// Gateway operation on a resource family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    /// Custom action such as `post` or `approve`
    Action(String),
}

impl Operation {
    pub const CRUD: [Operation; 5] = [
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn label(&self) -> &str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Action(name) => name,
        }
    }

    /// Whether the operation addresses one entity by id.
    pub fn needs_id(&self) -> bool {
        !matches!(self, Operation::List | Operation::Create)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Custom action on a single entity (`POST /{resource}/{id}/{action}`).
#[derive(Debug, Clone)]
pub struct ActionSpec {
    pub name: &'static str,
    pub method: String,
    pub input: Vec<InputField>,
    pub required: Vec<&'static str>,
}

/// Value fetched from a backend when the client leaves a field out.
///
/// The lookup runs before the primary call. Its failure never aborts the
/// primary operation: the field is sent as `null` instead.
#[derive(Debug, Clone)]
pub struct DependentDefault {
    /// snake_case input field the lookup fills
    pub field: &'static str,
    pub backend: BackendKind,
    pub method: &'static str,
    /// Keys probed for the entity in the lookup response
    pub entity_keys: Vec<&'static str>,
    /// Keys probed for the id inside the entity
    pub id_keys: Vec<&'static str>,
}

impl DependentDefault {
    pub fn new(field: &'static str, backend: BackendKind, method: &'static str) -> Self {
        Self {
            field,
            backend,
            method,
            entity_keys: vec!["organization", "data"],
            id_keys: vec!["id"],
        }
    }

    pub fn rpc_field(&self) -> String {
        to_camel_case(self.field)
    }
}

/// Declarative description of one REST resource family.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    /// Route segment, e.g. `ChartOfAccounts`
    pub family: &'static str,
    /// Backend entity name, e.g. `Account`
    pub entity: &'static str,
    pub plural: String,
    pub backend: BackendKind,
    pub description: &'static str,
    pub operations: Vec<Operation>,
    pub input: Vec<InputField>,
    pub filters: Vec<InputField>,
    pub required: HashMap<Operation, Vec<&'static str>>,
    pub output: OutputShape,
    pub list_keys: Vec<String>,
    pub entity_keys: Vec<String>,
    pub actions: Vec<ActionSpec>,
    pub method_overrides: HashMap<Operation, String>,
    /// Forward the caller's bearer token to the backend
    pub forward_auth: bool,
    pub dependent_defaults: Vec<DependentDefault>,
}

impl ResourceDescriptor {
    pub fn new(family: &'static str, entity: &'static str, backend: BackendKind) -> Self {
        let plural = format!("{}s", entity);
        let list_keys = vec![lower_first(&plural), "data".to_string(), "items".to_string()];
        let entity_keys = vec![lower_first(entity), "data".to_string()];
        Self {
            family,
            entity,
            plural,
            backend,
            description: "",
            operations: Operation::CRUD.to_vec(),
            input: Vec::new(),
            filters: Vec::new(),
            required: HashMap::new(),
            output: OutputShape::default(),
            list_keys,
            entity_keys,
            actions: Vec::new(),
            method_overrides: HashMap::new(),
            forward_auth: true,
            dependent_defaults: Vec::new(),
        }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Irregular plural; also resets the default list wrapper key.
    pub fn plural(mut self, plural: &str) -> Self {
        let old_key = lower_first(&self.plural);
        self.plural = plural.to_string();
        if let Some(key) = self.list_keys.iter_mut().find(|k| **k == old_key) {
            *key = lower_first(plural);
        }
        self
    }

    pub fn input(mut self, fields: Vec<InputField>) -> Self {
        self.input = fields;
        self
    }

    pub fn filters(mut self, fields: Vec<InputField>) -> Self {
        self.filters = fields;
        self
    }

    pub fn require(mut self, operation: Operation, fields: &[&'static str]) -> Self {
        self.required.insert(operation, fields.to_vec());
        self
    }

    /// Entity shape: `id`, then `fields`, then `created_at`/`updated_at`.
    pub fn output(mut self, fields: Vec<OutputField>) -> Self {
        let mut all = Vec::with_capacity(fields.len() + 3);
        all.push(OutputField::id("id"));
        all.extend(fields);
        all.push(OutputField::text("created_at"));
        all.push(OutputField::text("updated_at"));
        self.output = OutputShape::new(all);
        self
    }

    /// Shape used as is (report rows without id or audit fields).
    pub fn report_output(mut self, fields: Vec<OutputField>) -> Self {
        self.output = OutputShape::new(fields);
        self
    }

    /// Additional list wrapper keys, probed before `data`/`items`.
    pub fn list_keys(mut self, keys: &[&str]) -> Self {
        let mut probed: Vec<String> = vec![self.list_keys[0].clone()];
        probed.extend(keys.iter().map(|k| k.to_string()));
        probed.extend(["data".to_string(), "items".to_string()]);
        self.list_keys = dedup_keep_first(probed);
        self
    }

    /// Additional entity wrapper keys, probed before `data`.
    pub fn entity_keys(mut self, keys: &[&str]) -> Self {
        let mut probed: Vec<String> = vec![self.entity_keys[0].clone()];
        probed.extend(keys.iter().map(|k| k.to_string()));
        probed.push("data".to_string());
        self.entity_keys = dedup_keep_first(probed);
        self
    }

    /// Restrict to list/get (reports, ledgers).
    pub fn read_only(mut self) -> Self {
        self.operations = vec![Operation::List, Operation::Get];
        self
    }

    /// Restrict to list (reports answered by a single list RPC, no per-entity get).
    pub fn report(mut self) -> Self {
        self.operations = vec![Operation::List];
        self
    }

    pub fn without(mut self, operation: Operation) -> Self {
        self.operations.retain(|op| *op != operation);
        self
    }

    /// Custom action; the RPC method is `<Action><Entity>`.
    pub fn action(mut self, name: &'static str, input: Vec<InputField>, required: &[&'static str]) -> Self {
        let method = format!("{}{}", upper_first(&to_camel_case(name)), self.entity);
        self.actions.push(ActionSpec {
            name,
            method,
            input,
            required: required.to_vec(),
        });
        self.operations.push(Operation::Action(name.to_string()));
        self
    }

    pub fn method(mut self, operation: Operation, method: &str) -> Self {
        self.method_overrides.insert(operation, method.to_string());
        self
    }

    /// Do not forward the caller's token for this family.
    pub fn no_auth(mut self) -> Self {
        self.forward_auth = false;
        self
    }

    pub fn default_from(mut self, lookup: DependentDefault) -> Self {
        self.dependent_defaults.push(lookup);
        self
    }

    pub fn supports(&self, operation: &Operation) -> bool {
        self.operations.contains(operation)
    }

    pub fn action_spec(&self, name: &str) -> Option<&ActionSpec> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn required_for(&self, operation: &Operation) -> &[&'static str] {
        self.required.get(operation).map(Vec::as_slice).unwrap_or(&[])
    }

    /// RPC method for an operation, honoring overrides.
    pub fn method_name(&self, operation: &Operation) -> String {
        if let Some(method) = self.method_overrides.get(operation) {
            return method.clone();
        }
        match operation {
            Operation::List => format!("Get{}", self.plural),
            Operation::Get => format!("Get{}", self.entity),
            Operation::Create => format!("Create{}", self.entity),
            Operation::Update => format!("Update{}", self.entity),
            Operation::Delete => format!("Delete{}", self.entity),
            Operation::Action(name) => self
                .action_spec(name)
                .map(|a| a.method.clone())
                .unwrap_or_else(|| format!("{}{}", upper_first(&to_camel_case(name)), self.entity)),
        }
    }

    pub fn list_key_refs(&self) -> Vec<&str> {
        self.list_keys.iter().map(String::as_str).collect()
    }

    pub fn entity_key_refs(&self) -> Vec<&str> {
        self.entity_keys.iter().map(String::as_str).collect()
    }

    pub fn summary(&self) -> ResourceSummary {
        ResourceSummary {
            family: self.family.to_string(),
            entity: self.entity.to_string(),
            backend: self.backend,
            description: self.description.to_string(),
            operations: self.operations.iter().map(|op| op.label().to_string()).collect(),
            forwards_auth: self.forward_auth,
        }
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn dedup_keep_first(keys: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

/// Catalog entry served by `GET /api/v1/resources`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResourceSummary {
    #[schema(example = "ChartOfAccounts")]
    pub family: String,
    #[schema(example = "Account")]
    pub entity: String,
    pub backend: BackendKind,
    pub description: String,
    #[schema(example = json!(["list", "get", "create", "update", "delete"]))]
    pub operations: Vec<String>,
    pub forwards_auth: bool,
}

/// All resource families, looked up by route segment.
///
/// Lookup ignores case, `_` and `-`: `ChartOfAccounts`, `chart_of_accounts`
/// and `chart-of-accounts` address the same family.
pub struct ResourceRegistry {
    descriptors: Vec<ResourceDescriptor>,
    index: HashMap<String, usize>,
}

impl ResourceRegistry {
    pub fn new(descriptors: Vec<ResourceDescriptor>) -> Self {
        let mut index = HashMap::with_capacity(descriptors.len());
        for (i, descriptor) in descriptors.iter().enumerate() {
            if index.insert(route_key(descriptor.family), i).is_some() {
                tracing::warn!(family = descriptor.family, "duplicate resource family, last wins");
            }
        }
        Self { descriptors, index }
    }

    /// The full catalog served by the gateway.
    pub fn standard() -> Self {
        let mut descriptors = finance::descriptors();
        descriptors.extend(crm::descriptors());
        descriptors.extend(supply_chain::descriptors());
        Self::new(descriptors)
    }

    pub fn get(&self, family: &str) -> Option<&ResourceDescriptor> {
        self.index
            .get(&route_key(family))
            .map(|&i| &self.descriptors[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn summaries(&self) -> Vec<ResourceSummary> {
        self.descriptors.iter().map(ResourceDescriptor::summary).collect()
    }
}

fn route_key(family: &str) -> String {
    family
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::InputKind;
    use std::collections::HashSet;

    #[test]
    fn test_method_names_follow_convention() {
        let d = ResourceDescriptor::new("JournalEntry", "JournalEntry", BackendKind::Finance)
            .plural("JournalEntries")
            .action("post", vec![], &[]);
        assert_eq!(d.method_name(&Operation::List), "GetJournalEntries");
        assert_eq!(d.method_name(&Operation::Get), "GetJournalEntry");
        assert_eq!(d.method_name(&Operation::Create), "CreateJournalEntry");
        assert_eq!(d.method_name(&Operation::Delete), "DeleteJournalEntry");
        assert_eq!(
            d.method_name(&Operation::Action("post".into())),
            "PostJournalEntry"
        );
        assert_eq!(d.list_keys[0], "journalEntries");
    }

    #[test]
    fn test_list_key_order() {
        let d = ResourceDescriptor::new("Vendor", "Vendor", BackendKind::SupplyChain)
            .list_keys(&["suppliers"]);
        assert_eq!(d.list_keys, vec!["vendors", "suppliers", "data", "items"]);
    }

    #[test]
    fn test_route_key_variants() {
        let registry = ResourceRegistry::standard();
        let a = registry.get("ChartOfAccounts").unwrap().family;
        assert_eq!(registry.get("chart_of_accounts").unwrap().family, a);
        assert_eq!(registry.get("chart-of-accounts").unwrap().family, a);
        assert!(registry.get("NoSuchThing").is_none());
    }

    #[test]
    fn test_catalog_backend_ownership() {
        let registry = ResourceRegistry::standard();
        let count = |kind: BackendKind| registry.iter().filter(|d| d.backend == kind).count();
        assert_eq!(count(BackendKind::Finance), 45);
        assert_eq!(count(BackendKind::Crm), 2);
        assert_eq!(count(BackendKind::SupplyChain), 4);
    }

    fn declared_names(fields: &[InputField]) -> HashSet<&'static str> {
        fields.iter().map(|f| f.name).collect()
    }

    #[test]
    fn test_catalog_is_consistent() {
        let registry = ResourceRegistry::standard();
        let mut families = HashSet::new();

        for d in registry.iter() {
            assert!(families.insert(route_key(d.family)), "duplicate family {}", d.family);
            assert!(!d.output.fields.is_empty(), "{} has no output shape", d.family);
            assert!(!d.description.is_empty(), "{} has no description", d.family);

            let names = declared_names(&d.input);
            for (op, required) in &d.required {
                for field in required {
                    assert!(
                        names.contains(field),
                        "{} requires undeclared field {} for {}",
                        d.family,
                        field,
                        op
                    );
                }
            }
            for action in &d.actions {
                let names = declared_names(&action.input);
                for field in &action.required {
                    assert!(names.contains(field), "{} action {} requires {}", d.family, action.name, field);
                }
            }
            for lookup in &d.dependent_defaults {
                assert!(names.contains(lookup.field), "{} default for undeclared {}", d.family, lookup.field);
            }

            let mut public = HashSet::new();
            for field in &d.output.fields {
                assert!(public.insert(field.name), "{} repeats output {}", d.family, field.name);
            }
        }
    }

    #[test]
    fn test_invoice_items_are_line_items() {
        let registry = ResourceRegistry::standard();
        let invoice = registry.get("Invoice").unwrap();
        let items = invoice.input.iter().find(|f| f.name == "items").unwrap();
        assert!(matches!(items.kind, InputKind::Lines(_)));
    }
}
