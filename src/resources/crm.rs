//! CRM backend resource families.

use crate::backend::BackendKind;
use crate::normalize::InputField as In;
use crate::shape::OutputField as Out;

use super::{Operation, ResourceDescriptor};

pub fn descriptors() -> Vec<ResourceDescriptor> {
    vec![crm_account(), crm_contact()]
}

fn crm_account() -> ResourceDescriptor {
    ResourceDescriptor::new("CrmAccount", "Account", BackendKind::Crm)
        .describe("Customer accounts held in the CRM")
        .input(vec![
            In::text("name").alias("account_name"),
            In::text("account_number"),
            In::text("industry"),
            In::text("account_type").alias("type").default_value("customer"),
            In::text("website"),
            In::text("phone"),
            In::text("email"),
            In::id("owner_id"),
            In::id("parent_account_id"),
            In::money("annual_revenue"),
            In::integer("employee_count"),
            In::object("billing_address"),
            In::object("shipping_address"),
            In::flag("is_active").default_value(true),
        ])
        .filters(vec![
            In::text("industry"),
            In::text("account_type"),
            In::id("owner_id"),
            In::text("search"),
        ])
        .require(Operation::Create, &["name"])
        .output(vec![
            Out::text("name").or("accountName"),
            Out::text("account_number"),
            Out::text("industry"),
            Out::text("account_type").or("type"),
            Out::text("website"),
            Out::text("phone"),
            Out::text("email"),
            Out::id("owner_id"),
            Out::id("parent_account_id"),
            Out::money("annual_revenue"),
            Out::integer("employee_count"),
            Out::object("billing_address", address()),
            Out::object("shipping_address", address()),
            Out::flag("is_active", true),
        ])
        .list_keys(&["crmAccounts"])
}

fn crm_contact() -> ResourceDescriptor {
    ResourceDescriptor::new("CrmContact", "Contact", BackendKind::Crm)
        .describe("People at CRM accounts")
        .input(vec![
            In::id("account_id").alias("crm_account_id"),
            In::text("first_name"),
            In::text("last_name"),
            In::text("email"),
            In::text("phone"),
            In::text("mobile"),
            In::text("job_title").alias("title"),
            In::text("department"),
            In::flag("is_primary").default_value(false),
            In::flag("opt_out_email").default_value(false),
        ])
        .filters(vec![In::id("account_id"), In::text("email"), In::text("search")])
        .require(Operation::Create, &["first_name", "last_name"])
        .output(vec![
            Out::id("account_id").or("crmAccountId"),
            Out::text("first_name"),
            Out::text("last_name"),
            Out::text("full_name").or("name"),
            Out::text("email"),
            Out::text("phone"),
            Out::text("mobile"),
            Out::text("job_title").or("title"),
            Out::text("department"),
            Out::flag("is_primary", false),
            Out::flag("opt_out_email", false),
        ])
        .list_keys(&["crmContacts"])
}

fn address() -> Vec<Out> {
    vec![
        Out::text("line1").or("street"),
        Out::text("line2"),
        Out::text("city"),
        Out::text("state"),
        Out::text("postal_code").or("zip"),
        Out::text("country"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crm_families_use_backend_entity_names() {
        let account = crm_account();
        assert_eq!(account.method_name(&Operation::List), "GetAccounts");
        assert_eq!(account.method_name(&Operation::Create), "CreateAccount");
        assert_eq!(account.backend, BackendKind::Crm);

        let contact = crm_contact();
        assert_eq!(contact.method_name(&Operation::Update), "UpdateContact");
        assert_eq!(contact.list_keys, vec!["contacts", "crmContacts", "data", "items"]);
    }
}
