//! Finance backend resource families.

use crate::backend::BackendKind;
use crate::normalize::InputField as In;
use crate::shape::OutputField as Out;

use super::{DependentDefault, Operation, ResourceDescriptor};

fn finance(family: &'static str, entity: &'static str) -> ResourceDescriptor {
    ResourceDescriptor::new(family, entity, BackendKind::Finance)
}

fn organization_default() -> DependentDefault {
    DependentDefault::new("organization_id", BackendKind::Finance, "GetDefaultOrganization")
}

fn invoice_line_input() -> Vec<In> {
    vec![
        In::text("description"),
        In::id("account_id"),
        In::quantity("quantity").default_value("1"),
        In::money("unit_price").alias("price"),
        In::id("tax_rate_id"),
        In::money("discount_amount"),
    ]
}

fn invoice_line_output() -> Vec<Out> {
    vec![
        Out::id("id"),
        Out::text("description"),
        Out::id("account_id"),
        Out::money("quantity"),
        Out::money("unit_price").or("price"),
        Out::id("tax_rate_id"),
        Out::money("tax_amount"),
        Out::money("discount_amount"),
        Out::money("line_total").or("amount"),
    ]
}

fn allocation_input() -> Vec<In> {
    vec![In::id("document_id").alias("invoice_id").alias("bill_id"), In::money("amount")]
}

fn allocation_output() -> Vec<Out> {
    vec![
        Out::id("document_id").or("invoiceId").or("billId"),
        Out::money("amount"),
    ]
}

fn journal_line_input() -> Vec<In> {
    vec![
        In::id("account_id"),
        In::text("description"),
        In::money("debit").alias("debit_amount"),
        In::money("credit").alias("credit_amount"),
        In::id("cost_center_id"),
        In::id("project_id"),
    ]
}

fn journal_line_output() -> Vec<Out> {
    vec![
        Out::id("account_id"),
        Out::text("account_name"),
        Out::text("description"),
        Out::money("debit").or("debitAmount"),
        Out::money("credit").or("creditAmount"),
        Out::id("cost_center_id"),
        Out::id("project_id"),
    ]
}

fn document_filters() -> Vec<In> {
    vec![
        In::text("status"),
        In::date("from_date").alias("start_date"),
        In::date("to_date").alias("end_date"),
        In::text("search"),
    ]
}

pub fn descriptors() -> Vec<ResourceDescriptor> {
    vec![
        chart_of_accounts(),
        journal_entry(),
        invoice(),
        credit_note(),
        debit_note(),
        customer_payment(),
        bill(),
        vendor_payment(),
        budget(),
        budget_line(),
        fixed_asset(),
        asset_category(),
        asset_depreciation(),
        asset_disposal(),
        expense_claim(),
        expense_category(),
        bank_account(),
        bank_transaction(),
        bank_reconciliation(),
        contract(),
        currency(),
        exchange_rate(),
        fiscal_year(),
        accounting_period(),
        tax_rate(),
        tax_return(),
        cost_center(),
        project(),
        organization(),
        payment_term(),
        recurring_invoice(),
        liability(),
        loan(),
        provision(),
        dividend(),
        accrual(),
        prepayment(),
        deferred_revenue(),
        intercompany_transaction(),
        cost_allocation(),
        petty_cash(),
        cheque(),
        payment_reminder(),
        general_ledger(),
        trial_balance(),
    ]
}

fn chart_of_accounts() -> ResourceDescriptor {
    finance("ChartOfAccounts", "Account")
        .describe("General ledger accounts")
        .input(vec![
            In::text("account_code").alias("code"),
            In::text("account_name").alias("name"),
            In::text("account_type").alias("type"),
            In::text("account_subtype"),
            In::id("parent_account_id").alias("parent_id"),
            In::text("description"),
            In::text("currency").default_value("USD"),
            In::money("opening_balance"),
            In::flag("is_active").default_value(true),
            In::flag("is_system_account").default_value(false),
        ])
        .filters(vec![
            In::text("account_type").alias("type"),
            In::flag("is_active"),
            In::id("parent_account_id"),
            In::text("search"),
        ])
        .require(Operation::Create, &["account_code", "account_name", "account_type"])
        .output(vec![
            Out::text("account_code").or("code"),
            Out::text("account_name").or("name"),
            Out::text("account_type").or("type"),
            Out::text("account_subtype"),
            Out::id("parent_account_id").or("parentId"),
            Out::text("description"),
            Out::text("currency"),
            Out::money("opening_balance"),
            Out::money("current_balance").or("balance"),
            Out::flag("is_active", true),
            Out::flag("is_system_account", false),
        ])
        .list_keys(&["chartOfAccounts"])
}

fn journal_entry() -> ResourceDescriptor {
    finance("JournalEntry", "JournalEntry")
        .plural("JournalEntries")
        .describe("Double-entry journal entries")
        .input(vec![
            In::text("entry_number").alias("reference"),
            In::date("entry_date").alias("date"),
            In::text("description").alias("memo"),
            In::text("currency").default_value("USD"),
            In::id("accounting_period_id"),
            In::id("organization_id"),
            In::text("source_type"),
            In::lines("lines", journal_line_input()).alias("journal_lines"),
        ])
        .filters(document_filters())
        .require(Operation::Create, &["entry_date", "lines"])
        .output(vec![
            Out::text("entry_number").or("reference"),
            Out::text("entry_date").or("date"),
            Out::text("description").or("memo"),
            Out::text("currency"),
            Out::text("status"),
            Out::id("accounting_period_id"),
            Out::id("organization_id"),
            Out::text("source_type"),
            Out::money("total_debit"),
            Out::money("total_credit"),
            Out::list("lines", journal_line_output()).or("journalLines"),
            Out::text("posted_at"),
            Out::id("reversal_of_id"),
        ])
        .action("post", vec![In::date("posting_date")], &[])
        .action(
            "reverse",
            vec![In::date("reversal_date"), In::text("reason")],
            &["reversal_date"],
        )
}

fn invoice() -> ResourceDescriptor {
    finance("Invoice", "Invoice")
        .describe("Customer invoices")
        .input(vec![
            In::text("invoice_number").alias("number"),
            In::id("customer_id"),
            In::id("organization_id"),
            In::date("invoice_date").alias("issue_date"),
            In::date("due_date"),
            In::id("payment_term_id"),
            In::text("currency").default_value("USD"),
            In::money("exchange_rate"),
            In::text("reference"),
            In::text("notes"),
            In::flag("is_recurring").default_value(false),
            In::lines("items", invoice_line_input()).alias("line_items"),
        ])
        .filters(vec![
            In::id("customer_id"),
            In::text("status"),
            In::date("from_date"),
            In::date("to_date"),
            In::flag("overdue"),
        ])
        .require(Operation::Create, &["customer_id", "invoice_date", "items"])
        .output(vec![
            Out::text("invoice_number").or("number"),
            Out::id("customer_id"),
            Out::text("customer_name"),
            Out::id("organization_id"),
            Out::text("invoice_date").or("issueDate"),
            Out::text("due_date"),
            Out::id("payment_term_id"),
            Out::text("currency"),
            Out::money("exchange_rate"),
            Out::text("status"),
            Out::text("reference"),
            Out::text("notes"),
            Out::money("subtotal"),
            Out::money("tax_amount").or("taxTotal"),
            Out::money("discount_amount"),
            Out::money("total_amount").or("total"),
            Out::money("amount_paid"),
            Out::money("amount_due").or("balanceDue"),
            Out::flag("is_recurring", false),
            Out::list("items", invoice_line_output()).or("lineItems"),
            Out::text("sent_at"),
        ])
        .action("send", vec![In::text("email"), In::text("message")], &[])
        .action("void", vec![In::text("reason")], &["reason"])
}

fn credit_note() -> ResourceDescriptor {
    finance("CreditNote", "CreditNote")
        .describe("Credits issued against customer invoices")
        .input(vec![
            In::text("credit_note_number").alias("number"),
            In::id("customer_id"),
            In::id("invoice_id"),
            In::date("issue_date").alias("date"),
            In::text("currency").default_value("USD"),
            In::text("reason"),
            In::lines("items", invoice_line_input()),
        ])
        .filters(vec![In::id("customer_id"), In::id("invoice_id"), In::text("status")])
        .require(Operation::Create, &["customer_id", "issue_date", "items"])
        .output(vec![
            Out::text("credit_note_number").or("number"),
            Out::id("customer_id"),
            Out::id("invoice_id"),
            Out::text("issue_date").or("date"),
            Out::text("currency"),
            Out::text("status"),
            Out::text("reason"),
            Out::money("subtotal"),
            Out::money("tax_amount"),
            Out::money("total_amount").or("total"),
            Out::money("amount_applied"),
            Out::money("remaining_amount"),
            Out::list("items", invoice_line_output()),
        ])
}

fn debit_note() -> ResourceDescriptor {
    finance("DebitNote", "DebitNote")
        .describe("Debits raised against vendor bills")
        .input(vec![
            In::text("debit_note_number").alias("number"),
            In::id("vendor_id"),
            In::id("bill_id"),
            In::date("issue_date").alias("date"),
            In::text("currency").default_value("USD"),
            In::text("reason"),
            In::lines("items", invoice_line_input()),
        ])
        .filters(vec![In::id("vendor_id"), In::id("bill_id"), In::text("status")])
        .require(Operation::Create, &["vendor_id", "issue_date", "items"])
        .output(vec![
            Out::text("debit_note_number").or("number"),
            Out::id("vendor_id"),
            Out::id("bill_id"),
            Out::text("issue_date").or("date"),
            Out::text("currency"),
            Out::text("status"),
            Out::text("reason"),
            Out::money("subtotal"),
            Out::money("tax_amount"),
            Out::money("total_amount").or("total"),
            Out::list("items", invoice_line_output()),
        ])
}

fn payment_input(party: &'static str) -> Vec<In> {
    vec![
        In::text("payment_number").alias("number"),
        In::id(party),
        In::id("organization_id"),
        In::id("bank_account_id"),
        In::date("payment_date").alias("date"),
        In::money("amount"),
        In::text("currency").default_value("USD"),
        In::text("payment_method").alias("method").default_value("bank_transfer"),
        In::text("reference"),
        In::text("notes"),
        In::lines("allocations", allocation_input()),
    ]
}

fn payment_output(party: &'static str) -> Vec<Out> {
    vec![
        Out::text("payment_number").or("number"),
        Out::id(party),
        Out::id("organization_id"),
        Out::id("bank_account_id"),
        Out::text("payment_date").or("date"),
        Out::money("amount"),
        Out::money("unallocated_amount"),
        Out::text("currency"),
        Out::text("payment_method").or("method"),
        Out::text("status"),
        Out::text("reference"),
        Out::text("notes"),
        Out::list("allocations", allocation_output()),
    ]
}

fn customer_payment() -> ResourceDescriptor {
    finance("CustomerPayment", "CustomerPayment")
        .describe("Payments received from customers")
        .input(payment_input("customer_id"))
        .filters(vec![In::id("customer_id"), In::date("from_date"), In::date("to_date")])
        .require(Operation::Create, &["customer_id", "payment_date", "amount"])
        .output(payment_output("customer_id"))
        .default_from(organization_default())
}

fn bill() -> ResourceDescriptor {
    finance("Bill", "Bill")
        .describe("Vendor bills (accounts payable)")
        .input(vec![
            In::text("bill_number").alias("number"),
            In::id("vendor_id"),
            In::id("purchase_order_id"),
            In::date("bill_date").alias("date"),
            In::date("due_date"),
            In::text("currency").default_value("USD"),
            In::text("reference"),
            In::text("notes"),
            In::lines("items", invoice_line_input()).alias("line_items"),
        ])
        .filters(vec![In::id("vendor_id"), In::text("status"), In::date("from_date"), In::date("to_date")])
        .require(Operation::Create, &["vendor_id", "bill_date", "items"])
        .output(vec![
            Out::text("bill_number").or("number"),
            Out::id("vendor_id"),
            Out::text("vendor_name"),
            Out::id("purchase_order_id"),
            Out::text("bill_date").or("date"),
            Out::text("due_date"),
            Out::text("currency"),
            Out::text("status"),
            Out::text("reference"),
            Out::text("notes"),
            Out::money("subtotal"),
            Out::money("tax_amount"),
            Out::money("total_amount").or("total"),
            Out::money("amount_paid"),
            Out::money("amount_due"),
            Out::list("items", invoice_line_output()).or("lineItems"),
            Out::id("approved_by"),
            Out::text("approved_at"),
        ])
        .action("approve", vec![In::text("comments")], &[])
}

fn vendor_payment() -> ResourceDescriptor {
    finance("VendorPayment", "VendorPayment")
        .describe("Payments made to vendors")
        .input(payment_input("vendor_id"))
        .filters(vec![In::id("vendor_id"), In::date("from_date"), In::date("to_date")])
        .require(Operation::Create, &["vendor_id", "payment_date", "amount"])
        .output(payment_output("vendor_id"))
        .default_from(organization_default())
}

fn budget() -> ResourceDescriptor {
    finance("Budget", "Budget")
        .describe("Budgets per fiscal year")
        .input(vec![
            In::text("name"),
            In::id("fiscal_year_id"),
            In::id("cost_center_id"),
            In::date("start_date"),
            In::date("end_date"),
            In::money("total_amount"),
            In::text("currency").default_value("USD"),
            In::text("notes"),
        ])
        .filters(vec![In::id("fiscal_year_id"), In::text("status")])
        .require(Operation::Create, &["name", "fiscal_year_id"])
        .output(vec![
            Out::text("name"),
            Out::id("fiscal_year_id"),
            Out::id("cost_center_id"),
            Out::text("start_date"),
            Out::text("end_date"),
            Out::money("total_amount"),
            Out::money("spent_amount").or("actualAmount"),
            Out::money("remaining_amount"),
            Out::text("currency"),
            Out::text("status"),
            Out::text("notes"),
            Out::id("approved_by"),
        ])
        .action("approve", vec![In::text("comments")], &[])
}

fn budget_line() -> ResourceDescriptor {
    finance("BudgetLine", "BudgetLine")
        .describe("Per-account allocations within a budget")
        .input(vec![
            In::id("budget_id"),
            In::id("account_id"),
            In::id("accounting_period_id"),
            In::money("amount").alias("budgeted_amount"),
            In::text("notes"),
        ])
        .filters(vec![In::id("budget_id"), In::id("account_id")])
        .require(Operation::Create, &["budget_id", "account_id", "amount"])
        .output(vec![
            Out::id("budget_id"),
            Out::id("account_id"),
            Out::id("accounting_period_id"),
            Out::money("amount").or("budgetedAmount"),
            Out::money("actual_amount"),
            Out::money("variance"),
            Out::text("notes"),
        ])
}

fn fixed_asset() -> ResourceDescriptor {
    finance("FixedAsset", "FixedAsset")
        .describe("Capitalized fixed assets")
        .input(vec![
            In::text("asset_number").alias("tag"),
            In::text("name"),
            In::id("asset_category_id").alias("category_id"),
            In::date("acquisition_date").alias("purchase_date"),
            In::money("acquisition_cost").alias("cost"),
            In::money("salvage_value").alias("residual_value"),
            In::integer("useful_life_months"),
            In::text("depreciation_method").default_value("straight_line"),
            In::text("location"),
            In::text("serial_number"),
            In::id("cost_center_id"),
        ])
        .filters(vec![In::id("asset_category_id"), In::text("status"), In::text("location")])
        .require(Operation::Create, &["name", "acquisition_date", "acquisition_cost"])
        .output(vec![
            Out::text("asset_number").or("tag"),
            Out::text("name"),
            Out::id("asset_category_id").or("categoryId"),
            Out::text("acquisition_date").or("purchaseDate"),
            Out::money("acquisition_cost").or("cost"),
            Out::money("salvage_value").or("residualValue"),
            Out::integer("useful_life_months"),
            Out::text("depreciation_method"),
            Out::money("accumulated_depreciation"),
            Out::money("net_book_value").or("bookValue"),
            Out::text("location"),
            Out::text("serial_number"),
            Out::id("cost_center_id"),
            Out::text("status"),
        ])
        .action("depreciate", vec![In::date("period_end_date"), In::id("accounting_period_id")], &["period_end_date"])
}

fn asset_category() -> ResourceDescriptor {
    finance("AssetCategory", "AssetCategory")
        .plural("AssetCategories")
        .describe("Fixed asset categories and their default accounts")
        .input(vec![
            In::text("name"),
            In::text("description"),
            In::id("asset_account_id"),
            In::id("depreciation_account_id"),
            In::id("accumulated_depreciation_account_id"),
            In::text("depreciation_method").default_value("straight_line"),
            In::integer("default_useful_life_months"),
        ])
        .require(Operation::Create, &["name"])
        .output(vec![
            Out::text("name"),
            Out::text("description"),
            Out::id("asset_account_id"),
            Out::id("depreciation_account_id"),
            Out::id("accumulated_depreciation_account_id"),
            Out::text("depreciation_method"),
            Out::integer("default_useful_life_months"),
        ])
}

fn asset_depreciation() -> ResourceDescriptor {
    finance("AssetDepreciation", "AssetDepreciation")
        .describe("Depreciation postings per asset and period")
        .input(vec![
            In::id("fixed_asset_id").alias("asset_id"),
            In::id("accounting_period_id"),
            In::date("depreciation_date").alias("date"),
            In::money("amount"),
            In::id("journal_entry_id"),
        ])
        .filters(vec![In::id("fixed_asset_id").alias("asset_id"), In::id("accounting_period_id")])
        .require(Operation::Create, &["fixed_asset_id", "depreciation_date", "amount"])
        .output(vec![
            Out::id("fixed_asset_id").or("assetId"),
            Out::id("accounting_period_id"),
            Out::text("depreciation_date").or("date"),
            Out::money("amount"),
            Out::money("accumulated_amount"),
            Out::money("book_value_after"),
            Out::id("journal_entry_id"),
        ])
        .without(Operation::Update)
}

fn asset_disposal() -> ResourceDescriptor {
    finance("AssetDisposal", "AssetDisposal")
        .describe("Sale or write-off of fixed assets")
        .input(vec![
            In::id("fixed_asset_id").alias("asset_id"),
            In::date("disposal_date").alias("date"),
            In::text("disposal_method").alias("method"),
            In::money("proceeds").alias("sale_amount"),
            In::id("bank_account_id"),
            In::text("notes"),
        ])
        .filters(vec![In::id("fixed_asset_id")])
        .require(Operation::Create, &["fixed_asset_id", "disposal_date", "disposal_method"])
        .output(vec![
            Out::id("fixed_asset_id").or("assetId"),
            Out::text("disposal_date").or("date"),
            Out::text("disposal_method").or("method"),
            Out::money("proceeds").or("saleAmount"),
            Out::money("book_value"),
            Out::money("gain_loss"),
            Out::id("bank_account_id"),
            Out::id("journal_entry_id"),
            Out::text("notes"),
        ])
}

fn expense_claim() -> ResourceDescriptor {
    finance("ExpenseClaim", "ExpenseClaim")
        .describe("Employee expense claims")
        .input(vec![
            In::text("claim_number").alias("number"),
            In::id("employee_id"),
            In::date("claim_date").alias("date"),
            In::text("description"),
            In::text("currency").default_value("USD"),
            In::id("project_id"),
            In::lines(
                "items",
                vec![
                    In::id("expense_category_id").alias("category_id"),
                    In::date("expense_date"),
                    In::text("description"),
                    In::money("amount"),
                    In::text("receipt_url"),
                ],
            ),
        ])
        .filters(vec![In::id("employee_id"), In::text("status")])
        .require(Operation::Create, &["employee_id", "claim_date", "items"])
        .output(vec![
            Out::text("claim_number").or("number"),
            Out::id("employee_id"),
            Out::text("claim_date").or("date"),
            Out::text("description"),
            Out::text("currency"),
            Out::id("project_id"),
            Out::text("status"),
            Out::money("total_amount").or("total"),
            Out::money("approved_amount"),
            Out::list(
                "items",
                vec![
                    Out::id("expense_category_id").or("categoryId"),
                    Out::text("expense_date"),
                    Out::text("description"),
                    Out::money("amount"),
                    Out::text("receipt_url"),
                ],
            ),
            Out::text("submitted_at"),
            Out::id("approved_by"),
            Out::text("rejection_reason"),
        ])
        .action("submit", vec![], &[])
        .action("approve", vec![In::money("approved_amount"), In::text("comments")], &[])
        .action("reject", vec![In::text("reason")], &["reason"])
}

fn expense_category() -> ResourceDescriptor {
    finance("ExpenseCategory", "ExpenseCategory")
        .plural("ExpenseCategories")
        .describe("Expense claim categories")
        .input(vec![
            In::text("name"),
            In::text("description"),
            In::id("account_id"),
            In::money("spending_limit"),
            In::flag("requires_receipt").default_value(true),
            In::flag("is_active").default_value(true),
        ])
        .require(Operation::Create, &["name", "account_id"])
        .output(vec![
            Out::text("name"),
            Out::text("description"),
            Out::id("account_id"),
            Out::money("spending_limit"),
            Out::flag("requires_receipt", true),
            Out::flag("is_active", true),
        ])
}

fn bank_account() -> ResourceDescriptor {
    finance("BankAccount", "BankAccount")
        .describe("Bank and cash accounts")
        .input(vec![
            In::text("account_name").alias("name"),
            In::text("bank_name"),
            In::text("account_number"),
            In::text("iban"),
            In::text("swift_code").alias("bic"),
            In::id("gl_account_id").alias("account_id"),
            In::text("currency").default_value("USD"),
            In::money("opening_balance"),
            In::flag("is_active").default_value(true),
        ])
        .filters(vec![In::flag("is_active"), In::text("currency")])
        .require(Operation::Create, &["account_name", "bank_name", "account_number"])
        .output(vec![
            Out::text("account_name").or("name"),
            Out::text("bank_name"),
            Out::text("account_number"),
            Out::text("iban"),
            Out::text("swift_code").or("bic"),
            Out::id("gl_account_id").or("accountId"),
            Out::text("currency"),
            Out::money("opening_balance"),
            Out::money("current_balance").or("balance"),
            Out::flag("is_active", true),
        ])
}

fn bank_transaction() -> ResourceDescriptor {
    finance("BankTransaction", "BankTransaction")
        .describe("Imported or manual bank statement lines")
        .input(vec![
            In::id("bank_account_id"),
            In::date("transaction_date").alias("date"),
            In::text("description"),
            In::money("amount"),
            In::text("transaction_type").alias("type"),
            In::text("reference"),
            In::text("payee"),
            In::flag("is_reconciled").default_value(false),
        ])
        .filters(vec![
            In::id("bank_account_id"),
            In::flag("is_reconciled"),
            In::date("from_date"),
            In::date("to_date"),
        ])
        .require(Operation::Create, &["bank_account_id", "transaction_date", "amount"])
        .output(vec![
            Out::id("bank_account_id"),
            Out::text("transaction_date").or("date"),
            Out::text("description"),
            Out::money("amount"),
            Out::text("transaction_type").or("type"),
            Out::text("reference"),
            Out::text("payee"),
            Out::money("running_balance"),
            Out::flag("is_reconciled", false),
            Out::id("matched_document_id"),
        ])
}

fn bank_reconciliation() -> ResourceDescriptor {
    finance("BankReconciliation", "BankReconciliation")
        .describe("Statement reconciliations per bank account")
        .input(vec![
            In::id("bank_account_id"),
            In::date("statement_date"),
            In::money("statement_balance").alias("closing_balance"),
            In::money("opening_balance"),
            In::text("notes"),
        ])
        .filters(vec![In::id("bank_account_id"), In::text("status")])
        .require(Operation::Create, &["bank_account_id", "statement_date", "statement_balance"])
        .output(vec![
            Out::id("bank_account_id"),
            Out::text("statement_date"),
            Out::money("opening_balance"),
            Out::money("statement_balance").or("closingBalance"),
            Out::money("book_balance"),
            Out::money("difference"),
            Out::integer("matched_count"),
            Out::text("status"),
            Out::text("notes"),
            Out::text("completed_at"),
        ])
        .action("complete", vec![In::text("notes")], &[])
}

fn contract() -> ResourceDescriptor {
    finance("Contract", "Contract")
        .describe("Customer and vendor contracts")
        .input(vec![
            In::text("contract_number").alias("number"),
            In::text("title").alias("name"),
            In::text("party_type").default_value("customer"),
            In::id("party_id"),
            In::date("start_date"),
            In::date("end_date"),
            In::money("contract_value").alias("value"),
            In::text("currency").default_value("USD"),
            In::id("payment_term_id"),
            In::flag("auto_renew").default_value(false),
            In::text("terms"),
        ])
        .filters(vec![In::id("party_id"), In::text("status"), In::date("expiring_before")])
        .require(Operation::Create, &["title", "party_id", "start_date"])
        .output(vec![
            Out::text("contract_number").or("number"),
            Out::text("title").or("name"),
            Out::text("party_type"),
            Out::id("party_id"),
            Out::text("start_date"),
            Out::text("end_date"),
            Out::money("contract_value").or("value"),
            Out::money("billed_amount"),
            Out::text("currency"),
            Out::id("payment_term_id"),
            Out::flag("auto_renew", false),
            Out::text("status"),
            Out::text("terms"),
        ])
        .action("renew", vec![In::date("new_end_date"), In::money("contract_value")], &["new_end_date"])
}

fn currency() -> ResourceDescriptor {
    finance("Currency", "Currency")
        .plural("Currencies")
        .describe("Currency reference data")
        .input(vec![
            In::text("code"),
            In::text("name"),
            In::text("symbol"),
            In::integer("decimal_places").default_value(2),
            In::flag("is_base").default_value(false),
            In::flag("is_active").default_value(true),
        ])
        .require(Operation::Create, &["code", "name"])
        .output(vec![
            Out::text("code"),
            Out::text("name"),
            Out::text("symbol"),
            Out::integer("decimal_places"),
            Out::flag("is_base", false),
            Out::flag("is_active", true),
        ])
        .no_auth()
}

fn exchange_rate() -> ResourceDescriptor {
    finance("ExchangeRate", "ExchangeRate")
        .describe("Currency exchange rates by effective date")
        .input(vec![
            In::text("from_currency").alias("base_currency"),
            In::text("to_currency").alias("quote_currency"),
            In::money("rate"),
            In::date("effective_date").alias("date"),
            In::text("source"),
        ])
        .filters(vec![In::text("from_currency"), In::text("to_currency"), In::date("effective_date")])
        .require(Operation::Create, &["from_currency", "to_currency", "rate", "effective_date"])
        .output(vec![
            Out::text("from_currency").or("baseCurrency"),
            Out::text("to_currency").or("quoteCurrency"),
            Out::money("rate"),
            Out::text("effective_date").or("date"),
            Out::text("source"),
        ])
        .no_auth()
}

fn fiscal_year() -> ResourceDescriptor {
    finance("FiscalYear", "FiscalYear")
        .describe("Fiscal years")
        .input(vec![
            In::text("name"),
            In::date("start_date"),
            In::date("end_date"),
            In::flag("is_closed").default_value(false),
        ])
        .require(Operation::Create, &["name", "start_date", "end_date"])
        .output(vec![
            Out::text("name"),
            Out::text("start_date"),
            Out::text("end_date"),
            Out::flag("is_closed", false),
            Out::flag("is_current", false),
        ])
}

fn accounting_period() -> ResourceDescriptor {
    finance("AccountingPeriod", "AccountingPeriod")
        .describe("Accounting periods within a fiscal year")
        .input(vec![
            In::id("fiscal_year_id"),
            In::text("name"),
            In::integer("period_number"),
            In::date("start_date"),
            In::date("end_date"),
        ])
        .filters(vec![In::id("fiscal_year_id"), In::text("status")])
        .require(Operation::Create, &["fiscal_year_id", "start_date", "end_date"])
        .output(vec![
            Out::id("fiscal_year_id"),
            Out::text("name"),
            Out::integer("period_number"),
            Out::text("start_date"),
            Out::text("end_date"),
            Out::text("status"),
            Out::flag("is_closed", false),
            Out::text("closed_at"),
            Out::id("closed_by"),
        ])
        .action("close", vec![In::flag("force")], &[])
}

fn tax_rate() -> ResourceDescriptor {
    finance("TaxRate", "TaxRate")
        .describe("Tax rate reference data")
        .input(vec![
            In::text("name"),
            In::text("code"),
            In::quantity("rate").alias("percentage"),
            In::text("tax_type").alias("type"),
            In::id("tax_account_id"),
            In::flag("is_compound").default_value(false),
            In::flag("is_active").default_value(true),
        ])
        .require(Operation::Create, &["name", "rate"])
        .output(vec![
            Out::text("name"),
            Out::text("code"),
            Out::money("rate").or("percentage"),
            Out::text("tax_type").or("type"),
            Out::id("tax_account_id"),
            Out::flag("is_compound", false),
            Out::flag("is_active", true),
        ])
        .no_auth()
}

fn tax_return() -> ResourceDescriptor {
    finance("TaxReturn", "TaxReturn")
        .describe("Periodic tax returns")
        .input(vec![
            In::text("tax_type").alias("type"),
            In::date("period_start"),
            In::date("period_end"),
            In::date("due_date"),
            In::money("tax_collected").alias("output_tax"),
            In::money("tax_paid").alias("input_tax"),
            In::text("reference"),
        ])
        .filters(vec![In::text("tax_type"), In::text("status")])
        .require(Operation::Create, &["tax_type", "period_start", "period_end"])
        .output(vec![
            Out::text("tax_type").or("type"),
            Out::text("period_start"),
            Out::text("period_end"),
            Out::text("due_date"),
            Out::money("tax_collected").or("outputTax"),
            Out::money("tax_paid").or("inputTax"),
            Out::money("net_tax_payable").or("netAmount"),
            Out::text("status"),
            Out::text("filed_at"),
            Out::text("reference"),
        ])
}

fn cost_center() -> ResourceDescriptor {
    finance("CostCenter", "CostCenter")
        .describe("Cost centers for departmental reporting")
        .input(vec![
            In::text("code"),
            In::text("name"),
            In::id("parent_id"),
            In::id("manager_id"),
            In::text("description"),
            In::flag("is_active").default_value(true),
        ])
        .require(Operation::Create, &["code", "name"])
        .output(vec![
            Out::text("code"),
            Out::text("name"),
            Out::id("parent_id"),
            Out::id("manager_id"),
            Out::text("description"),
            Out::flag("is_active", true),
        ])
}

fn project() -> ResourceDescriptor {
    finance("Project", "Project")
        .describe("Projects for job costing")
        .input(vec![
            In::text("code"),
            In::text("name"),
            In::id("customer_id"),
            In::id("manager_id"),
            In::date("start_date"),
            In::date("end_date"),
            In::money("budget_amount").alias("budget"),
            In::text("billing_method").default_value("fixed_price"),
            In::text("description"),
        ])
        .filters(vec![In::id("customer_id"), In::text("status")])
        .require(Operation::Create, &["name"])
        .output(vec![
            Out::text("code"),
            Out::text("name"),
            Out::id("customer_id"),
            Out::id("manager_id"),
            Out::text("start_date"),
            Out::text("end_date"),
            Out::money("budget_amount").or("budget"),
            Out::money("actual_cost"),
            Out::money("billed_amount"),
            Out::text("billing_method"),
            Out::text("status"),
            Out::text("description"),
        ])
}

fn organization() -> ResourceDescriptor {
    finance("Organization", "Organization")
        .describe("Legal entities the books are kept for")
        .input(vec![
            In::text("name"),
            In::text("legal_name"),
            In::text("tax_id").alias("vat_number"),
            In::text("registration_number"),
            In::text("base_currency").default_value("USD"),
            In::integer("fiscal_year_start_month").default_value(1),
            In::object("address"),
            In::text("email"),
            In::text("phone"),
            In::flag("is_default").default_value(false),
        ])
        .require(Operation::Create, &["name"])
        .output(vec![
            Out::text("name"),
            Out::text("legal_name"),
            Out::text("tax_id").or("vatNumber"),
            Out::text("registration_number"),
            Out::text("base_currency"),
            Out::integer("fiscal_year_start_month"),
            Out::object(
                "address",
                vec![
                    Out::text("line1").or("street"),
                    Out::text("line2"),
                    Out::text("city"),
                    Out::text("state"),
                    Out::text("postal_code").or("zip"),
                    Out::text("country"),
                ],
            ),
            Out::text("email"),
            Out::text("phone"),
            Out::flag("is_default", false),
        ])
}

fn payment_term() -> ResourceDescriptor {
    finance("PaymentTerm", "PaymentTerm")
        .describe("Payment term reference data")
        .input(vec![
            In::text("name"),
            In::integer("due_days").alias("days"),
            In::quantity("discount_percent"),
            In::integer("discount_days"),
            In::flag("is_default").default_value(false),
        ])
        .require(Operation::Create, &["name", "due_days"])
        .output(vec![
            Out::text("name"),
            Out::integer("due_days").or("days"),
            Out::money("discount_percent"),
            Out::integer("discount_days"),
            Out::flag("is_default", false),
        ])
        .no_auth()
}

fn recurring_invoice() -> ResourceDescriptor {
    finance("RecurringInvoice", "RecurringInvoice")
        .describe("Invoice templates generated on a schedule")
        .input(vec![
            In::id("customer_id"),
            In::text("frequency").default_value("monthly"),
            In::integer("interval").default_value(1),
            In::date("start_date"),
            In::date("end_date"),
            In::id("payment_term_id"),
            In::text("currency").default_value("USD"),
            In::flag("auto_send").default_value(false),
            In::flag("is_active").default_value(true),
            In::lines("items", invoice_line_input()),
        ])
        .filters(vec![In::id("customer_id"), In::flag("is_active")])
        .require(Operation::Create, &["customer_id", "start_date", "items"])
        .output(vec![
            Out::id("customer_id"),
            Out::text("frequency"),
            Out::integer("interval"),
            Out::text("start_date"),
            Out::text("end_date"),
            Out::text("next_run_date"),
            Out::id("payment_term_id"),
            Out::text("currency"),
            Out::money("total_amount"),
            Out::integer("invoices_generated"),
            Out::flag("auto_send", false),
            Out::flag("is_active", true),
            Out::list("items", invoice_line_output()),
        ])
}

fn liability() -> ResourceDescriptor {
    finance("Liability", "Liability")
        .plural("Liabilities")
        .describe("Tracked liabilities other than loans")
        .input(vec![
            In::text("name"),
            In::text("liability_type").alias("type"),
            In::id("account_id"),
            In::money("amount"),
            In::date("due_date"),
            In::id("creditor_id"),
            In::text("description"),
        ])
        .filters(vec![In::text("liability_type"), In::text("status")])
        .require(Operation::Create, &["name", "amount"])
        .output(vec![
            Out::text("name"),
            Out::text("liability_type").or("type"),
            Out::id("account_id"),
            Out::money("amount"),
            Out::money("outstanding_amount").or("balance"),
            Out::text("due_date"),
            Out::id("creditor_id"),
            Out::text("status"),
            Out::text("description"),
        ])
}

fn loan() -> ResourceDescriptor {
    finance("Loan", "Loan")
        .describe("Loans payable and receivable")
        .input(vec![
            In::text("loan_number").alias("number"),
            In::text("lender"),
            In::text("direction").default_value("payable"),
            In::money("principal").alias("amount"),
            In::quantity("interest_rate"),
            In::date("start_date"),
            In::integer("term_months"),
            In::text("repayment_frequency").default_value("monthly"),
            In::id("account_id"),
        ])
        .filters(vec![In::text("status"), In::text("direction")])
        .require(Operation::Create, &["lender", "principal", "start_date"])
        .output(vec![
            Out::text("loan_number").or("number"),
            Out::text("lender"),
            Out::text("direction"),
            Out::money("principal").or("amount"),
            Out::money("interest_rate"),
            Out::text("start_date"),
            Out::integer("term_months"),
            Out::text("repayment_frequency"),
            Out::money("outstanding_balance").or("balance"),
            Out::money("interest_accrued"),
            Out::id("account_id"),
            Out::text("status"),
        ])
}

fn provision() -> ResourceDescriptor {
    finance("Provision", "Provision")
        .describe("Provisions for probable obligations")
        .input(vec![
            In::text("name"),
            In::text("provision_type").alias("type"),
            In::id("account_id"),
            In::money("amount"),
            In::date("recognition_date").alias("date"),
            In::text("description"),
        ])
        .require(Operation::Create, &["name", "amount"])
        .output(vec![
            Out::text("name"),
            Out::text("provision_type").or("type"),
            Out::id("account_id"),
            Out::money("amount"),
            Out::money("utilized_amount"),
            Out::text("recognition_date").or("date"),
            Out::text("status"),
            Out::text("description"),
        ])
}

fn dividend() -> ResourceDescriptor {
    finance("Dividend", "Dividend")
        .describe("Declared dividends")
        .input(vec![
            In::date("declaration_date"),
            In::date("record_date"),
            In::date("payment_date"),
            In::money("amount_per_share"),
            In::money("total_amount"),
            In::text("currency").default_value("USD"),
            In::text("notes"),
        ])
        .require(Operation::Create, &["declaration_date", "total_amount"])
        .output(vec![
            Out::text("declaration_date"),
            Out::text("record_date"),
            Out::text("payment_date"),
            Out::money("amount_per_share"),
            Out::money("total_amount"),
            Out::text("currency"),
            Out::text("status"),
            Out::text("notes"),
        ])
}

fn accrual() -> ResourceDescriptor {
    finance("Accrual", "Accrual")
        .describe("Accrued revenue and expenses")
        .input(vec![
            In::text("accrual_type").alias("type"),
            In::id("account_id"),
            In::id("offset_account_id"),
            In::money("amount"),
            In::date("accrual_date").alias("date"),
            In::date("reversal_date"),
            In::flag("auto_reverse").default_value(true),
            In::text("description"),
        ])
        .filters(vec![In::text("accrual_type"), In::text("status")])
        .require(Operation::Create, &["accrual_type", "account_id", "amount", "accrual_date"])
        .output(vec![
            Out::text("accrual_type").or("type"),
            Out::id("account_id"),
            Out::id("offset_account_id"),
            Out::money("amount"),
            Out::text("accrual_date").or("date"),
            Out::text("reversal_date"),
            Out::flag("auto_reverse", true),
            Out::text("status"),
            Out::text("description"),
            Out::id("journal_entry_id"),
        ])
}

fn prepayment() -> ResourceDescriptor {
    finance("Prepayment", "Prepayment")
        .describe("Prepaid expenses amortized over time")
        .input(vec![
            In::id("vendor_id"),
            In::id("account_id"),
            In::id("expense_account_id"),
            In::money("amount"),
            In::date("start_date"),
            In::date("end_date"),
            In::text("description"),
        ])
        .require(Operation::Create, &["amount", "start_date", "end_date"])
        .output(vec![
            Out::id("vendor_id"),
            Out::id("account_id"),
            Out::id("expense_account_id"),
            Out::money("amount"),
            Out::money("amortized_amount"),
            Out::money("remaining_amount"),
            Out::text("start_date"),
            Out::text("end_date"),
            Out::text("status"),
            Out::text("description"),
        ])
}

fn deferred_revenue() -> ResourceDescriptor {
    finance("DeferredRevenue", "DeferredRevenue")
        .describe("Revenue received in advance and recognized over time")
        .input(vec![
            In::id("customer_id"),
            In::id("invoice_id"),
            In::id("account_id"),
            In::id("revenue_account_id"),
            In::money("amount"),
            In::date("start_date"),
            In::date("end_date"),
            In::text("recognition_method").default_value("straight_line"),
        ])
        .filters(vec![In::id("customer_id"), In::text("status")])
        .require(Operation::Create, &["amount", "start_date", "end_date"])
        .output(vec![
            Out::id("customer_id"),
            Out::id("invoice_id"),
            Out::id("account_id"),
            Out::id("revenue_account_id"),
            Out::money("amount"),
            Out::money("recognized_amount"),
            Out::money("remaining_amount"),
            Out::text("start_date"),
            Out::text("end_date"),
            Out::text("recognition_method"),
            Out::text("status"),
        ])
}

fn intercompany_transaction() -> ResourceDescriptor {
    finance("IntercompanyTransaction", "IntercompanyTransaction")
        .describe("Transactions between organizations in the group")
        .input(vec![
            In::id("source_organization_id").alias("from_organization_id"),
            In::id("target_organization_id").alias("to_organization_id"),
            In::date("transaction_date").alias("date"),
            In::money("amount"),
            In::text("currency").default_value("USD"),
            In::text("transaction_type").alias("type"),
            In::text("description"),
        ])
        .filters(vec![In::id("source_organization_id"), In::id("target_organization_id"), In::text("status")])
        .require(
            Operation::Create,
            &["source_organization_id", "target_organization_id", "amount"],
        )
        .output(vec![
            Out::id("source_organization_id").or("fromOrganizationId"),
            Out::id("target_organization_id").or("toOrganizationId"),
            Out::text("transaction_date").or("date"),
            Out::money("amount"),
            Out::text("currency"),
            Out::text("transaction_type").or("type"),
            Out::text("status"),
            Out::text("description"),
            Out::flag("is_eliminated", false),
        ])
}

fn cost_allocation() -> ResourceDescriptor {
    finance("CostAllocation", "CostAllocation")
        .describe("Allocation of shared costs across cost centers")
        .input(vec![
            In::text("name"),
            In::id("source_account_id"),
            In::date("allocation_date").alias("date"),
            In::money("total_amount").alias("amount"),
            In::text("allocation_basis").default_value("percentage"),
            In::lines(
                "targets",
                vec![In::id("cost_center_id"), In::quantity("percentage"), In::money("amount")],
            ),
        ])
        .require(Operation::Create, &["source_account_id", "total_amount", "targets"])
        .output(vec![
            Out::text("name"),
            Out::id("source_account_id"),
            Out::text("allocation_date").or("date"),
            Out::money("total_amount").or("amount"),
            Out::text("allocation_basis"),
            Out::text("status"),
            Out::list(
                "targets",
                vec![Out::id("cost_center_id"), Out::money("percentage"), Out::money("amount")],
            ),
        ])
}

fn petty_cash() -> ResourceDescriptor {
    finance("PettyCash", "PettyCash")
        .plural("PettyCashFunds")
        .describe("Petty cash funds and their custodians")
        .input(vec![
            In::text("name"),
            In::id("custodian_id"),
            In::id("account_id"),
            In::money("float_amount").alias("limit"),
            In::text("currency").default_value("USD"),
            In::flag("is_active").default_value(true),
        ])
        .require(Operation::Create, &["name", "float_amount"])
        .output(vec![
            Out::text("name"),
            Out::id("custodian_id"),
            Out::id("account_id"),
            Out::money("float_amount").or("limit"),
            Out::money("current_balance").or("balance"),
            Out::text("currency"),
            Out::flag("is_active", true),
        ])
}

fn cheque() -> ResourceDescriptor {
    finance("Cheque", "Cheque")
        .describe("Issued and received cheques")
        .input(vec![
            In::text("cheque_number").alias("number"),
            In::id("bank_account_id"),
            In::text("payee"),
            In::money("amount"),
            In::date("issue_date").alias("date"),
            In::date("clearing_date"),
            In::text("direction").default_value("issued"),
            In::text("memo"),
        ])
        .filters(vec![In::id("bank_account_id"), In::text("status")])
        .require(Operation::Create, &["cheque_number", "bank_account_id", "amount"])
        .output(vec![
            Out::text("cheque_number").or("number"),
            Out::id("bank_account_id"),
            Out::text("payee"),
            Out::money("amount"),
            Out::text("issue_date").or("date"),
            Out::text("clearing_date"),
            Out::text("direction"),
            Out::text("status"),
            Out::text("memo"),
        ])
}

fn payment_reminder() -> ResourceDescriptor {
    finance("PaymentReminder", "PaymentReminder")
        .describe("Dunning reminders for overdue invoices")
        .input(vec![
            In::id("invoice_id"),
            In::id("customer_id"),
            In::integer("reminder_level").default_value(1),
            In::date("scheduled_date").alias("send_date"),
            In::text("channel").default_value("email"),
            In::text("message"),
        ])
        .filters(vec![In::id("invoice_id"), In::id("customer_id"), In::text("status")])
        .require(Operation::Create, &["invoice_id"])
        .output(vec![
            Out::id("invoice_id"),
            Out::id("customer_id"),
            Out::integer("reminder_level"),
            Out::text("scheduled_date").or("sendDate"),
            Out::text("sent_at"),
            Out::text("channel"),
            Out::text("status"),
            Out::money("amount_due"),
            Out::text("message"),
        ])
}

fn general_ledger() -> ResourceDescriptor {
    finance("GeneralLedger", "GeneralLedgerEntry")
        .plural("GeneralLedgerEntries")
        .describe("Posted ledger lines (read-only)")
        .filters(vec![
            In::id("account_id"),
            In::date("from_date").alias("start_date"),
            In::date("to_date").alias("end_date"),
            In::id("cost_center_id"),
            In::id("project_id"),
        ])
        .output(vec![
            Out::text("entry_date").or("date"),
            Out::id("journal_entry_id"),
            Out::text("entry_number"),
            Out::id("account_id"),
            Out::text("account_code"),
            Out::text("account_name"),
            Out::text("description"),
            Out::money("debit"),
            Out::money("credit"),
            Out::money("running_balance").or("balance"),
        ])
        .list_keys(&["entries", "generalLedger"])
        .read_only()
}

fn trial_balance() -> ResourceDescriptor {
    finance("TrialBalance", "TrialBalance")
        .describe("Trial balance report rows per account (read-only)")
        .filters(vec![
            In::date("as_of_date").alias("date"),
            In::id("accounting_period_id"),
            In::flag("include_zero_balances"),
        ])
        .report_output(vec![
            Out::id("account_id"),
            Out::text("account_code"),
            Out::text("account_name"),
            Out::text("account_type"),
            Out::money("opening_balance"),
            Out::money("debit").or("totalDebit"),
            Out::money("credit").or("totalCredit"),
            Out::money("closing_balance").or("balance"),
        ])
        .list_keys(&["rows", "accounts", "trialBalance"])
        .method(Operation::List, "GetTrialBalance")
        .report()
}
