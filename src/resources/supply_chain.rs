//! Supply-chain backend resource families.

use crate::backend::BackendKind;
use crate::normalize::InputField as In;
use crate::shape::OutputField as Out;

use super::{Operation, ResourceDescriptor};

pub fn descriptors() -> Vec<ResourceDescriptor> {
    vec![vendor(), purchase_order(), goods_receipt(), inventory_item()]
}

fn supply(family: &'static str, entity: &'static str) -> ResourceDescriptor {
    ResourceDescriptor::new(family, entity, BackendKind::SupplyChain)
}

fn vendor() -> ResourceDescriptor {
    supply("Vendor", "Vendor")
        .describe("Vendors (suppliers)")
        .input(vec![
            In::text("vendor_code").alias("code"),
            In::text("name").alias("vendor_name"),
            In::text("contact_name"),
            In::text("email"),
            In::text("phone"),
            In::text("tax_id"),
            In::id("payment_term_id"),
            In::text("currency").default_value("USD"),
            In::object("address"),
            In::flag("is_active").default_value(true),
        ])
        .filters(vec![In::flag("is_active"), In::text("search")])
        .require(Operation::Create, &["name"])
        .output(vec![
            Out::text("vendor_code").or("code"),
            Out::text("name").or("vendorName"),
            Out::text("contact_name"),
            Out::text("email"),
            Out::text("phone"),
            Out::text("tax_id"),
            Out::id("payment_term_id"),
            Out::text("currency"),
            Out::money("outstanding_balance").or("balance"),
            Out::object(
                "address",
                vec![
                    Out::text("line1").or("street"),
                    Out::text("city"),
                    Out::text("postal_code").or("zip"),
                    Out::text("country"),
                ],
            ),
            Out::flag("is_active", true),
        ])
        .list_keys(&["suppliers"])
}

fn order_line_input() -> Vec<In> {
    vec![
        In::id("inventory_item_id").alias("item_id"),
        In::text("description"),
        In::quantity("quantity"),
        In::money("unit_price").alias("price"),
        In::id("tax_rate_id"),
    ]
}

fn order_line_output() -> Vec<Out> {
    vec![
        Out::id("inventory_item_id").or("itemId"),
        Out::text("description"),
        Out::money("quantity"),
        Out::money("quantity_received"),
        Out::money("unit_price").or("price"),
        Out::money("line_total").or("amount"),
    ]
}

fn purchase_order() -> ResourceDescriptor {
    supply("PurchaseOrder", "PurchaseOrder")
        .describe("Purchase orders issued to vendors")
        .input(vec![
            In::text("po_number").alias("number").alias("order_number"),
            In::id("vendor_id"),
            In::date("order_date").alias("date"),
            In::date("expected_date").alias("delivery_date"),
            In::text("currency").default_value("USD"),
            In::text("shipping_address"),
            In::text("notes"),
            In::lines("items", order_line_input()).alias("lines"),
        ])
        .filters(vec![In::id("vendor_id"), In::text("status"), In::date("from_date"), In::date("to_date")])
        .require(Operation::Create, &["vendor_id", "order_date", "items"])
        .output(vec![
            Out::text("po_number").or("number").or("orderNumber"),
            Out::id("vendor_id"),
            Out::text("vendor_name"),
            Out::text("order_date").or("date"),
            Out::text("expected_date").or("deliveryDate"),
            Out::text("currency"),
            Out::text("status"),
            Out::text("shipping_address"),
            Out::text("notes"),
            Out::money("subtotal"),
            Out::money("tax_amount"),
            Out::money("total_amount").or("total"),
            Out::list("items", order_line_output()).or("lines"),
            Out::id("approved_by"),
        ])
        .action("approve", vec![In::text("comments")], &[])
}

fn goods_receipt() -> ResourceDescriptor {
    supply("GoodsReceipt", "GoodsReceipt")
        .describe("Goods received against purchase orders")
        .input(vec![
            In::text("receipt_number").alias("number"),
            In::id("purchase_order_id"),
            In::date("receipt_date").alias("date"),
            In::id("warehouse_id"),
            In::text("notes"),
            In::lines(
                "items",
                vec![
                    In::id("inventory_item_id").alias("item_id"),
                    In::quantity("quantity_received").alias("quantity"),
                    In::quantity("quantity_rejected"),
                ],
            ),
        ])
        .filters(vec![In::id("purchase_order_id"), In::date("from_date"), In::date("to_date")])
        .require(Operation::Create, &["purchase_order_id", "receipt_date", "items"])
        .output(vec![
            Out::text("receipt_number").or("number"),
            Out::id("purchase_order_id"),
            Out::text("receipt_date").or("date"),
            Out::id("warehouse_id"),
            Out::text("status"),
            Out::text("notes"),
            Out::list(
                "items",
                vec![
                    Out::id("inventory_item_id").or("itemId"),
                    Out::money("quantity_received").or("quantity"),
                    Out::money("quantity_rejected"),
                ],
            ),
        ])
}

fn inventory_item() -> ResourceDescriptor {
    supply("InventoryItem", "InventoryItem")
        .describe("Stock-keeping items")
        .input(vec![
            In::text("sku"),
            In::text("name"),
            In::text("description"),
            In::text("unit_of_measure").alias("uom").default_value("each"),
            In::money("unit_cost").alias("cost"),
            In::money("sale_price").alias("price"),
            In::quantity("reorder_level"),
            In::id("inventory_account_id"),
            In::flag("is_tracked").default_value(true),
            In::flag("is_active").default_value(true),
        ])
        .filters(vec![In::text("sku"), In::flag("is_active"), In::flag("below_reorder_level")])
        .require(Operation::Create, &["sku", "name"])
        .output(vec![
            Out::text("sku"),
            Out::text("name"),
            Out::text("description"),
            Out::text("unit_of_measure").or("uom"),
            Out::money("unit_cost").or("cost"),
            Out::money("sale_price").or("price"),
            Out::money("quantity_on_hand").or("stock"),
            Out::money("reorder_level"),
            Out::id("inventory_account_id"),
            Out::flag("is_tracked", true),
            Out::flag("is_active", true),
        ])
        .list_keys(&["items"])
}
