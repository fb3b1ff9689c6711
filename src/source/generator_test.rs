use super::*;
use crate::table::RowId;
use serde_json::Value;

fn make_generator() -> MockDataGenerator {
    MockDataGenerator::seeded(42).with_today(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
}

#[test]
fn payments_have_sequential_ids_from_1000() {
    let rows = make_generator().payments(PAYMENT_COUNT);

    assert_eq!(rows.len(), 50);
    assert_eq!(rows[0].id(), Some(RowId::Int(1000)));
    assert_eq!(rows[49].id(), Some(RowId::Int(1049)));
    assert_eq!(rows[2].cell_text("customer"), "Customer 3");
}

#[test]
fn payment_fields_are_within_ranges() {
    let start = first_day();
    let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

    for row in make_generator().payments(PAYMENT_COUNT) {
        let amount = row.get("amount").and_then(Value::as_f64).unwrap();
        assert!((10.0..5010.0).contains(&amount));
        assert_eq!((amount * 100.0).round() / 100.0, amount);

        assert!(PAYMENT_METHODS.contains(&row.cell_text("method").as_str()));
        assert!(PAYMENT_STATUSES.contains(&row.cell_text("status").as_str()));
        assert!(row.cell_text("reference").starts_with("PAY-"));

        let date = NaiveDate::parse_from_str(&row.cell_text("date"), "%Y-%m-%d").unwrap();
        assert!(date >= start && date <= today);
    }
}

#[test]
fn chargebacks_have_sequential_ids_from_5000() {
    let rows = make_generator().chargebacks(CHARGEBACK_COUNT);

    assert_eq!(rows.len(), 35);
    assert_eq!(rows[0].id(), Some(RowId::Int(5000)));
    for row in &rows {
        assert!(row.cell_text("originalPayment").starts_with("PAY-"));
        assert!(CHARGEBACK_REASONS.contains(&row.cell_text("reason").as_str()));
        assert!(CHARGEBACK_OUTCOMES.contains(&row.cell_text("outcome").as_str()));
        let amount = row.get("amount").and_then(Value::as_f64).unwrap();
        assert!((5.0..2005.0).contains(&amount));
    }
}

#[test]
fn dashboard_uses_category_labels_in_order() {
    let segments = make_generator().dashboard(DASHBOARD_COUNT);

    assert_eq!(segments.len(), 30);
    assert_eq!(segments[0].label, "Electronics");
    assert_eq!(segments[29].label, "Energy");
    assert!(segments.iter().all(|s| (100..1100).contains(&s.value)));
}

#[test]
fn dashboard_count_is_capped_by_categories() {
    assert_eq!(make_generator().dashboard(100).len(), CATEGORIES.len());
}

#[test]
fn returns_form_two_level_tree() {
    let nodes = make_generator().returns();

    assert_eq!(nodes.len(), RETURN_COUNT);
    for (i, node) in nodes.iter().enumerate() {
        let parent_id = format!("RET-{}", 2000 + i);
        assert_eq!(node.data.cell_text("id"), parent_id);
        assert!((1..=3).contains(&node.children.len()));

        for (j, child) in node.children.iter().enumerate() {
            assert_eq!(child.data.cell_text("id"), format!("ITEM-{}-{}", 2000 + i, j));
            assert!(child.children.is_empty());
            assert!(REFUND_METHODS.contains(&child.data.cell_text("refundMethod").as_str()));
        }
    }
}

#[test]
fn same_seed_reproduces_data() {
    let a = make_generator().dashboard(DASHBOARD_COUNT);
    let b = make_generator().dashboard(DASHBOARD_COUNT);
    assert_eq!(a, b);
}
