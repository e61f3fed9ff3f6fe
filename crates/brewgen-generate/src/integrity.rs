use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::customer::CUSTOMER_COUNT;
use crate::model::Dataset;
use crate::order::{REVENUE_THRESHOLD, settle_order};

/// One broken dataset invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityViolation {
    pub code: String,
    pub message: String,
}

/// Outcome of checking a generated dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub violations: Vec<IntegrityViolation>,
    pub violations_by_code: BTreeMap<String, u64>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Short description listing the first few violations.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .violations
            .iter()
            .take(5)
            .map(|violation| format!("{}: {}", violation.code, violation.message))
            .collect();
        if self.violations.len() > 5 {
            parts.push(format!("... {} more", self.violations.len() - 5));
        }
        parts.join("; ")
    }

    fn record(&mut self, code: &str, message: String) {
        *self.violations_by_code.entry(code.to_string()).or_insert(0) += 1;
        self.violations.push(IntegrityViolation {
            code: code.to_string(),
            message,
        });
    }
}

/// Verify identifier sequencing, referential integrity, and order arithmetic.
pub fn check_dataset(dataset: &Dataset) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    check_order_ids(dataset, &mut report);
    check_drinks(dataset, &mut report);
    check_order_totals(dataset, &mut report);
    check_revenue(dataset, &mut report);
    check_customers(dataset, &mut report);
    report
}

fn check_order_ids(dataset: &Dataset, report: &mut IntegrityReport) {
    for (expected, order) in (1_u32..).zip(&dataset.orders) {
        if order.id != expected {
            report.record(
                "order_id_sequence",
                format!("expected order id {expected}, found {}", order.id),
            );
            return;
        }
    }
}

fn check_drinks(dataset: &Dataset, report: &mut IntegrityReport) {
    let order_count = dataset.orders.len() as u64;
    for (expected, drink) in (1_u32..).zip(&dataset.drinks) {
        if drink.id != expected {
            report.record(
                "drink_id_sequence",
                format!("expected drink id {expected}, found {}", drink.id),
            );
            return;
        }
        if drink.order_id == 0 || u64::from(drink.order_id) > order_count {
            report.record(
                "drink_orphaned",
                format!("drink {} references unknown order {}", drink.id, drink.order_id),
            );
        }
        if drink.topping2_id.is_some() && drink.topping1_id.is_none() {
            report.record(
                "topping_order",
                format!("drink {} has a second topping without a first", drink.id),
            );
        }
    }
}

fn check_order_totals(dataset: &Dataset, report: &mut IntegrityReport) {
    let mut subtotals: HashMap<u32, f64> = HashMap::new();
    for drink in &dataset.drinks {
        *subtotals.entry(drink.order_id).or_insert(0.0) += drink.contribution();
    }

    for order in &dataset.orders {
        let Some(drinks_price) = subtotals.get(&order.id).copied() else {
            report.record("order_empty", format!("order {} has no drinks", order.id));
            continue;
        };
        let expected = settle_order(drinks_price, order.tips);
        if expected.sales_tax != order.sales_tax || expected.total_price != order.total_price {
            report.record(
                "order_totals",
                format!(
                    "order {} expected tax {:.2} total {:.2}, found tax {:.2} total {:.2}",
                    order.id,
                    expected.sales_tax,
                    expected.total_price,
                    order.sales_tax,
                    order.total_price
                ),
            );
        }
    }
}

fn check_revenue(dataset: &Dataset, report: &mut IntegrityReport) {
    let Some((last, earlier)) = dataset.orders.split_last() else {
        report.record("revenue_threshold", "dataset has no orders".to_string());
        return;
    };
    let before_last = earlier.iter().fold(0.0, |sum, order| sum + order.total_price);
    let revenue = before_last + last.total_price;

    if revenue < REVENUE_THRESHOLD {
        report.record(
            "revenue_threshold",
            format!("revenue {revenue:.2} never reached {REVENUE_THRESHOLD:.2}"),
        );
    }
    if before_last >= REVENUE_THRESHOLD {
        report.record(
            "revenue_overrun",
            format!("revenue {before_last:.2} crossed the threshold before the last order"),
        );
    }
}

fn check_customers(dataset: &Dataset, report: &mut IntegrityReport) {
    if dataset.customers.len() != CUSTOMER_COUNT as usize {
        report.record(
            "customer_count",
            format!(
                "expected {CUSTOMER_COUNT} customers, found {}",
                dataset.customers.len()
            ),
        );
    }
    for (expected, customer) in (1_u32..).zip(&dataset.customers) {
        if customer.id != expected {
            report.record(
                "customer_id_sequence",
                format!("expected customer id {expected}, found {}", customer.id),
            );
            return;
        }
    }
}
