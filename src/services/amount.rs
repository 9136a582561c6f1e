//! Row amount calculation

use crate::models::{Money, Record};

/// Signed amount for one row: debit minus credit, absent sides count as zero
pub fn calculate_amount(debit: Option<Money>, credit: Option<Money>) -> Money {
    debit.unwrap_or_default() - credit.unwrap_or_default()
}

/// Signed amount for a record
pub fn record_amount(record: &Record) -> Money {
    calculate_amount(record.debit, record.credit)
}
