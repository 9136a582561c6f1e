//! Account code classifier
//!
//! Maps an object/account code to an [`AccountCategory`] using a fixed,
//! ordered rule table. The first matching rule wins. Several exact-value
//! rules sit inside the 9500-9699 band and must stay ahead of the residual
//! "Other Liabilities" range, so the table is evaluated strictly in order.

use crate::models::AccountCategory;

/// Condition half of a classification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRule {
    /// Inclusive range
    Range(i64, i64),
    /// Union of two inclusive ranges
    EitherRange((i64, i64), (i64, i64)),
    /// Single code
    Exact(i64),
}

impl CodeRule {
    /// Check whether a code satisfies this rule
    pub const fn matches(&self, code: i64) -> bool {
        match *self {
            CodeRule::Range(lo, hi) => lo <= code && code <= hi,
            CodeRule::EitherRange((a_lo, a_hi), (b_lo, b_hi)) => {
                (a_lo <= code && code <= a_hi) || (b_lo <= code && code <= b_hi)
            }
            CodeRule::Exact(value) => code == value,
        }
    }

    /// Human-readable form for the taxonomy listing
    pub fn describe(&self) -> String {
        match self {
            CodeRule::Range(lo, hi) => format!("{}-{}", lo, hi),
            CodeRule::EitherRange((a_lo, a_hi), (b_lo, b_hi)) => {
                format!("{}-{}, {}-{}", a_lo, a_hi, b_lo, b_hi)
            }
            CodeRule::Exact(value) => value.to_string(),
        }
    }
}

const RULES: [(CodeRule, AccountCategory); 15] = [
    (CodeRule::Range(1000, 7999), AccountCategory::Expenditures),
    (CodeRule::Range(8000, 8999), AccountCategory::Revenues),
    (CodeRule::Range(9000, 9199), AccountCategory::Cash),
    (CodeRule::Range(9200, 9299), AccountCategory::AccountsReceivable),
    (CodeRule::Exact(9330), AccountCategory::PrepaidExpenses),
    (
        CodeRule::EitherRange((9300, 9329), (9331, 9399)),
        AccountCategory::OtherCurrentAssets,
    ),
    (CodeRule::Range(9400, 9499), AccountCategory::FixedAssets),
    (CodeRule::Range(9500, 9501), AccountCategory::AccountsPayable),
    (CodeRule::Range(9502, 9599), AccountCategory::AccruedLiabilities),
    (CodeRule::Exact(9665), AccountCategory::CompAbsences),
    (CodeRule::Exact(9610), AccountCategory::IntercompanyPayables),
    (CodeRule::Exact(9650), AccountCategory::DeferredUnearnedRevenue),
    (CodeRule::Exact(9640), AccountCategory::CurrentLoans),
    (CodeRule::Range(9500, 9699), AccountCategory::OtherLiabilities),
    (CodeRule::Range(9700, 9799), AccountCategory::FundBalance),
];

/// The ordered rule table; codes matching none of these are `Other`
pub fn rules() -> &'static [(CodeRule, AccountCategory)] {
    &RULES
}

/// Classify an already-parsed integer code
pub fn categorize_code(code: i64) -> AccountCategory {
    RULES
        .iter()
        .find(|(rule, _)| rule.matches(code))
        .map(|(_, category)| *category)
        .unwrap_or(AccountCategory::Other)
}

/// Classify raw code text
///
/// Text that cannot be read as an integer yields `Unknown`; this is a
/// terminal category, never an error.
///
/// # Examples
/// ```
/// use fundsheet::models::AccountCategory;
/// use fundsheet::services::classifier::categorize;
///
/// assert_eq!(categorize("9640"), AccountCategory::CurrentLoans);
/// assert_eq!(categorize("ABC"), AccountCategory::Unknown);
/// assert_eq!(categorize("99999"), AccountCategory::Other);
/// ```
pub fn categorize(raw: &str) -> AccountCategory {
    match parse_code(raw) {
        Some(code) => categorize_code(code),
        None => AccountCategory::Unknown,
    }
}

/// Read code text as an integer
///
/// Spreadsheets often store codes as floats ("9000.0"), so finite float text
/// is accepted and truncated toward zero.
pub fn parse_code(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(code) = trimmed.parse::<i64>() {
        return Some(code);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.abs() < i64::MAX as f64 => {
            Some(value.trunc() as i64)
        }
        _ => None,
    }
}
