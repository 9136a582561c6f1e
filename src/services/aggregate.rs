//! Aggregation of classified records
//!
//! Groups records by category and derives the balance-sheet and
//! income-statement summaries. Everything here is a pure fold over the
//! ingested rows; an unbalanced sheet or an empty income statement is a
//! reportable fact, never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{AccountCategory, CategorizedRecord, Money, StatementSection};

/// Labels the income statement selects by default
///
/// These are singular while the classifier emits "Revenues" and
/// "Expenditures", so by default the income statement comes out empty.
/// Kept as-is until the intended labels are confirmed; override through
/// `income_statement_labels` in the settings file.
pub const DEFAULT_INCOME_STATEMENT_LABELS: [&str; 2] = ["Revenue", "Expenditure"];

/// Summed amount for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: AccountCategory,
    pub amount: Money,
    /// Number of rows that contributed
    pub rows: usize,
}

/// Per-category totals, one entry per category present in the data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    totals: BTreeMap<AccountCategory, CategoryTotal>,
}

impl CategoryTotals {
    /// Fold records into totals
    pub fn from_records(records: &[CategorizedRecord]) -> Self {
        let mut totals: BTreeMap<AccountCategory, CategoryTotal> = BTreeMap::new();
        for record in records {
            let entry = totals.entry(record.category).or_insert(CategoryTotal {
                category: record.category,
                amount: Money::zero(),
                rows: 0,
            });
            entry.amount += record.amount;
            entry.rows += 1;
        }
        Self { totals }
    }

    /// Total for a category, if any row landed in it
    pub fn get(&self, category: AccountCategory) -> Option<Money> {
        self.totals.get(&category).map(|t| t.amount)
    }

    /// Totals in classification rule order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.totals.values()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Sum over every category
    pub fn grand_total(&self) -> Money {
        self.iter().map(|t| t.amount).sum()
    }

    /// Sum over the given categories; absent categories count as zero
    pub fn sum_of(&self, categories: &[AccountCategory]) -> Money {
        categories.iter().filter_map(|c| self.get(*c)).sum()
    }

    /// Whether any row reports under the given statement section
    pub fn has_section(&self, section: StatementSection) -> bool {
        self.iter().any(|t| t.category.section() == section)
    }
}

/// Balance sheet (statement of net position) figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetSummary {
    /// Asset, liability, and fund-balance totals present in the data
    pub lines: Vec<CategoryTotal>,
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub fund_balance: Money,
    /// total_liabilities + fund_balance, checked against total_assets
    pub liabilities_and_fund_balance: Money,
    pub is_balanced: bool,
}

impl BalanceSheetSummary {
    /// Derive the balance sheet from category totals
    pub fn from_totals(totals: &CategoryTotals) -> Self {
        let lines: Vec<CategoryTotal> = totals
            .iter()
            .filter(|t| t.category.is_balance_sheet())
            .copied()
            .collect();

        let total_assets = totals.sum_of(&AccountCategory::ASSETS);
        let total_liabilities = totals.sum_of(&AccountCategory::LIABILITIES);
        let fund_balance = totals.sum_of(&[AccountCategory::FundBalance]);
        let liabilities_and_fund_balance = total_liabilities + fund_balance;

        Self {
            lines,
            total_assets,
            total_liabilities,
            fund_balance,
            liabilities_and_fund_balance,
            is_balanced: total_assets == liabilities_and_fund_balance,
        }
    }

    /// total_assets - (total_liabilities + fund_balance)
    pub fn imbalance(&self) -> Money {
        self.total_assets - self.liabilities_and_fund_balance
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Income statement figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementSummary {
    /// Category labels the statement selected on
    pub labels: Vec<String>,
    pub lines: Vec<CategoryTotal>,
}

impl IncomeStatementSummary {
    /// Restrict totals to categories whose label is in `labels` (exact match)
    pub fn from_totals(totals: &CategoryTotals, labels: &[String]) -> Self {
        let lines = totals
            .iter()
            .filter(|t| labels.iter().any(|l| l == t.category.label()))
            .copied()
            .collect();

        Self {
            labels: labels.to_vec(),
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.amount).sum()
    }
}

/// Everything the report assembler needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregates {
    pub totals: CategoryTotals,
    pub balance_sheet: BalanceSheetSummary,
    pub income_statement: IncomeStatementSummary,
}

/// Groups records and derives the statement summaries
#[derive(Debug, Clone)]
pub struct Aggregator {
    income_labels: Vec<String>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(
            DEFAULT_INCOME_STATEMENT_LABELS
                .iter()
                .map(|l| l.to_string())
                .collect(),
        )
    }
}

impl Aggregator {
    /// Create an aggregator selecting the given income-statement labels
    pub fn new(income_labels: Vec<String>) -> Self {
        Self { income_labels }
    }

    pub fn income_labels(&self) -> &[String] {
        &self.income_labels
    }

    /// Aggregate classified records
    pub fn aggregate(&self, records: &[CategorizedRecord]) -> Aggregates {
        let totals = CategoryTotals::from_records(records);
        let balance_sheet = BalanceSheetSummary::from_totals(&totals);
        let income_statement = IncomeStatementSummary::from_totals(&totals, &self.income_labels);

        debug!(
            categories = totals.len(),
            total_assets = balance_sheet.total_assets.cents(),
            "Aggregated category totals"
        );

        if !balance_sheet.is_empty() && !balance_sheet.is_balanced {
            warn!(
                total_assets = %balance_sheet.total_assets,
                liabilities_and_fund_balance = %balance_sheet.liabilities_and_fund_balance,
                "Balance sheet does not balance"
            );
        }

        let has_income_rows = totals.has_section(StatementSection::Revenue)
            || totals.has_section(StatementSection::Expenditure);
        if income_statement.is_empty() && has_income_rows {
            warn!(
                labels = ?self.income_labels,
                "Revenue/expenditure rows exist but none match the income statement labels"
            );
        }

        Aggregates {
            totals,
            balance_sheet,
            income_statement,
        }
    }
}

/// Aggregate with the default income-statement labels
pub fn aggregate(records: &[CategorizedRecord]) -> Aggregates {
    Aggregator::default().aggregate(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ingest::ingest;

    fn scenario_csv() -> &'static str {
        "Object,Debit,Credit\n\
         9000,100,0\n\
         9201,50,0\n\
         9330,30,0\n\
         9501,0,20\n\
         9640,0,10\n\
         9665,0,5\n\
         9720,0,200\n"
    }

    #[test]
    fn test_balance_sheet_scenario() {
        let table = ingest(scenario_csv().as_bytes()).unwrap();
        let categories: Vec<_> = table.records.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                AccountCategory::Cash,
                AccountCategory::AccountsReceivable,
                AccountCategory::PrepaidExpenses,
                AccountCategory::AccountsPayable,
                AccountCategory::CurrentLoans,
                AccountCategory::CompAbsences,
                AccountCategory::FundBalance,
            ]
        );

        let aggregates = aggregate(&table.records);
        let sheet = &aggregates.balance_sheet;
        assert_eq!(sheet.total_assets, Money::from_units(180));
        assert_eq!(sheet.total_liabilities, Money::from_units(-35));
        assert_eq!(sheet.fund_balance, Money::from_units(-200));
        assert_eq!(sheet.liabilities_and_fund_balance, Money::from_units(-235));
        assert!(!sheet.is_balanced);
        assert_eq!(sheet.imbalance(), Money::from_units(415));
        assert_eq!(sheet.lines.len(), 7);
    }

    #[test]
    fn test_totals_match_row_sum() {
        let csv_data = "Object,Debit,Credit\n\
                        1000,10.25,0\n\
                        1500,4.75,1\n\
                        8000,0,30\n\
                        9000,12,0\n\
                        XYZ,3,0\n\
                        42,0,7.5\n\
                        9000,1,1\n";
        let table = ingest(csv_data.as_bytes()).unwrap();
        let aggregates = aggregate(&table.records);

        assert_eq!(aggregates.totals.grand_total(), table.total_amount());
        let row_count: usize = aggregates.totals.iter().map(|t| t.rows).sum();
        assert_eq!(row_count, table.len());
        assert_eq!(
            aggregates.totals.get(AccountCategory::Expenditures),
            Some(Money::from_cents(1400))
        );
        assert_eq!(
            aggregates.totals.get(AccountCategory::Cash),
            Some(Money::from_units(12))
        );
    }

    #[test]
    fn test_totals_iterate_in_rule_order() {
        let table = ingest("Object,Debit\n9720,1\nXYZ,1\n9000,1\n1000,1\n".as_bytes()).unwrap();
        let aggregates = aggregate(&table.records);
        let order: Vec<_> = aggregates.totals.iter().map(|t| t.category).collect();
        assert_eq!(
            order,
            vec![
                AccountCategory::Expenditures,
                AccountCategory::Cash,
                AccountCategory::FundBalance,
                AccountCategory::Unknown,
            ]
        );
    }

    #[test]
    fn test_balanced_sheet() {
        let csv_data = "Object,Debit,Credit\n9000,500,0\n9500,300,0\n9700,200,0\n";
        let table = ingest(csv_data.as_bytes()).unwrap();
        let sheet = aggregate(&table.records).balance_sheet;
        assert!(sheet.is_balanced);
        assert!(sheet.imbalance().is_zero());
    }

    #[test]
    fn test_empty_input_aggregates() {
        let table = ingest("Object,Debit,Credit\n".as_bytes()).unwrap();
        let aggregates = aggregate(&table.records);

        assert!(aggregates.totals.is_empty());
        assert!(aggregates.balance_sheet.is_empty());
        assert!(aggregates.balance_sheet.total_assets.is_zero());
        assert!(aggregates.income_statement.is_empty());
    }

    #[test]
    fn test_default_income_labels_select_nothing_from_classifier_output() {
        // Classifier emits plural labels; the default filter uses singular ones
        let csv_data = "Object,Debit,Credit\n1000,100,0\n8000,0,250\n";
        let table = ingest(csv_data.as_bytes()).unwrap();
        let aggregates = aggregate(&table.records);

        assert_eq!(aggregates.totals.len(), 2);
        assert!(aggregates.income_statement.is_empty());
        assert_eq!(
            aggregates.income_statement.labels,
            vec!["Revenue".to_string(), "Expenditure".to_string()]
        );
    }

    #[test]
    fn test_configured_income_labels() {
        let csv_data = "Object,Debit,Credit\n1000,100,0\n8000,0,250\n9000,5,0\n";
        let table = ingest(csv_data.as_bytes()).unwrap();
        let aggregator = Aggregator::new(vec!["Revenues".into(), "Expenditures".into()]);
        let income = aggregator.aggregate(&table.records).income_statement;

        assert_eq!(income.lines.len(), 2);
        assert_eq!(income.lines[0].category, AccountCategory::Expenditures);
        assert_eq!(income.lines[0].amount, Money::from_units(100));
        assert_eq!(income.lines[1].category, AccountCategory::Revenues);
        assert_eq!(income.lines[1].amount, Money::from_units(-250));
        assert_eq!(income.total(), Money::from_units(-150));
    }

    #[test]
    fn test_unclassified_rows_stay_off_the_balance_sheet() {
        let table = ingest("Object,Debit\nABC,10\n99999,20\n".as_bytes()).unwrap();
        let aggregates = aggregate(&table.records);
        assert!(aggregates.balance_sheet.is_empty());
        assert_eq!(aggregates.totals.grand_total(), Money::from_units(30));
    }
}
