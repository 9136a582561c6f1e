//! Classification commands
//!
//! `classify` looks up individual codes; `codes` prints the rule table in
//! evaluation order.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::FundsheetResult;
use crate::models::AccountCategory;
use crate::services::classifier::{categorize, rules};

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "#")]
    priority: usize,
    #[tabled(rename = "Codes")]
    codes: String,
    #[tabled(rename = "Account Category")]
    category: String,
    #[tabled(rename = "Section")]
    section: &'static str,
}

/// Format the rule table, first match wins
pub fn format_rule_table() -> String {
    let mut rows: Vec<RuleRow> = rules()
        .iter()
        .enumerate()
        .map(|(i, (rule, category))| RuleRow {
            priority: i + 1,
            codes: rule.describe(),
            category: category.label().to_string(),
            section: category.section().label(),
        })
        .collect();

    for (codes, category) in [
        ("any other integer", AccountCategory::Other),
        ("not an integer", AccountCategory::Unknown),
    ] {
        rows.push(RuleRow {
            priority: rows.len() + 1,
            codes: codes.to_string(),
            category: category.label().to_string(),
            section: category.section().label(),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Handle the classify command
pub fn handle_classify_command(codes: &[String]) -> FundsheetResult<()> {
    let width = codes.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    for code in codes {
        println!("{:<width$}  {}", code, categorize(code), width = width);
    }
    Ok(())
}

/// Handle the codes command
pub fn handle_codes_command() -> FundsheetResult<()> {
    println!("{}", format_rule_table());
    Ok(())
}
