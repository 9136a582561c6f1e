//! Account category model
//!
//! The closed set of labels an account code can be classified into, and the
//! financial statement section each label reports under.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Which statement a category contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementSection {
    Asset,
    Liability,
    FundBalance,
    Revenue,
    Expenditure,
    /// Codes outside the taxonomy (`Other`) or that could not be read (`Unknown`)
    Unclassified,
}

impl StatementSection {
    pub const fn label(&self) -> &'static str {
        match self {
            StatementSection::Asset => "Asset",
            StatementSection::Liability => "Liability",
            StatementSection::FundBalance => "Fund Balance",
            StatementSection::Revenue => "Revenue",
            StatementSection::Expenditure => "Expenditure",
            StatementSection::Unclassified => "Unclassified",
        }
    }
}

/// Standardized accounting category for an account/object code
///
/// Serializes as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccountCategory {
    Expenditures,
    Revenues,
    Cash,
    AccountsReceivable,
    PrepaidExpenses,
    OtherCurrentAssets,
    FixedAssets,
    AccountsPayable,
    AccruedLiabilities,
    CompAbsences,
    IntercompanyPayables,
    DeferredUnearnedRevenue,
    CurrentLoans,
    OtherLiabilities,
    FundBalance,
    /// Parsed as an integer but matched no rule
    Other,
    /// Could not be parsed as an integer
    Unknown,
}

impl AccountCategory {
    /// Every category, in classification rule order
    pub const ALL: [AccountCategory; 17] = [
        Self::Expenditures,
        Self::Revenues,
        Self::Cash,
        Self::AccountsReceivable,
        Self::PrepaidExpenses,
        Self::OtherCurrentAssets,
        Self::FixedAssets,
        Self::AccountsPayable,
        Self::AccruedLiabilities,
        Self::CompAbsences,
        Self::IntercompanyPayables,
        Self::DeferredUnearnedRevenue,
        Self::CurrentLoans,
        Self::OtherLiabilities,
        Self::FundBalance,
        Self::Other,
        Self::Unknown,
    ];

    /// Asset categories on the balance sheet
    pub const ASSETS: [AccountCategory; 5] = [
        Self::Cash,
        Self::AccountsReceivable,
        Self::PrepaidExpenses,
        Self::OtherCurrentAssets,
        Self::FixedAssets,
    ];

    /// Liability categories on the balance sheet
    pub const LIABILITIES: [AccountCategory; 7] = [
        Self::AccountsPayable,
        Self::AccruedLiabilities,
        Self::CompAbsences,
        Self::IntercompanyPayables,
        Self::DeferredUnearnedRevenue,
        Self::CurrentLoans,
        Self::OtherLiabilities,
    ];

    /// Display label, exactly as it appears in reports
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Expenditures => "Expenditures",
            Self::Revenues => "Revenues",
            Self::Cash => "Cash",
            Self::AccountsReceivable => "Accounts Receivable",
            Self::PrepaidExpenses => "Prepaid Expenses",
            Self::OtherCurrentAssets => "Other Current Assets",
            Self::FixedAssets => "Fixed Assets",
            Self::AccountsPayable => "Accounts Payable",
            Self::AccruedLiabilities => "Accrued Liabilities",
            Self::CompAbsences => "Comp Absences",
            Self::IntercompanyPayables => "Intercompany Payables",
            Self::DeferredUnearnedRevenue => "Deferred/Unearned Revenue",
            Self::CurrentLoans => "Current Loans",
            Self::OtherLiabilities => "Other Liabilities",
            Self::FundBalance => "Fund Balance",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }

    /// Statement section this category reports under
    pub const fn section(&self) -> StatementSection {
        match self {
            Self::Expenditures => StatementSection::Expenditure,
            Self::Revenues => StatementSection::Revenue,
            Self::Cash
            | Self::AccountsReceivable
            | Self::PrepaidExpenses
            | Self::OtherCurrentAssets
            | Self::FixedAssets => StatementSection::Asset,
            Self::AccountsPayable
            | Self::AccruedLiabilities
            | Self::CompAbsences
            | Self::IntercompanyPayables
            | Self::DeferredUnearnedRevenue
            | Self::CurrentLoans
            | Self::OtherLiabilities => StatementSection::Liability,
            Self::FundBalance => StatementSection::FundBalance,
            Self::Other | Self::Unknown => StatementSection::Unclassified,
        }
    }

    /// Returns true for asset, liability, and fund-balance categories
    pub fn is_balance_sheet(&self) -> bool {
        matches!(
            self.section(),
            StatementSection::Asset | StatementSection::Liability | StatementSection::FundBalance
        )
    }

    /// Look up a category by its display label (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl Serialize for AccountCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for AccountCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category: {}", label)))
    }
}
