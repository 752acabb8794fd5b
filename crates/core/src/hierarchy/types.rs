//! Account classification.

use serde::{Deserialize, Serialize};

/// The five account classes of double-entry bookkeeping.
///
/// On the wire each class is an integer code; decoding rejects unknown codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "i64")]
pub enum AccountType {
    /// Resources owned.
    Asset,
    /// Obligations owed.
    Liability,
    /// Revenue earned.
    Income,
    /// Costs incurred.
    Expense,
    /// Residual interest of the owners.
    Equity,
}

impl AccountType {
    /// Returns the wire code for this account type.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Asset => 1,
            Self::Liability => 2,
            Self::Income => 4,
            Self::Expense => 5,
            Self::Equity => 8,
        }
    }

    /// Returns true for classes reported on a position (balance sheet).
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }

    /// Returns true for classes reported on a performance (income statement).
    #[must_use]
    pub const fn is_income_statement(self) -> bool {
        matches!(self, Self::Income | Self::Expense)
    }
}

impl TryFrom<i64> for AccountType {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Asset),
            2 => Ok(Self::Liability),
            4 => Ok(Self::Income),
            5 => Ok(Self::Expense),
            8 => Ok(Self::Equity),
            _ => Err(format!("unknown account type code: {code}")),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Equity => write!(f, "equity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AccountType; 5] = [
        AccountType::Asset,
        AccountType::Liability,
        AccountType::Income,
        AccountType::Expense,
        AccountType::Equity,
    ];

    #[test]
    fn test_codes_round_trip() {
        for account_type in ALL {
            assert_eq!(AccountType::try_from(account_type.code()), Ok(account_type));
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        for code in [0, 3, 6, 7, 9, -1] {
            assert!(AccountType::try_from(code).is_err());
        }
    }

    #[test]
    fn test_deserialize_from_code() {
        let parsed: AccountType = serde_json::from_str("8").unwrap();
        assert_eq!(parsed, AccountType::Equity);
        assert!(serde_json::from_str::<AccountType>("3").is_err());
    }

    #[test]
    fn test_classification() {
        assert!(AccountType::Asset.is_balance_sheet());
        assert!(AccountType::Equity.is_balance_sheet());
        assert!(!AccountType::Income.is_balance_sheet());
        assert!(AccountType::Expense.is_income_statement());
        assert!(!AccountType::Liability.is_income_statement());
    }

    #[test]
    fn test_display() {
        assert_eq!(AccountType::Liability.to_string(), "liability");
        assert_eq!(serde_json::to_string(&AccountType::Income).unwrap(), "\"income\"");
    }
}
