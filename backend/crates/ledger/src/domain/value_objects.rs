//! Domain Value Objects
//!
//! Immutable value types for the ledger domain.

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};

/// Bank payout details attached to a withdrawal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutDetails {
    pub bank_name: String,
    pub account_name: String,
    pub account_no: String,
    pub ifsc_code: String,
}

impl PayoutDetails {
    /// Every field is required; surrounding whitespace is dropped.
    pub fn new(
        bank_name: Option<&str>,
        account_name: Option<&str>,
        account_no: Option<&str>,
        ifsc_code: Option<&str>,
    ) -> LedgerResult<Self> {
        Ok(Self {
            bank_name: required("bankName", bank_name)?,
            account_name: required("accountName", account_name)?,
            account_no: required("accountNo", account_no)?,
            ifsc_code: required("ifscCode", ifsc_code)?,
        })
    }
}

fn required(field: &str, value: Option<&str>) -> LedgerResult<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| LedgerError::InvalidArgument(format!("{field} is required")))
}

/// Pagination window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    /// `None` means unrestricted
    pub limit: Option<u32>,
    pub offset: u32,
}

impl Page {
    pub const MAX_LIMIT: u32 = 1000;

    pub fn new(limit: Option<u32>, offset: Option<u32>) -> LedgerResult<Self> {
        if let Some(limit) = limit {
            if limit == 0 || limit > Self::MAX_LIMIT {
                return Err(LedgerError::InvalidArgument(format!(
                    "limit must be between 1 and {}",
                    Self::MAX_LIMIT
                )));
            }
        }

        Ok(Self {
            limit,
            offset: offset.unwrap_or(0),
        })
    }

    /// Apply to an already ordered slice
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = (self.offset as usize).min(items.len());
        let end = match self.limit {
            Some(limit) => start.saturating_add(limit as usize).min(items.len()),
            None => items.len(),
        };
        items[start..end].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_details_trimmed() {
        let details = PayoutDetails::new(
            Some(" State Bank "),
            Some("Asha"),
            Some("0012345"),
            Some("SBIN0000001"),
        )
        .unwrap();
        assert_eq!(details.bank_name, "State Bank");
    }

    #[test]
    fn test_payout_details_missing_field() {
        let result = PayoutDetails::new(Some("Bank"), Some("   "), Some("1"), Some("X"));
        assert!(
            matches!(result, Err(LedgerError::InvalidArgument(ref m)) if m == "accountName is required")
        );

        let result = PayoutDetails::new(Some("Bank"), Some("Asha"), Some("1"), None);
        assert!(matches!(result, Err(LedgerError::InvalidArgument(_))));
    }

    #[test]
    fn test_page_bounds() {
        assert!(Page::new(Some(0), None).is_err());
        assert!(Page::new(Some(Page::MAX_LIMIT + 1), None).is_err());

        let page = Page::new(Some(2), Some(1)).unwrap();
        assert_eq!(page.slice(&[1, 2, 3, 4]), vec![2, 3]);
        assert_eq!(Page::default().slice(&[1, 2]), vec![1, 2]);
        assert!(Page::new(None, Some(10)).unwrap().slice(&[1, 2]).is_empty());
    }
}
