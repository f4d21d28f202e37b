//! crates/giftlink_core/src/query.rs
//!
//! The gift search filter. Store adapters either evaluate `GiftQuery::matches`
//! directly or translate the same rules into their own query language.

use crate::domain::{Gift, ValidationError};

/// A conjunction of optional gift filters. `None` means "do not filter on this".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GiftQuery {
    /// Case-insensitive substring of the gift name.
    pub name: Option<String>,
    /// Inclusive upper bound on `age_years`.
    pub max_age_years: Option<f64>,
    /// Exact category name.
    pub category: Option<String>,
    /// Exact condition name.
    pub condition: Option<String>,
}

impl GiftQuery {
    /// Builds a query from raw request parameters.
    ///
    /// Blank strings are treated as absent. A non-blank `name` is kept verbatim,
    /// surrounding spaces included. `age_years` must parse as a finite,
    /// non-negative number when present.
    pub fn from_params(
        name: Option<&str>,
        age_years: Option<&str>,
        category: Option<&str>,
        condition: Option<&str>,
    ) -> Result<Self, ValidationError> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        let max_age_years = present(age_years)
            .map(|raw| {
                raw.parse::<f64>()
                    .ok()
                    .filter(|years| years.is_finite() && *years >= 0.0)
                    .ok_or_else(|| {
                        ValidationError::new(format!(
                            "age_years must be a non-negative number, got '{}'",
                            raw
                        ))
                    })
            })
            .transpose()?;

        Ok(Self {
            name: name.filter(|v| !v.trim().is_empty()).map(str::to_string),
            max_age_years,
            category: present(category).map(str::to_string),
            condition: present(condition).map(str::to_string),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.max_age_years.is_none()
            && self.category.is_none()
            && self.condition.is_none()
    }

    /// Returns true when `gift` satisfies every supplied filter.
    pub fn matches(&self, gift: &Gift) -> bool {
        let attrs = &gift.attributes;

        if let Some(needle) = &self.name {
            if !attrs
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        if let Some(max) = self.max_age_years {
            match attrs.age_years {
                Some(age) if age <= max => {}
                _ => return false,
            }
        }

        if let Some(category) = &self.category {
            if attrs.category.map(|c| c.as_str()) != Some(category.as_str()) {
                return false;
            }
        }

        if let Some(condition) = &self.condition {
            if attrs.condition.map(|c| c.as_str()) != Some(condition.as_str()) {
                return false;
            }
        }

        true
    }
}
