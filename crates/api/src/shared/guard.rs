use crate::error::UpkeepError;
use upkeep_domain::{date, NaiveDate};

pub struct Guard {}

impl Guard {
    /// Parses a `YYYY-MM-DD` request field
    pub fn against_malformed_date(field: &str, val: &str) -> Result<NaiveDate, UpkeepError> {
        date::is_valid_date(val).map_err(|_| {
            UpkeepError::BadClientData(format!(
                "The provided {}: {} is not a valid YYYY-MM-DD date",
                field, val
            ))
        })
    }

    pub fn against_missing_date(
        field: &str,
        val: &Option<String>,
    ) -> Result<NaiveDate, UpkeepError> {
        match val {
            Some(val) => Self::against_malformed_date(field, val),
            None => Err(UpkeepError::BadClientData(format!(
                "The {} is required for this action",
                field
            ))),
        }
    }

    pub fn against_malformed_optional_date(
        field: &str,
        val: &Option<String>,
    ) -> Result<Option<NaiveDate>, UpkeepError> {
        val.as_deref()
            .map(|val| Self::against_malformed_date(field, val))
            .transpose()
    }
}
