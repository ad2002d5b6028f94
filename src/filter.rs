//! Search filters and the `YYYY-MM-DD` date validator.

use crate::cli::Cli;
use crate::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, instrument};

/// Wire format for NewsAPI `from` / `to`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Optional keyword and date range for one search. `None` means "not filtered".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub keyword: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl RequestFilter {
    /// Validate the raw command-line values.
    ///
    /// Keywords are trimmed and dropped if nothing is left. Each date is
    /// checked on its own, then the pair is checked so that
    /// `from_date <= to_date`.
    #[instrument(level = "debug", skip_all)]
    pub fn from_cli(cli: &Cli) -> Result<Self, ValidationError> {
        let keyword = cli
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        let from_date = validate_date(cli.from_date.as_deref())?;
        let to_date = validate_date(cli.to_date.as_deref())?;

        if let (Some(from), Some(to)) = (from_date, to_date) {
            if from > to {
                return Err(ValidationError::DateRange {
                    from: from.format(DATE_FORMAT).to_string(),
                    to: to.format(DATE_FORMAT).to_string(),
                });
            }
        }

        let filter = Self {
            keyword,
            from_date,
            to_date,
        };
        debug!(?filter, "Validated request filter");
        Ok(filter)
    }
}

/// Validate an optional date argument. Absent input is accepted as "no filter".
pub fn validate_date(input: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    input.map(parse_date).transpose()
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// chrono alone accepts unpadded fields (`2024-1-5`) and signed years, so
/// the shape is checked first: ten ASCII characters, digits except the two
/// dashes. Year `0000` is not a calendar year and is rejected.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::DateFormat {
        input: input.to_string(),
    };

    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() >= 1)
        .ok_or_else(invalid)
}
