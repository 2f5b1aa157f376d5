use serde::{Deserialize, Serialize};

/// Optional country code narrowing which pre-aggregated series is requested.
/// `None` means global totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryFilter(pub Option<String>);

impl CountryFilter {
    /// Blank codes are treated as no filter.
    pub fn new(code: Option<&str>) -> Self {
        CountryFilter(
            code.map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string),
        )
    }

    pub fn global() -> Self {
        CountryFilter(None)
    }

    pub fn code(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Chart subtitle: `"(US)"` or `"(Global)"`.
    pub fn subtitle(&self) -> String {
        match self.code() {
            Some(code) => format!("({code})"),
            None => "(Global)".to_string(),
        }
    }

    /// Query string fragment used when requesting filtered series.
    pub fn query_params(&self) -> Option<String> {
        self.code().map(|code| format!("country={code}"))
    }
}
