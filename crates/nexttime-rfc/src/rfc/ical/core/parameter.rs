//! Property parameters (RFC 5545 §3.2), e.g. the `TZID` in
//! `DTSTART;TZID=America/New_York:20260123T120000`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Uppercased.
    pub name: String,
    /// Comma-separated values, quotes and caret escapes already removed.
    pub values: Vec<String>,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_values(name, vec![value.into()])
    }

    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// The first value; TZID and VALUE only ever carry one.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    #[must_use]
    pub fn tzid(tzid: impl Into<String>) -> Self {
        Self::new("TZID", tzid)
    }

    #[must_use]
    pub fn value_type(value_type: impl Into<String>) -> Self {
        Self::new("VALUE", value_type)
    }
}
