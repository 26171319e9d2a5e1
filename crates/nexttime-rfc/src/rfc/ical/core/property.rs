//! Content lines and typed properties (RFC 5545 §3.1, §3.8).

use super::{Date, DateTime, Parameter, Value};

/// Case-insensitive parameter lookup; parameter names are stored uppercase.
fn find_param<'a>(params: &'a [Parameter], name: &str) -> Option<&'a Parameter> {
    params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// One unfolded `name *(";" param) ":" value` line, value still raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub name: String,
    pub params: Vec<Parameter>,
    /// Value text after unfolding, not yet unescaped or typed.
    pub raw_value: String,
}

impl ContentLine {
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        find_param(&self.params, name)?.value()
    }

    /// The `VALUE=` override, if any.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.get_param_value("VALUE")
    }

    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.get_param_value("TZID")
    }

    /// Attaches the typed value, keeping name, parameters and raw text.
    #[must_use]
    pub fn into_property(self, value: Value) -> Property {
        Property {
            name: self.name,
            params: self.params,
            value,
            raw_value: self.raw_value,
        }
    }
}

/// A property with its value typed.
///
/// `raw_value` keeps the source text so a value the typed parser could not
/// place (an RRULE the engine rejects, a TEXT fallback) can still be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub params: Vec<Parameter>,
    pub value: Value,
    pub raw_value: String,
}

impl Property {
    fn with_value(
        name: impl Into<String>,
        params: Vec<Parameter>,
        value: Value,
        raw: String,
    ) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            value,
            raw_value: raw,
        }
    }

    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let raw = value.into();
        Self::with_value(name, Vec::new(), Value::Text(raw.clone()), raw)
    }

    /// A DATE-TIME property; zoned values get their TZID parameter.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: DateTime) -> Self {
        let params = dt
            .tzid()
            .map(|tzid| vec![Parameter::tzid(tzid)])
            .unwrap_or_default();
        let raw = dt.to_string();
        Self::with_value(name, params, Value::DateTime(dt), raw)
    }

    /// A `VALUE=DATE` property.
    #[must_use]
    pub fn date(name: impl Into<String>, date: Date) -> Self {
        let raw = date.to_string();
        Self::with_value(name, vec![Parameter::value_type("DATE")], Value::Date(date), raw)
    }

    #[must_use]
    pub fn recur(name: impl Into<String>, rule: impl Into<String>) -> Self {
        let raw = rule.into();
        Self::with_value(name, Vec::new(), Value::Recur(raw.clone()), raw)
    }

    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        find_param(&self.params, name)?.value()
    }

    pub fn add_param(&mut self, param: Parameter) {
        self.params.push(param);
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        self.value.as_datetime()
    }

    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        self.value.as_date()
    }

    /// RRULE text, when the value was typed as RECUR.
    #[must_use]
    pub fn as_recur(&self) -> Option<&str> {
        self.value.as_recur()
    }
}

/// Property names read by schedule resolution.
pub mod names {
    pub const DTSTART: &str = "DTSTART";
    pub const EXDATE: &str = "EXDATE";
    pub const RDATE: &str = "RDATE";
    pub const RRULE: &str = "RRULE";
    pub const SUMMARY: &str = "SUMMARY";
    pub const TZID: &str = "TZID";
    pub const UID: &str = "UID";
}
