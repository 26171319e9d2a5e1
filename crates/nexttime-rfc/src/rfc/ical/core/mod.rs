//! iCalendar core models (RFC 5545).
//!
//! This module defines the data structures a schedule definition is read
//! from. Unknown properties and parameters are preserved so that callers can
//! inspect anything the typed accessors do not cover.

mod component;
mod datetime;
mod parameter;
mod property;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{DateTime, DateTimeForm, Time};
pub use parameter::Parameter;
pub use property::{ContentLine, Property, names};
pub use value::{Date, Period, PeriodEnd, Value};
