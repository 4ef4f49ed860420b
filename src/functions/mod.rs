//! Concrete functions and the witnesses they leave behind.
//!
//! * [`nary::Nary`] – several inputs, one output, linked to all inputs.
//! * [`quantifier::Quantifier`] – "for all" / "exists" over a list of booleans.
//! * [`strings::RegexFind`] – first match of a pattern in a string.
//! * [`fork::Fork`] – copies its input to several outputs.
//! * [`apply::ApplyToAll`] – applies a template function to each list element.

pub mod apply;
pub mod fork;
pub mod nary;
pub mod quantifier;
pub mod strings;

pub use apply::ApplyToAll;
pub use fork::Fork;
pub use nary::{Nary, NaryOp};
pub use quantifier::{Quantifier, QuantifierKind};
pub use strings::RegexFind;
