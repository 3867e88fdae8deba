//! Core domain types: jurisdictions, categories, the rule table, and the
//! engine's input and output shapes.

mod countries;
mod error;
mod rules;
mod types;

pub use countries::*;
pub use error::*;
pub use rules::*;
pub use types::*;
