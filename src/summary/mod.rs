//! Totals over every expense: overall, per category and per person.

mod core;
mod endpoint;

pub use core::{Summary, get_summary};
pub use endpoint::get_summary_endpoint;

#[cfg(test)]
pub use core::{CategoryTotal, PersonTotal};
#[cfg(test)]
pub use endpoint::SummaryState;
