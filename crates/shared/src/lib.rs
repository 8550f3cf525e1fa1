//! Types shared between the portfolio effect controllers, their hosts and tools.

pub mod domain;
pub mod error;
pub mod event;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
