//! Browser-free host: an in-memory document, a virtual clock and a driver
//! that feeds events and due tasks into a [`Page`](crate::Page).

pub mod dom;
pub mod fixture;
pub mod host;
pub mod scheduler;
pub mod selector;

pub use dom::MemoryDom;
pub use fixture::portfolio_document;
pub use host::{HeadlessHost, HeadlessPage, DEFAULT_SEED};
pub use scheduler::VirtualScheduler;

#[cfg(test)]
#[path = "../tests/headless_tests.rs"]
mod tests;
