//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own document semantics and persistence so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod loader;
pub mod remote;
pub mod session;
pub mod site;
pub mod store;
