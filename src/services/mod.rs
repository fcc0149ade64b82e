//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the orchestration around shared state so route
//! handlers can stay focused on protocol translation.

pub mod chat;
