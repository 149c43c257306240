//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no workflow logic:
//!
//! - **glad**: reqwest-backed HTTP adapter for the alert feed port
//! - **`fs_sink`**: cap-std-backed directory sink for downloaded payloads

pub mod fs_sink;
pub mod glad;
