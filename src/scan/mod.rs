//! Ingestion of receipt-scan results.
//!
//! The image-understanding call itself is an external collaborator;
//! this module only validates its structured guess and turns it into a
//! regular transaction.

pub mod receipt;
