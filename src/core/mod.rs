//! Reconciliation services and the collaborator seams they consume.

pub mod services;
pub mod sources;
