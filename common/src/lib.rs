//! Shared checklist model: templates, inspections and their responses, the
//! aggregation rules that roll responses up into a verdict, the edit session
//! that mutates an inspection, the print view tree, and the import/export
//! bundle. Everything here is pure; persistence and rendering live in the
//! backend.

pub mod aggregate;
pub mod edit;
pub mod error;
pub mod model;
pub mod print_view;
pub mod transfer;
