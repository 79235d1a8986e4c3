//! lyfta core: workout builder engine and template reconciliation.
//!
//! The engine ([`builder::WorkoutBuilder`]) owns one live workout and is
//! driven exclusively through dispatched [`builder::Action`]s; saving
//! follows a local-commit-always, remote-best-effort policy. The template
//! catalog ([`templates::TemplateCatalog`]) merges the local cache with
//! the online listing so the UI can render immediately and reconcile when
//! the network answers.

pub mod api;
pub mod builder;
pub mod model;
pub mod store;
pub mod templates;
