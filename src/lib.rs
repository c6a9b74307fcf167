//! Client-side core of a customer-relationship dashboard.
//!
//! The crate owns the pieces between the rendered UI and the REST backend:
//! the session lifecycle ([`services::session`]), the field validation rules
//! ([`forms::customer`]), the canonical customer list with its derived view
//! ([`services::collection`]) and the create/edit form state machine
//! ([`services::form`]). The backend itself is reached through the
//! [`gateway`] traits; the reqwest implementation lives behind the `http`
//! feature.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod gateway;
pub mod models;
pub mod services;
pub mod store;
