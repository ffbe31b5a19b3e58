//! Clients for the external services the domain talks to.

pub mod paypal;
