//! Outbound notification delivery.

pub mod email;

pub use email::{AlertEmail, EmailConfig, EmailDelivery, EmailError};
