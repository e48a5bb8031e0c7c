//! Token issuing and validation for the mock login.

pub mod jwt;
