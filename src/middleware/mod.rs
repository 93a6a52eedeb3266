//! Request middleware.

pub mod gate;
