//! Persistence contracts for named slots.

pub mod slots;
