//! Discussion subdomain - per-member answers and their aggregate.
//!
//! - [`value_objects::BoardResponse`] - one member's answer
//! - [`value_objects::Discussion`] - the priority-sorted result of a run
//! - [`aggregate::aggregate`] - sorting and totals

pub mod aggregate;
pub mod value_objects;
