//! Background loops for continuous processing.

pub mod alert_loop;
pub mod poll_loop;
