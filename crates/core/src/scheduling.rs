//! The availability engine.
//!
//! Leaf components ([`catalog`], [`work_schedule`]) turn configuration into
//! plain values, [`slot_generator`] and [`conflict`] are pure functions over
//! those values, and [`availability`] wires them to a [`SchedulingStore`].
//!
//! [`SchedulingStore`]: crate::store::SchedulingStore

pub mod availability;
pub mod catalog;
pub mod conflict;
pub mod slot_generator;
pub mod work_schedule;
