//! Domain model for content areas and their child elements.
//!
//! # Responsibility
//! - Define the canonical container/element/actor records used by core logic.
//! - Keep identity and ownership-hint semantics in one place.
//!
//! # Invariants
//! - Every persisted record is identified by a stable UUID assigned by the
//!   store and never reused.
//! - The owner-type hint on an area is an optimization, never authoritative.

pub mod actor;
pub mod area;
pub mod element;
