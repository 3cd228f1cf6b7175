//! # Eatba Core
//!
//! Domain types, traits, and error definitions for the Eatba restaurant
//! recommendation bot. This crate has **zero framework dependencies**: it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every seam is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping the session store or reply transport via configuration
//! - Easy testing with fake stores and recording channels
//! - Clean dependency graph (all crates depend inward on core)

pub mod catalog;
pub mod channel;
pub mod error;
pub mod event;
pub mod reply;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use catalog::{Catalog, DistrictGroups, MealTime, RestaurantRecord};
pub use channel::ReplyChannel;
pub use error::{Error, Result};
pub use event::InboundEvent;
pub use reply::{Action, CarouselCard, QuickReplyOption, ReplyPayload};
pub use session::{SessionState, SessionStore};
