//! # Petsim - Text-Based Virtual Pet Simulator
//!
//! Adopt pets, keep their hunger, sleep and fun up, and watch what they get up
//! to while you are away. Needs decay every time the keeper checks in; a pet
//! whose need runs out dies and is removed once the keeper has seen it.
//!
//! ## Features
//!
//! - **Pet Core**: clamped stats, hungry/tired/bored warnings, prioritised death cause.
//! - **Item Catalog**: fixed table of food, toys and sleep aids with species compatibility.
//! - **Timed Activities**: every action announces itself, waits a simulated time and reports
//!   the result, with the wait supplied by the caller (tokio task, blocking thread or instant).
//! - **Notifications**: ordered, synchronous listeners for status, activity and death events.
//! - **Sessions**: multiple adopted pets with an explicit current selection, no global state.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use petsim::pet::{find_item, InstantSuspender, PetType, RecordingSink};
//! use petsim::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let sink = Arc::new(RecordingSink::new());
//!     let mut session = Session::new().with_sink(sink.clone());
//!     session.adopt("Rex", PetType::Dog)?;
//!
//!     let kibble = find_item("Kibble").expect("catalog item");
//!     let pet = session.current_mut()?;
//!     pet.use_item(kibble, &InstantSuspender::new()).await;
//!     assert_eq!(pet.hunger(), 80);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`pet`] - Pet entity, catalog, timed activities and notifications
//! - [`session`] - Adopted pets and the current selection
//! - [`config`] - Configuration loading and defaults
//! - [`shell`] - Console menus and the console notification sink
//! - [`logutil`] - Log sanitising helpers

pub mod config;
pub mod logutil;
pub mod pet;
pub mod session;
pub mod shell;
