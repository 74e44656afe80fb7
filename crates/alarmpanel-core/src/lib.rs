//! # alarmpanel-core - Core Domain Types
//!
//! Foundation crate for Alarm Panel. Provides domain types, the pure state
//! derivations, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Alarm State (`alarm`)
//! - [`AlarmState`] - Parsed alarm state code (unknown codes included)
//! - [`DisplayInfo`] - Color, icon, label and description of a state
//! - [`map_state()`] - Total mapping from raw code to [`DisplayInfo`]
//!
//! ### Entry Points (`entry_point`)
//! - [`EntryPointConfig`] - Configured door/window/other sensor
//! - [`classify()`] - Live classification, icon, age text and battery level
//! - [`age_text()`] - Relative "5m ago" style timestamps
//!
//! ### Entities (`entity`)
//! - [`EntityState`] - One entity's `{state, attributes, last_changed}`
//! - [`StateSnapshot`] - Keyed lookup over the latest entity states
//!
//! ### Commands (`command`)
//! - [`ServiceCall`] - `(domain, service, payload)` request to the external system
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use alarmpanel_core::prelude::*;
//! ```

pub mod alarm;
pub mod command;
pub mod entity;
pub mod entry_point;
pub mod error;
pub mod logging;
pub mod prelude;

// Re-export commonly used types at crate root for convenience
pub use alarm::{display_info, map_state, AlarmState, DisplayInfo, StateColor, StateIcon};
pub use command::{domain_of, AlarmService, ServiceCall, DEFAULT_ALARM_DOMAIN};
pub use entity::{EntityState, StateSnapshot};
pub use entry_point::{
    age_text, classify, EntryPointConfig, EntryPointIcon, EntryPointKind, EntryPointStatus,
    SecurityClassification,
};
pub use error::{Error, Result, ResultExt};
