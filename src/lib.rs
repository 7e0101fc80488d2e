//! # otp-field
//!
//! Composite one-time-passcode input widget for terminal UIs.
//!
//! A row of single-character slots that behaves as one logical text input:
//! typing a valid character fills the active slot and advances focus, typing
//! into the last slot commits the entry, deleting steps back. The whole
//! system is a synchronous keystroke-routing state machine - no threads, no
//! I/O of its own, no persistence.
//!
//! ## Architecture
//!
//! ```text
//! crossterm KeyEvent → keyboard::dispatch → FieldGroup::handle_edit
//!                                               │
//!                            observer callbacks ┘→ slot visuals → renderer
//! ```
//!
//! The [`group::FieldGroup`] owns the slots and the hidden entry buffer and
//! is the only thing that mutates them. The host implements
//! [`observer::OtpFieldObserver`] to gate focus, receive the composed value,
//! and decide success vs error coloring. Rendering is strictly downstream:
//! [`renderer::compose`] derives a cell grid from the group whenever the host
//! wants to redraw.
//!
//! "Secure entry" means visual masking of typed characters only - this is not
//! a secure-storage or cryptographic component.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Attr, DisplayStyle, InputKind, SlotShape)
//! - [`config`] - Configuration surface and validation
//! - [`observer`] - Host-side observer contract
//! - [`group`] - Field Group Controller (the state machine)
//! - [`slot`] - Slot state and the presentation adapter
//! - [`keyboard`] - crossterm key event adaptation
//! - [`renderer`] - Cell-grid composer and terminal writer

pub mod config;
pub mod group;
pub mod keyboard;
pub mod observer;
pub mod renderer;
pub mod slot;
pub mod types;

// Re-export commonly used items
pub use types::{Attr, Cell, DisplayStyle, InputKind, Rgba, SlotShape};

pub use config::{ConfigError, FieldGroupProps};

pub use observer::{ObserverHandle, OtpFieldObserver};

pub use group::FieldGroup;

pub use slot::{slot_colors, slot_shape, Slot, SlotVisual};

pub use keyboard::{dispatch, EditEvent};

pub use renderer::{compose, render, row_height, CURSOR_GLYPH, SLOT_GAP};
