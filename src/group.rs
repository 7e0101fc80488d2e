//! Field Group Controller - the input-routing state machine.
//!
//! A [`FieldGroup`] owns the ordered collection of single-character slots and
//! everything that makes them behave as one logical text input:
//! - focus transfer between slots (gated by the observer and the
//!   intermediate-editing policy)
//! - character-class validation of every edit
//! - masked display with a hidden entry buffer holding the typed characters
//! - deletion handling and completion detection
//!
//! Slots are addressed by zero-based position in a `Vec` owned directly by
//! the group - there is no identifier-based sibling lookup.
//!
//! Everything is synchronous: each keystroke produces exactly one
//! [`FieldGroup::handle_edit`] call, fully processed before it returns.
//! Observer callbacks run inside that call; an observer must not trigger a
//! new edit on the same group from within a callback.
//!
//! # Example
//!
//! ```
//! use otp_field::config::FieldGroupProps;
//! use otp_field::group::FieldGroup;
//!
//! let mut group = FieldGroup::new(FieldGroupProps::new(4)).unwrap();
//!
//! // The host feeds proposed slot texts; the group applies the edits itself.
//! group.handle_edit(0, "1");
//! group.handle_edit(1, "2");
//! assert_eq!(group.value(), "12");
//! assert_eq!(group.focused_index(), 2);
//! ```

use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::config::{ConfigError, FieldGroupProps};
use crate::observer::{ObserverHandle, OtpFieldObserver};
use crate::slot::{slot_colors, slot_shape, Slot, SlotVisual};

// =============================================================================
// FieldGroup
// =============================================================================

/// Composite OTP input control.
pub struct FieldGroup {
    props: FieldGroupProps,
    slots: Vec<Slot>,
    /// Actual typed characters, one entry per slot, always sized to the
    /// field count. The composed value is derived from this, never stored.
    buffer: Vec<String>,
    /// Focused slot index, -1 when no slot is active.
    focused: Signal<i32>,
    observer: Option<ObserverHandle>,
}

impl FieldGroup {
    /// Build a group with no observer attached.
    pub fn new(props: FieldGroupProps) -> Result<Self, ConfigError> {
        Self::build(props, None)
    }

    /// Build a group with an observer.
    ///
    /// The observer gates the initial focus request the same way it gates
    /// every later one, so a veto of slot 0 leaves the group unfocused.
    pub fn with_observer(
        props: FieldGroupProps,
        observer: ObserverHandle,
    ) -> Result<Self, ConfigError> {
        Self::build(props, Some(observer))
    }

    fn build(props: FieldGroupProps, observer: Option<ObserverHandle>) -> Result<Self, ConfigError> {
        props.validate()?;
        let mut group = Self {
            props,
            slots: Vec::new(),
            buffer: Vec::new(),
            focused: signal(-1),
            observer,
        };
        group.rebuild();
        Ok(group)
    }

    /// Re-initialize the group with new configuration.
    ///
    /// Rebuilds the slots, clears and re-sizes the entry buffer, and requests
    /// focus on slot 0 - exactly what construction does. Idempotent: calling
    /// twice with identical props yields an observably identical group.
    /// On validation error the group is left untouched.
    pub fn configure(&mut self, props: FieldGroupProps) -> Result<(), ConfigError> {
        props.validate()?;
        self.props = props;
        self.rebuild();
        Ok(())
    }

    /// Replace the configuration without discarding the current entry.
    ///
    /// Visual-parameter changes re-derive every slot's presentation via
    /// [`Self::restyle`]; a changed field count cannot keep the entry and
    /// reinitializes the group like [`Self::configure`].
    pub fn set_props(&mut self, props: FieldGroupProps) -> Result<(), ConfigError> {
        props.validate()?;
        let rebuild = props.field_count != self.props.field_count;
        self.props = props;
        if rebuild {
            self.rebuild();
        } else {
            self.restyle();
        }
        Ok(())
    }

    fn rebuild(&mut self) {
        let count = self.props.field_count;
        let shape = slot_shape(self.props.display_style, self.props.corner_radius);
        let (bg, border) = slot_colors(false, None, &self.props);
        let visual = SlotVisual {
            bg,
            border,
            shape,
            attrs: self.props.text_attrs,
        };

        self.slots = (0..count).map(|index| Slot::new(index, visual)).collect();
        self.buffer = vec![String::new(); count];
        self.focused.set(-1);
        self.request_focus(0);
    }

    /// Attach (or replace) the observer.
    pub fn set_observer(&mut self, observer: ObserverHandle) {
        self.observer = Some(observer);
    }

    /// Detach the observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    fn observer(&self) -> Option<Rc<dyn OtpFieldObserver>> {
        self.observer.as_ref()?.upgrade()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of slots; equal to the configured field count at all times.
    pub fn field_count(&self) -> usize {
        self.slots.len()
    }

    /// All slots in position order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at `index`, if in range.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Current configuration.
    pub fn props(&self) -> &FieldGroupProps {
        &self.props
    }

    /// Focused slot index (-1 if none).
    pub fn focused_index(&self) -> i32 {
        self.focused.get()
    }

    /// Check if a specific slot is focused.
    pub fn is_focused(&self, index: usize) -> bool {
        self.focused.get() == index as i32
    }

    /// Reactive handle on the focused slot index for hosts that subscribe.
    pub fn focus_signal(&self) -> Signal<i32> {
        self.focused.clone()
    }

    /// Composed OTP value: the buffer entries concatenated in slot order.
    pub fn value(&self) -> String {
        self.buffer.concat()
    }

    /// Whether the composed value has reached the configured field count.
    pub fn is_complete(&self) -> bool {
        self.value().chars().count() == self.props.field_count
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether `index` may become the active slot. No side effects.
    ///
    /// The observer is asked first (absent observer permits). When
    /// intermediate editing is disallowed, activation is then constrained to
    /// the first empty slot or the slot just before it, so the last filled
    /// slot can be corrected but untouched slots cannot be skipped into.
    /// Once every slot is filled, any slot may be activated.
    pub fn can_become_active(&self, index: usize) -> bool {
        if index >= self.slots.len() {
            return false;
        }
        if let Some(obs) = self.observer() {
            if !obs.can_activate_slot(index) {
                return false;
            }
        }
        if !self.props.allow_intermediate_editing {
            if let Some(first_empty) = self.buffer.iter().position(|entry| entry.is_empty()) {
                return index == first_empty || index + 1 == first_empty;
            }
        }
        true
    }

    /// Request focus on a slot through the activation gate.
    pub fn request_focus(&mut self, index: usize) -> bool {
        if !self.can_become_active(index) {
            return false;
        }
        self.transfer_focus(index as i32);
        true
    }

    /// Relinquish focus entirely.
    pub fn blur(&mut self) {
        self.transfer_focus(-1);
    }

    /// Move focus to the following slot, through the gate.
    pub fn focus_next(&mut self) -> bool {
        let current = self.focused.get();
        let next = if current < 0 { 0 } else { current as usize + 1 };
        if next >= self.slots.len() {
            return false;
        }
        self.request_focus(next)
    }

    /// Move focus to the preceding slot, through the gate.
    pub fn focus_previous(&mut self) -> bool {
        let current = self.focused.get();
        if current <= 0 {
            return false;
        }
        self.request_focus(current as usize - 1)
    }

    fn transfer_focus(&mut self, new_index: i32) {
        let old_index = self.focused.get();
        if old_index == new_index {
            return;
        }
        self.focused.set(new_index);
        if old_index >= 0 {
            self.on_slot_blur(old_index as usize);
        }
    }

    /// Focus-loss hook: styles with a separate shape overlay (diamond,
    /// underlined) resync the overlay's fill and stroke to the slot's
    /// current filled state. Purely presentational.
    fn on_slot_blur(&mut self, index: usize) {
        if !self.props.display_style.has_overlay() {
            return;
        }
        let filled = !self.slots[index].is_empty();
        let (bg, border) = slot_colors(filled, None, &self.props);
        self.slots[index].set_colors(bg, border);
    }

    // =========================================================================
    // Edit Routing
    // =========================================================================

    /// Handle one character insert or delete attempt on a slot.
    ///
    /// `proposed` is the slot's current text with the requested edit range
    /// applied. The return value tells the host whether to apply the raw
    /// edit itself: on both mutating paths the group has already applied the
    /// mutation and returns `false` so the host's default text replacement
    /// cannot double-apply it.
    pub fn handle_edit(&mut self, index: usize, proposed: &str) -> bool {
        let Some(current) = self.slot(index).map(|slot| slot.text().to_string()) else {
            // Out of range should not occur; accept the edit unmodified.
            return true;
        };

        // Character-class validation on what the edit introduces. The visible
        // text may be the mask glyph, which belongs to no input class, so the
        // current text is stripped before filtering.
        let inserted = proposed.strip_prefix(current.as_str()).unwrap_or(proposed);
        if !proposed.is_empty() && !inserted.chars().all(|ch| self.props.input_kind.accepts(ch)) {
            return false;
        }

        if let Some(ch) = proposed.chars().last() {
            // Insertion: store the typed character, show it (or the mask
            // glyph), and advance. Typing into the last slot commits the
            // entry by relinquishing focus.
            self.buffer[index] = ch.to_string();
            let shown = if self.props.masks_input() {
                self.props.mask_glyph
            } else {
                ch
            };
            self.slots[index].set_text(shown.to_string());

            if index + 1 < self.slots.len() {
                self.request_focus(index + 1);
            } else {
                self.blur();
            }
            self.recompute(false);
        } else {
            // Deletion: clear the slot and its buffer entry, step back.
            self.slots[index].clear_text();
            self.buffer[index].clear();
            if index > 0 {
                self.request_focus(index - 1);
            }
            self.recompute(true);
        }
        false
    }

    // =========================================================================
    // Aggregate State
    // =========================================================================

    /// Explicitly re-derive every slot's presentation from the current
    /// configuration and filled state. The configuration layer calls this
    /// after visual-parameter changes; nothing restyles implicitly.
    pub fn restyle(&mut self) {
        let shape = slot_shape(self.props.display_style, self.props.corner_radius);
        let props = &self.props;
        for slot in self.slots.iter_mut() {
            let filled = !slot.is_empty();
            let (bg, border) = slot_colors(filled, None, props);
            slot.set_visual(SlotVisual {
                bg,
                border,
                shape,
                attrs: props.text_attrs,
            });
        }
    }

    fn recompute(&mut self, deleted: bool) {
        if deleted {
            // A deletion always breaks a complete entry; the verdict is not
            // consulted, every slot just falls back to its filled/default
            // palette.
            if let Some(obs) = self.observer() {
                let _ = obs.on_completion_validated(false);
            }
            let props = &self.props;
            for slot in self.slots.iter_mut() {
                let filled = !slot.is_empty();
                let (bg, border) = slot_colors(filled, None, props);
                slot.set_colors(bg, border);
            }
        } else {
            let value = self.value();
            if value.chars().count() != self.props.field_count {
                // Entry still in progress.
                return;
            }
            let verdict = match self.observer() {
                Some(obs) => {
                    obs.on_otp_entered(&value);
                    obs.on_completion_validated(true)
                }
                // No live observer: nobody can reject the entry.
                None => true,
            };
            let props = &self.props;
            for slot in self.slots.iter_mut() {
                let (bg, border) = slot_colors(true, Some(verdict), props);
                slot.set_colors(bg, border);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
