//! Keyboard adapter - crossterm key events in, slot edits out.
//!
//! The terminal host reads [`crossterm::event::KeyEvent`]s and hands them to
//! [`dispatch`], which routes them into the focused slot as insert/delete
//! edits and maps arrow keys to gated focus movement. Hosts with their own
//! text fields can instead use [`EditEvent`] and feed
//! [`FieldGroup::handle_edit`](crate::group::FieldGroup::handle_edit)
//! directly.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::group::FieldGroup;

// =============================================================================
// EditEvent
// =============================================================================

/// A keystroke-level edit attempt on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEvent {
    /// Insert a character.
    Insert(char),
    /// Delete the slot content.
    Delete,
}

impl EditEvent {
    /// Translate a key event into an edit attempt.
    ///
    /// Only press events count; ctrl/alt chords are never edits.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Char(ch) => Some(Self::Insert(ch)),
            KeyCode::Backspace | KeyCode::Delete => Some(Self::Delete),
            _ => None,
        }
    }

    /// The slot's current text with this edit applied.
    pub fn proposed_text(&self, current: &str) -> String {
        match self {
            Self::Insert(ch) => {
                let mut proposed = current.to_string();
                proposed.push(*ch);
                proposed
            }
            Self::Delete => String::new(),
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Route a key event into a group.
///
/// Returns true when the event was consumed: focus movement that succeeded,
/// or any edit attempt on the focused slot (a rejected character is swallowed,
/// not forwarded).
pub fn dispatch(group: &mut FieldGroup, key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Left => return group.focus_previous(),
        KeyCode::Right => return group.focus_next(),
        KeyCode::Home => return group.request_focus(0),
        KeyCode::End => return group.request_focus(group.field_count() - 1),
        _ => {}
    }

    let focused = group.focused_index();
    if focused < 0 {
        return false;
    }
    let index = focused as usize;

    let Some(event) = EditEvent::from_key(key) else {
        return false;
    };
    let current = group.slot(index).map(|slot| slot.text().to_string());
    let proposed = event.proposed_text(current.as_deref().unwrap_or(""));

    // The group applies accepted edits itself; either way the key targeted
    // the widget and is consumed.
    let _ = group.handle_edit(index, &proposed);
    true
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldGroupProps;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_from_key_char() {
        assert_eq!(
            EditEvent::from_key(&press(KeyCode::Char('7'))),
            Some(EditEvent::Insert('7'))
        );
    }

    #[test]
    fn test_from_key_delete_keys() {
        assert_eq!(
            EditEvent::from_key(&press(KeyCode::Backspace)),
            Some(EditEvent::Delete)
        );
        assert_eq!(
            EditEvent::from_key(&press(KeyCode::Delete)),
            Some(EditEvent::Delete)
        );
    }

    #[test]
    fn test_from_key_ignores_chords() {
        let ctrl = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(EditEvent::from_key(&ctrl), None);

        let alt = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(EditEvent::from_key(&alt), None);

        // Shift is fine - it is how uppercase letters arrive
        let shift = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(EditEvent::from_key(&shift), Some(EditEvent::Insert('A')));
    }

    #[test]
    fn test_from_key_ignores_release() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('7'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(EditEvent::from_key(&release), None);
    }

    #[test]
    fn test_from_key_ignores_navigation() {
        assert_eq!(EditEvent::from_key(&press(KeyCode::Enter)), None);
        assert_eq!(EditEvent::from_key(&press(KeyCode::Tab)), None);
        assert_eq!(EditEvent::from_key(&press(KeyCode::Left)), None);
    }

    #[test]
    fn test_proposed_text() {
        assert_eq!(EditEvent::Insert('7').proposed_text(""), "7");
        assert_eq!(EditEvent::Insert('3').proposed_text("•"), "•3");
        assert_eq!(EditEvent::Delete.proposed_text("5"), "");
    }

    #[test]
    fn test_dispatch_typing_completes_entry() {
        let mut group = FieldGroup::new(FieldGroupProps::new(4)).unwrap();

        for ch in "1234".chars() {
            assert!(dispatch(&mut group, &press(KeyCode::Char(ch))));
        }

        assert_eq!(group.value(), "1234");
        assert!(group.is_complete());
        assert_eq!(group.focused_index(), -1);
    }

    #[test]
    fn test_dispatch_rejected_char_is_swallowed() {
        let mut group = FieldGroup::new(FieldGroupProps::new(4)).unwrap();

        assert!(dispatch(&mut group, &press(KeyCode::Char('a'))));
        assert_eq!(group.value(), "");
        assert_eq!(group.focused_index(), 0);
    }

    #[test]
    fn test_dispatch_backspace_steps_back() {
        let mut group = FieldGroup::new(FieldGroupProps::new(4)).unwrap();
        dispatch(&mut group, &press(KeyCode::Char('1')));
        dispatch(&mut group, &press(KeyCode::Char('2')));

        assert!(dispatch(&mut group, &press(KeyCode::Backspace)));
        assert_eq!(group.value(), "12");
        assert_eq!(group.focused_index(), 1);

        assert!(dispatch(&mut group, &press(KeyCode::Backspace)));
        assert_eq!(group.value(), "1");
        assert_eq!(group.focused_index(), 0);
    }

    #[test]
    fn test_dispatch_arrows_move_focus() {
        let mut group = FieldGroup::new(FieldGroupProps::new(4)).unwrap();

        assert!(dispatch(&mut group, &press(KeyCode::Right)));
        assert_eq!(group.focused_index(), 1);

        assert!(dispatch(&mut group, &press(KeyCode::Left)));
        assert_eq!(group.focused_index(), 0);

        assert!(!dispatch(&mut group, &press(KeyCode::Left)));

        assert!(dispatch(&mut group, &press(KeyCode::End)));
        assert_eq!(group.focused_index(), 3);

        assert!(dispatch(&mut group, &press(KeyCode::Home)));
        assert_eq!(group.focused_index(), 0);
    }

    #[test]
    fn test_dispatch_without_focus_is_not_consumed() {
        let mut group = FieldGroup::new(FieldGroupProps::new(4)).unwrap();
        group.blur();

        assert!(!dispatch(&mut group, &press(KeyCode::Char('1'))));
        assert_eq!(group.value(), "");
    }
}
