//! Field group configuration.
//!
//! [`FieldGroupProps`] carries every tunable of the composite control; the
//! group copies it on (re)configuration and never mutates it afterwards.
//! Visual parameter changes therefore go through
//! [`FieldGroup::configure`](crate::group::FieldGroup::configure) or
//! [`FieldGroup::restyle`](crate::group::FieldGroup::restyle) - there are no
//! implicit property-observer side effects.

use thiserror::Error;

use crate::types::{Attr, DisplayStyle, InputKind, Rgba};

/// Configuration rejected by the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A group needs at least one slot; a zero-slot group is never built.
    #[error("field count must be at least 1")]
    ZeroFieldCount,
}

/// Properties of a field group.
///
/// Defaults mirror a conventional 4-digit numeric OTP entry: rounded slots,
/// visible text, cursor shown, intermediate editing allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroupProps {
    /// Number of single-character slots (must be >= 1).
    pub field_count: usize,
    /// Visual style of the slots.
    pub display_style: DisplayStyle,
    /// Character class accepted into the slots.
    pub input_kind: InputKind,
    /// Text attributes for the slot content (bold, italic, ...).
    pub text_attrs: Attr,
    /// Keep the actual characters in the hidden entry buffer.
    pub secure_entry: bool,
    /// Show the mask glyph instead of the typed character.
    /// Only consulted when `secure_entry` is set.
    pub hide_entered_text: bool,
    /// Glyph shown in place of a typed character when masking.
    pub mask_glyph: char,
    /// Show a cursor in the focused empty slot.
    pub require_cursor: bool,
    /// Cursor color.
    pub cursor_color: Rgba,
    /// Slot width in terminal cells (clamped to a minimum of 3 when boxed).
    pub field_size: u16,
    /// Border line weight; >= 2 selects the heavy box-drawing glyphs.
    pub border_width: u16,
    /// Corner radius; 0 squares off a rounded style.
    pub corner_radius: u16,
    /// Allow focusing any slot; when false, focus is constrained to the
    /// first empty slot or the slot just before it.
    pub allow_intermediate_editing: bool,
    /// Background of an empty slot.
    pub default_background: Rgba,
    /// Background of a filled slot.
    pub filled_background: Rgba,
    /// Border of an empty slot.
    pub default_border: Rgba,
    /// Border of a filled slot.
    pub filled_border: Rgba,
    /// Border after a failed completion validation.
    /// Falls back to `filled_border` when unset.
    pub error_border: Option<Rgba>,
}

impl Default for FieldGroupProps {
    fn default() -> Self {
        Self {
            field_count: 4,
            display_style: DisplayStyle::default(),
            input_kind: InputKind::default(),
            text_attrs: Attr::NONE,
            secure_entry: false,
            hide_entered_text: false,
            mask_glyph: '•',
            require_cursor: true,
            cursor_color: Rgba::BLUE,
            field_size: 5,
            border_width: 1,
            corner_radius: 1,
            allow_intermediate_editing: true,
            default_background: Rgba::TERMINAL_DEFAULT,
            filled_background: Rgba::TERMINAL_DEFAULT,
            default_border: Rgba::GRAY,
            filled_border: Rgba::TERMINAL_DEFAULT,
            error_border: None,
        }
    }
}

impl FieldGroupProps {
    /// Props for a group of `field_count` slots, everything else default.
    pub fn new(field_count: usize) -> Self {
        Self {
            field_count,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_count == 0 {
            return Err(ConfigError::ZeroFieldCount);
        }
        Ok(())
    }

    /// Effective error border color.
    pub fn error_border(&self) -> Rgba {
        self.error_border.unwrap_or(self.filled_border)
    }

    /// Whether typed characters are visually masked.
    pub fn masks_input(&self) -> bool {
        self.secure_entry && self.hide_entered_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_props() {
        let props = FieldGroupProps::default();
        assert_eq!(props.field_count, 4);
        assert_eq!(props.display_style, DisplayStyle::Rounded);
        assert_eq!(props.input_kind, InputKind::Numeric);
        assert_eq!(props.mask_glyph, '•');
        assert!(props.allow_intermediate_editing);
        assert!(!props.secure_entry);
        assert!(props.validate().is_ok());
    }

    #[test]
    fn test_zero_field_count_rejected() {
        let props = FieldGroupProps::new(0);
        assert_eq!(props.validate(), Err(ConfigError::ZeroFieldCount));
    }

    #[test]
    fn test_single_field_accepted() {
        assert!(FieldGroupProps::new(1).validate().is_ok());
    }

    #[test]
    fn test_error_border_fallback() {
        let mut props = FieldGroupProps::default();
        props.filled_border = Rgba::GREEN;
        assert_eq!(props.error_border(), Rgba::GREEN);

        props.error_border = Some(Rgba::RED);
        assert_eq!(props.error_border(), Rgba::RED);
    }

    #[test]
    fn test_masks_input_needs_both_flags() {
        let mut props = FieldGroupProps::default();
        assert!(!props.masks_input());

        props.secure_entry = true;
        assert!(!props.masks_input());

        props.hide_entered_text = true;
        assert!(props.masks_input());

        props.secure_entry = false;
        assert!(!props.masks_input());
    }
}
