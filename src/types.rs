//! Core types for otp-field.
//!
//! These types define the foundation that everything builds on.
//! They flow from configuration through the controller into the renderer.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Alpha 255 = fully opaque, 0 = fully transparent.
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    /// Transparent color.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    // Standard colors
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid format.
    ///
    /// # Examples
    ///
    /// ```
    /// use otp_field::types::Rgba;
    ///
    /// let red = Rgba::from_hex("#ff0000").unwrap();
    /// assert_eq!(red, Rgba::rgb(255, 0, 0));
    ///
    /// // #RGB shorthand (expands each digit)
    /// let white = Rgba::from_hex("#fff").unwrap();
    /// assert_eq!(white, Rgba::rgb(255, 255, 255));
    ///
    /// // Without # prefix also works
    /// let blue = Rgba::from_hex("0000ff").unwrap();
    /// assert_eq!(blue, Rgba::rgb(0, 0, 255));
    ///
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            // #RGB -> expand to #RRGGBB
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            // #RRGGBB
            6 => {
                let r = hex_byte(bytes, 0)?;
                let g = hex_byte(bytes, 2)?;
                let b = hex_byte(bytes, 4)?;
                Some(Self::rgb(r, g, b))
            }
            // #RRGGBBAA
            8 => {
                let r = hex_byte(bytes, 0)?;
                let g = hex_byte(bytes, 2)?;
                let b = hex_byte(bytes, 4)?;
                let a = hex_byte(bytes, 6)?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
///
/// This is what the renderer deals with. Nothing more complex.
/// The composer produces these, the writer outputs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character displayed in this cell.
    pub ch: char,
    /// Foreground color.
    pub fg: Rgba,
    /// Background color.
    pub bg: Rgba,
    /// Attribute flags (bold, underline, etc.).
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// Display Style
// =============================================================================

/// Visual style of the individual slots.
///
/// A closed set - every style is dispatched through the single presentation
/// function in [`crate::slot`], never through scattered conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DisplayStyle {
    /// Circle-shaped slot (rounded corners, equal width and height).
    Circular = 0,
    /// Rounded-corner rectangle.
    #[default]
    Rounded = 1,
    /// Square-corner rectangle.
    Square = 2,
    /// Diamond-shaped slot (diagonal corner overlay).
    Diamond = 3,
    /// No box, bottom line only.
    Underlined = 4,
}

impl DisplayStyle {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circular" => Some(Self::Circular),
            "rounded" => Some(Self::Rounded),
            "square" => Some(Self::Square),
            "diamond" => Some(Self::Diamond),
            "underlined" => Some(Self::Underlined),
            _ => None,
        }
    }

    /// Get all styles as a slice.
    pub const fn all() -> &'static [DisplayStyle] {
        &[
            Self::Circular,
            Self::Rounded,
            Self::Square,
            Self::Diamond,
            Self::Underlined,
        ]
    }

    /// Whether this style draws a separate shape overlay whose colors must be
    /// resynced when a slot loses focus.
    pub const fn has_overlay(&self) -> bool {
        matches!(self, Self::Diamond | Self::Underlined)
    }
}

impl From<u8> for DisplayStyle {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Circular,
            1 => Self::Rounded,
            2 => Self::Square,
            3 => Self::Diamond,
            4 => Self::Underlined,
            _ => Self::Rounded,
        }
    }
}

// =============================================================================
// Input Kind
// =============================================================================

/// Character class accepted by the slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum InputKind {
    /// Decimal digits only.
    #[default]
    Numeric = 0,
    /// Letters only.
    Alphabetic = 1,
    /// Letters and digits.
    Alphanumeric = 2,
}

impl InputKind {
    /// Check whether a single character belongs to this class.
    pub fn accepts(&self, ch: char) -> bool {
        match self {
            Self::Numeric => ch.is_numeric(),
            Self::Alphabetic => ch.is_alphabetic(),
            Self::Alphanumeric => ch.is_alphanumeric(),
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "numeric" => Some(Self::Numeric),
            "alphabetic" => Some(Self::Alphabetic),
            "alphanumeric" => Some(Self::Alphanumeric),
            _ => None,
        }
    }
}

impl From<u8> for InputKind {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Numeric,
            1 => Self::Alphabetic,
            2 => Self::Alphanumeric,
            _ => Self::Numeric,
        }
    }
}

// =============================================================================
// Slot Shape
// =============================================================================

/// Terminal shape a display style resolves to.
///
/// The slot presentation adapter maps [`DisplayStyle`] plus the configured
/// corner radius onto one of these; the renderer only ever sees the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotShape {
    /// ╭─╮ rounded corners, full box.
    Round,
    /// ┌─┐ square corners, full box.
    Box,
    /// ╱─╲ diagonal corners, full box.
    Diamond,
    /// No box, bottom line only.
    Underline,
}

impl SlotShape {
    /// Get the border characters for this shape.
    ///
    /// Returns: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    ///
    /// `heavy` selects the bold line weight where the box-drawing block has
    /// one (there are no heavy rounded corners, so Round stays light).
    pub const fn chars(
        &self,
        heavy: bool,
    ) -> (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str) {
        match (self, heavy) {
            (Self::Round, _) => ("─", "│", "╭", "╮", "╯", "╰"),
            (Self::Box, false) => ("─", "│", "┌", "┐", "┘", "└"),
            (Self::Box, true) => ("━", "┃", "┏", "┓", "┛", "┗"),
            (Self::Diamond, false) => ("─", "│", "╱", "╲", "╱", "╲"),
            (Self::Diamond, true) => ("━", "┃", "╱", "╲", "╱", "╲"),
            (Self::Underline, false) => ("─", " ", " ", " ", " ", " "),
            (Self::Underline, true) => ("━", " ", " ", " ", " ", " "),
        }
    }

    /// Whether this shape draws a full border box around the content row.
    pub const fn is_boxed(&self) -> bool {
        !matches!(self, Self::Underline)
    }
}

// =============================================================================
// Tests
// =============================================================================
