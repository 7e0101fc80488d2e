//! Slot row renderer.
//!
//! Two layers, like every renderer here: [`compose`] turns the group into a
//! grid of [`Cell`]s (pure, testable), [`render`] flushes that grid to a
//! writer with crossterm queue commands. The controller never calls either -
//! the host decides when to redraw.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::group::FieldGroup;
use crate::slot::SlotVisual;
use crate::types::{Attr, Cell, Rgba, SlotShape};

/// Gap between slots, in cells.
pub const SLOT_GAP: usize = 1;

/// Cursor glyph shown in the focused empty slot.
pub const CURSOR_GLYPH: char = '▏';

// =============================================================================
// Compose
// =============================================================================

/// Compose the slot row into a cell grid.
///
/// Boxed shapes take three rows (border, content, border); the underlined
/// shape takes two (content, bottom line). Slots are separated by
/// [`SLOT_GAP`] default cells.
pub fn compose(group: &FieldGroup) -> Vec<Vec<Cell>> {
    let Some(first) = group.slots().first() else {
        return Vec::new();
    };
    let props = group.props();
    let shape = first.visual().shape;
    let heavy = props.border_width >= 2;

    let boxed = shape.is_boxed();
    let width = (props.field_size as usize).max(if boxed { 3 } else { 1 });
    let row_count = if boxed { 3 } else { 2 };
    let count = group.field_count();
    let total = count * width + (count - 1) * SLOT_GAP;

    let mut rows = vec![vec![Cell::default(); total]; row_count];

    for (index, slot) in group.slots().iter().enumerate() {
        let x0 = index * (width + SLOT_GAP);
        let visual = slot.visual();
        let (h, v, tl, tr, br, bl) = visual.shape.chars(heavy);

        // Content cell: the slot character, or the cursor when this slot is
        // the focused empty one.
        let mut content = None;
        let mut content_fg = Rgba::TERMINAL_DEFAULT;
        let mut content_attrs = visual.attrs;
        if let Some(ch) = slot.text().chars().next() {
            content = Some(ch);
        } else if props.require_cursor && group.is_focused(index) {
            content = Some(CURSOR_GLYPH);
            content_fg = props.cursor_color;
            content_attrs = Attr::NONE;
        }

        if boxed {
            border_row(&mut rows[0][x0..x0 + width], tl, h, tr, &visual);
            content_row(
                &mut rows[1][x0..x0 + width],
                Some(first_char(v)),
                content,
                content_fg,
                content_attrs,
                &visual,
            );
            border_row(&mut rows[2][x0..x0 + width], bl, h, br, &visual);
        } else {
            content_row(
                &mut rows[0][x0..x0 + width],
                None,
                content,
                content_fg,
                content_attrs,
                &visual,
            );
            border_row(&mut rows[1][x0..x0 + width], h, h, h, &visual);
        }
    }

    rows
}

fn first_char(s: &str) -> char {
    s.chars().next().unwrap_or(' ')
}

fn border_row(row: &mut [Cell], left: &str, fill: &str, right: &str, visual: &SlotVisual) {
    let last = row.len() - 1;
    for (x, cell) in row.iter_mut().enumerate() {
        let ch = if x == 0 {
            first_char(left)
        } else if x == last {
            first_char(right)
        } else {
            first_char(fill)
        };
        *cell = Cell {
            ch,
            fg: visual.border,
            bg: visual.bg,
            attrs: Attr::NONE,
        };
    }
}

fn content_row(
    row: &mut [Cell],
    side: Option<char>,
    content: Option<char>,
    content_fg: Rgba,
    content_attrs: Attr,
    visual: &SlotVisual,
) {
    let last = row.len() - 1;
    for (x, cell) in row.iter_mut().enumerate() {
        let is_side = side.is_some() && (x == 0 || x == last);
        *cell = Cell {
            ch: if is_side { side.unwrap_or(' ') } else { ' ' },
            fg: if is_side { visual.border } else { Rgba::TERMINAL_DEFAULT },
            bg: visual.bg,
            attrs: Attr::NONE,
        };
    }

    if let Some(ch) = content {
        let inset = usize::from(side.is_some());
        let inner = row.len() - 2 * inset;
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
        let pad = inner.saturating_sub(ch_width) / 2;
        let x = inset + pad;
        row[x] = Cell {
            ch,
            fg: content_fg,
            bg: visual.bg,
            attrs: content_attrs,
        };
    }
}

// =============================================================================
// Render
// =============================================================================

fn terminal_color(color: Rgba) -> Color {
    if color.is_terminal_default() || color.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r as u8,
            g: color.g as u8,
            b: color.b as u8,
        }
    }
}

fn apply_attrs<W: Write>(out: &mut W, attrs: Attr) -> io::Result<()> {
    if attrs.contains(Attr::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if attrs.contains(Attr::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if attrs.contains(Attr::ITALIC) {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if attrs.contains(Attr::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

/// Flush the composed slot row to a writer.
///
/// Colors and attributes are only re-emitted when they change between cells.
pub fn render<W: Write>(group: &FieldGroup, out: &mut W) -> io::Result<()> {
    for row in compose(group) {
        let mut fg = None;
        let mut bg = None;
        let mut attrs = Attr::NONE;
        for cell in row {
            if cell.attrs != attrs {
                // Attribute reset clears colors too; re-emit them below.
                queue!(out, SetAttribute(Attribute::Reset))?;
                apply_attrs(out, cell.attrs)?;
                attrs = cell.attrs;
                fg = None;
                bg = None;
            }
            if fg != Some(cell.fg) {
                queue!(out, SetForegroundColor(terminal_color(cell.fg)))?;
                fg = Some(cell.fg);
            }
            if bg != Some(cell.bg) {
                queue!(out, SetBackgroundColor(terminal_color(cell.bg)))?;
                bg = Some(cell.bg);
            }
            queue!(out, Print(cell.ch))?;
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor, Print('\n'))?;
    }
    out.flush()
}

/// Row height of a group as composed - 3 for boxed shapes, 2 for underlined.
pub fn row_height(group: &FieldGroup) -> usize {
    match group.slots().first().map(|slot| slot.visual().shape) {
        Some(SlotShape::Underline) => 2,
        Some(_) => 3,
        None => 0,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldGroupProps;
    use crate::types::DisplayStyle;

    fn group(props: FieldGroupProps) -> FieldGroup {
        FieldGroup::new(props).unwrap()
    }

    #[test]
    fn test_compose_boxed_dimensions() {
        let group = group(FieldGroupProps::new(4));
        let rows = compose(&group);

        assert_eq!(rows.len(), 3);
        // 4 slots of 5 cells plus 3 gaps
        for row in &rows {
            assert_eq!(row.len(), 4 * 5 + 3 * SLOT_GAP);
        }
    }

    #[test]
    fn test_compose_rounded_corners() {
        let group = group(FieldGroupProps::new(2));
        let rows = compose(&group);

        assert_eq!(rows[0][0].ch, '╭');
        assert_eq!(rows[0][4].ch, '╮');
        assert_eq!(rows[2][0].ch, '╰');
        assert_eq!(rows[2][4].ch, '╯');
        assert_eq!(rows[1][0].ch, '│');
        // Gap column stays default
        assert_eq!(rows[0][5], Cell::default());
    }

    #[test]
    fn test_compose_heavy_square() {
        let group = group(FieldGroupProps {
            display_style: DisplayStyle::Square,
            border_width: 2,
            ..FieldGroupProps::new(2)
        });
        let rows = compose(&group);

        assert_eq!(rows[0][0].ch, '┏');
        assert_eq!(rows[0][1].ch, '━');
        assert_eq!(rows[1][0].ch, '┃');
    }

    #[test]
    fn test_compose_underlined_dimensions() {
        let group = group(FieldGroupProps {
            display_style: DisplayStyle::Underlined,
            ..FieldGroupProps::new(3)
        });
        let rows = compose(&group);

        assert_eq!(rows.len(), 2);
        // Bottom line spans the slot, no side borders on the content row
        assert_eq!(rows[1][0].ch, '─');
        assert_eq!(rows[1][4].ch, '─');
        assert_eq!(rows[0][0].ch, ' ');
        // Cursor sits centered in the focused slot's content row
        assert_eq!(rows[0][2].ch, CURSOR_GLYPH);
    }

    #[test]
    fn test_compose_content_centered() {
        let mut g = group(FieldGroupProps::new(4));
        g.handle_edit(0, "7");
        let rows = compose(&g);

        // 5-wide slot, 3-wide interior: the character sits at offset 2
        assert_eq!(rows[1][2].ch, '7');
    }

    #[test]
    fn test_compose_cursor_in_focused_empty_slot() {
        let mut g = group(FieldGroupProps {
            cursor_color: Rgba::BLUE,
            ..FieldGroupProps::new(4)
        });

        let rows = compose(&g);
        assert_eq!(rows[1][2].ch, CURSOR_GLYPH);
        assert_eq!(rows[1][2].fg, Rgba::BLUE);

        // After typing, the cursor follows focus into slot 1
        g.handle_edit(0, "7");
        let rows = compose(&g);
        assert_eq!(rows[1][2].ch, '7');
        assert_eq!(rows[1][8].ch, CURSOR_GLYPH);
    }

    #[test]
    fn test_compose_no_cursor_when_disabled() {
        let g = group(FieldGroupProps {
            require_cursor: false,
            ..FieldGroupProps::new(4)
        });
        let rows = compose(&g);
        assert_eq!(rows[1][2].ch, ' ');
    }

    #[test]
    fn test_compose_masked_glyph() {
        let mut g = group(FieldGroupProps {
            secure_entry: true,
            hide_entered_text: true,
            ..FieldGroupProps::new(4)
        });
        g.handle_edit(0, "7");
        let rows = compose(&g);

        assert_eq!(rows[1][2].ch, '•');
    }

    #[test]
    fn test_compose_content_attrs() {
        let mut g = group(FieldGroupProps {
            text_attrs: Attr::BOLD,
            ..FieldGroupProps::new(4)
        });
        g.handle_edit(0, "7");
        let rows = compose(&g);

        assert!(rows[1][2].attrs.contains(Attr::BOLD));
        // Border cells carry no text attributes
        assert_eq!(rows[0][0].attrs, Attr::NONE);
    }

    #[test]
    fn test_compose_border_colors() {
        let g = group(FieldGroupProps {
            default_border: Rgba::GRAY,
            ..FieldGroupProps::new(2)
        });
        let rows = compose(&g);
        assert_eq!(rows[0][0].fg, Rgba::GRAY);
        assert_eq!(rows[1][0].fg, Rgba::GRAY);
    }

    #[test]
    fn test_compose_minimum_slot_width() {
        let g = group(FieldGroupProps {
            field_size: 1,
            ..FieldGroupProps::new(2)
        });
        let rows = compose(&g);
        // Boxed slots clamp to 3 cells
        assert_eq!(rows[0].len(), 2 * 3 + SLOT_GAP);
    }

    #[test]
    fn test_row_height() {
        assert_eq!(row_height(&group(FieldGroupProps::new(4))), 3);
        assert_eq!(
            row_height(&group(FieldGroupProps {
                display_style: DisplayStyle::Underlined,
                ..FieldGroupProps::new(4)
            })),
            2
        );
    }

    #[test]
    fn test_render_smoke() {
        let mut g = group(FieldGroupProps::new(4));
        g.handle_edit(0, "7");

        let mut out: Vec<u8> = Vec::new();
        render(&g, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('7'));
        assert!(text.contains('╭'));
        assert_eq!(text.matches('\n').count(), 3);
    }
}
