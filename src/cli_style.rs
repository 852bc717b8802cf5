use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Blue))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Blue))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Magenta))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    /// Algorithm 1 panels.
    pub const BLUE: Color = Color::Rgb {
        r: 59,
        g: 130,
        b: 246,
    };
    /// Algorithm 2 panels.
    pub const PURPLE: Color = Color::Rgb {
        r: 168,
        g: 85,
        b: 247,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 200,
        b: 120,
    };
    pub const ORANGE: Color = Color::Rgb {
        r: 255,
        g: 165,
        b: 0,
    };
    pub const RED: Color = Color::Rgb {
        r: 239,
        g: 68,
        b: 68,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Box Drawing Characters
// ═══════════════════════════════════════════════════════════════════════════════

pub mod box_chars {
    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";
    pub const SINGLE_HORIZONTAL: &str = "─";
    pub const SINGLE_VERTICAL: &str = "│";
    pub const DOUBLE_HORIZONTAL: &str = "═";

    pub const ARROW_RIGHT: &str = "▶";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const NOTE: &str = "♫";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

pub const PANEL_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_banner() {
    let title = format!("{}  Music Retrieval System", box_chars::NOTE);
    println!();
    println!("  {}", title.with(colors::BLUE).bold());
    println!(
        "  {}",
        "JKU Multimedia Search and Retrieval - MMSR25".with(colors::DIM)
    );
    println!(
        "  {}",
        box_chars::DOUBLE_HORIZONTAL
            .repeat(PANEL_WIDTH - 4)
            .with(colors::PURPLE)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.to_string().with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        box_chars::CROSS_MARK.to_string().with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Writer helpers used by the renderer
// ═══════════════════════════════════════════════════════════════════════════════

/// Rounded header line with a centered title, e.g. `╭──── Lyrics-based Results ────╮`.
pub fn write_panel_header<W: Write>(
    out: &mut W,
    title: &str,
    color: crossterm::style::Color,
) -> io::Result<()> {
    let title_len = title.width();
    let padding = PANEL_WIDTH.saturating_sub(title_len + 4) / 2;
    let trailing = PANEL_WIDTH.saturating_sub(title_len + 4 + padding);

    write!(out, "{}", box_chars::ROUND_TOP_LEFT.with(color))?;
    write!(
        out,
        "{}",
        box_chars::SINGLE_HORIZONTAL.repeat(padding).with(color)
    )?;
    write!(out, " {} ", title.with(color).bold())?;
    write!(
        out,
        "{}",
        box_chars::SINGLE_HORIZONTAL.repeat(trailing).with(color)
    )?;
    writeln!(out, "{}", box_chars::ROUND_TOP_RIGHT.with(color))
}

pub fn write_panel_footer<W: Write>(out: &mut W, color: crossterm::style::Color) -> io::Result<()> {
    write!(out, "{}", box_chars::ROUND_BOTTOM_LEFT.with(color))?;
    write!(
        out,
        "{}",
        box_chars::SINGLE_HORIZONTAL.repeat(PANEL_WIDTH).with(color)
    )?;
    writeln!(out, "{}", box_chars::ROUND_BOTTOM_RIGHT.with(color))
}

pub fn write_section_title<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        box_chars::SINGLE_VERTICAL.with(colors::DIM),
        title.with(colors::WHITE).bold().attribute(Attribute::Underlined)
    )
}

pub fn write_key_value<W: Write>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}   {} {} {}",
        box_chars::SINGLE_VERTICAL.with(colors::DIM),
        box_chars::BULLET.with(colors::PURPLE),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    )
}

pub fn write_list_item<W: Write>(out: &mut W, item: &str, detail: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}   {}  {}",
        box_chars::SINGLE_VERTICAL.with(colors::DIM),
        box_chars::ARROW_RIGHT.with(colors::BLUE),
        item.with(colors::WHITE)
    )?;
    if !detail.is_empty() {
        writeln!(
            out,
            "{}      {}",
            box_chars::SINGLE_VERTICAL.with(colors::DIM),
            detail.with(colors::DIM)
        )?;
    }
    Ok(())
}

pub fn write_empty_note<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}   {} {}",
        box_chars::SINGLE_VERTICAL.with(colors::DIM),
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    )
}

/// Pads `text` with spaces up to `width` display columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_to_width_counts_display_columns() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
        assert_eq!(pad_to_width("日本", 6).width(), 6);
    }

    #[test]
    fn test_panel_header_contains_title() {
        let mut out = Vec::new();
        write_panel_header(&mut out, "Audio-based Results", colors::BLUE).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Audio-based Results"));
        assert!(text.contains(box_chars::ROUND_TOP_LEFT));
    }
}
