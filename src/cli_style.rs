use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use guchi_name_server::naming::NameCard;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    let accent = |color: AnsiColor| Style::new().bold().fg_color(Some(Color::Ansi(color)));
    Styles::styled()
        .usage(accent(AnsiColor::Yellow).underline())
        .header(accent(AnsiColor::Yellow).underline())
        .literal(accent(AnsiColor::Green))
        .invalid(accent(AnsiColor::Red))
        .error(accent(AnsiColor::Red))
        .valid(accent(AnsiColor::Green))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Palette: ink, cinnabar and jade
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const CINNABAR: Color = Color::Rgb {
        r: 227,
        g: 66,
        b: 52,
    };
    pub const JADE: Color = Color::Rgb {
        r: 0,
        g: 168,
        b: 107,
    };
    pub const GOLD: Color = Color::Rgb {
        r: 212,
        g: 175,
        b: 55,
    };
    pub const INK: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const PAPER: Color = Color::Rgb {
        r: 250,
        g: 245,
        b: 230,
    };
}

pub mod box_chars {
    pub const TOP_LEFT: &str = "╭";
    pub const TOP_RIGHT: &str = "╮";
    pub const BOTTOM_LEFT: &str = "╰";
    pub const BOTTOM_RIGHT: &str = "╯";
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";
    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
    pub const SEAL: &str = "◆";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.with(colors::JADE).bold(),
        message.with(colors::JADE)
    );
}

pub fn print_error(message: &str) {
    eprintln!(
        " {} {}",
        box_chars::CROSS_MARK.with(colors::CINNABAR).bold(),
        message.with(colors::CINNABAR)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::GOLD).bold(),
        message.with(colors::GOLD)
    );
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::GOLD),
        format!("{}:", key).with(colors::INK),
        value.with(colors::PAPER)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::INK),
        message.with(colors::INK).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Section Headers
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 60;

pub fn print_section_header(title: &str) {
    let title_width = title.width();
    let left = SECTION_WIDTH.saturating_sub(title_width + 2) / 2;
    let right = SECTION_WIDTH.saturating_sub(title_width + 2 + left);

    println!();
    println!(
        "{}{} {} {}{}",
        box_chars::TOP_LEFT.with(colors::CINNABAR),
        box_chars::HORIZONTAL.repeat(left).with(colors::CINNABAR),
        title.with(colors::CINNABAR).bold(),
        box_chars::HORIZONTAL.repeat(right).with(colors::CINNABAR),
        box_chars::TOP_RIGHT.with(colors::CINNABAR)
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        box_chars::BOTTOM_LEFT.with(colors::CINNABAR),
        box_chars::HORIZONTAL
            .repeat(SECTION_WIDTH)
            .with(colors::CINNABAR),
        box_chars::BOTTOM_RIGHT.with(colors::CINNABAR)
    );
    println!();
}

/// Cuts `text` to at most `max_width` terminal columns, marking the cut with
/// an ellipsis.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table Display
// ═══════════════════════════════════════════════════════════════════════════════

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: &[&str]) -> Self {
        TableBuilder {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            col_widths: headers.iter().map(|h| h.width()).collect(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.width());
        }
        self.rows.push(row);
    }

    fn border(&self, left: &str, junction: &str, right: &str) -> String {
        let segments: Vec<String> = self
            .col_widths
            .iter()
            .map(|width| box_chars::HORIZONTAL.repeat(width + 2))
            .collect();
        format!("{}{}{}", left, segments.join(junction), right)
    }

    fn print_cells(&self, cells: &[String], header: bool) {
        print!("{}", box_chars::VERTICAL.with(colors::INK));
        for (i, width) in self.col_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let padding = " ".repeat(width.saturating_sub(cell.width()));
            if header {
                print!(" {}{} ", cell.with(colors::GOLD).bold(), padding);
            } else {
                print!(" {}{} ", cell.with(colors::PAPER), padding);
            }
            print!("{}", box_chars::VERTICAL.with(colors::INK));
        }
        println!();
    }

    pub fn print(&self) {
        use box_chars::*;

        println!("{}", self.border(TOP_LEFT, T_TOP, TOP_RIGHT).with(colors::INK));
        self.print_cells(&self.headers, true);
        println!("{}", self.border(T_LEFT, CROSS, T_RIGHT).with(colors::INK));
        for row in &self.rows {
            self.print_cells(row, false);
        }
        println!(
            "{}",
            self.border(BOTTOM_LEFT, T_BOTTOM, BOTTOM_RIGHT)
                .with(colors::INK)
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Name Cards
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_name_card(card: &NameCard) {
    println!(
        "  {} {}  {}",
        box_chars::SEAL.with(colors::CINNABAR),
        card.name.as_str().with(colors::CINNABAR).bold(),
        card.pronunciation.as_str().with(colors::INK)
    );
    println!(
        "      {}",
        format!(
            "《{}》 {} · {} [{}]",
            card.source.title, card.source.dynasty, card.source.author, card.source.source_set
        )
        .with(colors::GOLD)
    );
    if !card.line_cn.is_empty() {
        println!("      {}", card.line_cn.as_str().with(colors::PAPER));
    }
    println!(
        "      {}",
        card.meaning
            .as_str()
            .with(colors::PAPER)
            .attribute(Attribute::Italic)
    );
    println!();
}
