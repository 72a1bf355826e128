use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use jobscroll::render::{JobCardView, OptionsView};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    let heading = Style::new()
        .bold()
        .underline()
        .fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
    let good = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)));
    let bad = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Red)));

    Styles::styled()
        .usage(heading)
        .header(heading)
        .literal(good)
        .valid(good)
        .invalid(bad)
        .error(bad)
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const TEAL: Color = Color::Rgb {
        r: 0,
        g: 200,
        b: 200,
    };
    pub const INDIGO: Color = Color::Rgb {
        r: 120,
        g: 110,
        b: 240,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 220,
        b: 130,
    };
    pub const AMBER: Color = Color::Rgb {
        r: 255,
        g: 180,
        b: 0,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const BLUE: Color = Color::Rgb {
        r: 100,
        g: 149,
        b: 237,
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

pub mod box_chars {
    pub const DOUBLE_TOP_LEFT: &str = "╔";
    pub const DOUBLE_TOP_RIGHT: &str = "╗";
    pub const DOUBLE_BOTTOM_LEFT: &str = "╚";
    pub const DOUBLE_BOTTOM_RIGHT: &str = "╝";
    pub const DOUBLE_HORIZONTAL: &str = "═";
    pub const DOUBLE_VERTICAL: &str = "║";

    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";

    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";

    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";

    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const DIAMOND: &str = "◆";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

fn print_marked(mark: &str, color: CtColor, message: &str) {
    println!(" {} {}", mark.with(color).bold(), message.with(color));
}

pub fn print_success(message: &str) {
    print_marked(box_chars::CHECK, colors::GREEN, message);
}

pub fn print_error(message: &str) {
    print_marked(box_chars::CROSS_MARK, colors::RED, message);
}

pub fn print_warning(message: &str) {
    print_marked("⚠", colors::AMBER, message);
}

pub fn print_info(message: &str) {
    print_marked("ℹ", colors::BLUE, message);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 72;

pub fn print_section_header(title: &str) {
    let title_len = title.width();
    let left = SECTION_WIDTH.saturating_sub(title_len + 2) / 2;
    let right = SECTION_WIDTH.saturating_sub(title_len + 2 + left);

    println!();
    println!(
        "{}{} {} {}{}",
        box_chars::ROUND_TOP_LEFT.with(colors::TEAL),
        box_chars::HORIZONTAL.repeat(left).with(colors::TEAL),
        title.with(colors::TEAL).bold().attribute(Attribute::Italic),
        box_chars::HORIZONTAL.repeat(right).with(colors::TEAL),
        box_chars::ROUND_TOP_RIGHT.with(colors::TEAL)
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        box_chars::ROUND_BOTTOM_LEFT.with(colors::TEAL),
        box_chars::HORIZONTAL
            .repeat(SECTION_WIDTH)
            .with(colors::TEAL),
        box_chars::ROUND_BOTTOM_RIGHT.with(colors::TEAL)
    );
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::INDIGO),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Job Cards
// ═══════════════════════════════════════════════════════════════════════════════

/// Print one job card. `index` is the 1-based position in the visible list.
pub fn print_job_card(index: usize, card: &JobCardView) {
    print_section_header(&format!("#{} {}", index, card.company));
    println!(
        "  {}  {}",
        card.role.clone().with(colors::WHITE).bold(),
        card.location.clone().with(colors::DIM)
    );
    println!("  {}", card.salary.clone().with(colors::GREEN));
    println!();
    println!("  {}", "About Company:".with(colors::TEAL).bold());
    for line in wrap(&card.about, SECTION_WIDTH - 4) {
        println!("  {}", line);
    }
    if card.expandable {
        println!(
            "  {}",
            format!("(show {} for the full description)", index)
                .with(colors::DIM)
                .attribute(Attribute::Italic)
        );
    }
    println!();
    print_key_value("Minimum Experience", &card.min_experience);
    if !card.link.is_empty() {
        print_key_value("Apply", &card.link);
    }
    print_section_footer();
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn print_options(options: &OptionsView) {
    print_section_header("Filter Options");
    print_option_group("min-exp", &options.experience);
    print_option_group("location", &options.locations);
    print_option_group("role", &options.roles);
    print_option_group("min-pay", &options.min_pay);
    print_section_footer();
}

fn print_option_group(filter_name: &str, values: &[String]) {
    println!(
        "  {} {}",
        box_chars::DIAMOND.with(colors::INDIGO),
        filter_name.with(colors::INDIGO).bold()
    );
    if values.is_empty() {
        print_empty_list("none yet");
    } else {
        println!("      {}", values.join(", ").with(colors::WHITE));
    }
}

/// Footer under the job list: loading, end of results, or no matches.
pub fn print_list_footer(line: &str) {
    println!("  {}", line.with(colors::DIM).attribute(Attribute::Italic));
    println!();
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

    fn print_border(&self, left: &str, junction: &str, right: &str) {
        let segments: Vec<String> = self
            .col_widths
            .iter()
            .map(|w| box_chars::HORIZONTAL.repeat(w + 2))
            .collect();
        println!(
            "{}",
            format!("{}{}{}", left, segments.join(junction), right).with(colors::TEAL)
        );
    }

    fn print_cells(&self, cells: &[String], header: bool) {
        print!("{}", box_chars::VERTICAL.with(colors::TEAL));
        for (i, width) in self.col_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let padded = format!(" {}{} ", cell, " ".repeat(width - cell.width()));
            if header {
                print!("{}", padded.with(colors::TEAL).bold());
            } else {
                print!("{}", padded.with(colors::WHITE));
            }
            print!("{}", box_chars::VERTICAL.with(colors::TEAL));
        }
        println!();
    }

    pub fn print(&self) {
        self.print_border(
            box_chars::ROUND_TOP_LEFT,
            box_chars::T_TOP,
            box_chars::ROUND_TOP_RIGHT,
        );
        self.print_cells(&self.headers, true);
        self.print_border(box_chars::T_LEFT, box_chars::CROSS, box_chars::T_RIGHT);
        for row in &self.rows {
            self.print_cells(row, false);
        }
        self.print_border(
            box_chars::ROUND_BOTTOM_LEFT,
            box_chars::T_BOTTOM,
            box_chars::ROUND_BOTTOM_RIGHT,
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt, Welcome, Help
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!(
        "{}{} ",
        "jobs".with(colors::TEAL).bold(),
        "❯".with(colors::INDIGO).bold()
    )
}

pub fn print_welcome(endpoint: &str) {
    let box_width: usize = 68;
    let border = box_chars::DOUBLE_HORIZONTAL.repeat(box_width);

    let print_line = |content: String, visible_width: usize| {
        println!(
            "  {}{}{}{}",
            box_chars::DOUBLE_VERTICAL.with(colors::INDIGO),
            content,
            " ".repeat(box_width.saturating_sub(visible_width)),
            box_chars::DOUBLE_VERTICAL.with(colors::INDIGO)
        );
    };

    println!();
    println!(
        "  {}{}{}",
        box_chars::DOUBLE_TOP_LEFT.with(colors::INDIGO),
        border.clone().with(colors::INDIGO),
        box_chars::DOUBLE_TOP_RIGHT.with(colors::INDIGO)
    );

    let title = "  JOBSCROLL  job listings, one page at a time";
    print_line(title.with(colors::TEAL).bold().to_string(), title.width());
    print_line(String::new(), 0);

    for (key, value) in [("Source", endpoint), ("Version", env!("APP_VERSION"))] {
        let plain = format!("  {}: {}", key, value);
        let styled = format!("  {} {}", format!("{}:", key).with(colors::DIM), value);
        print_line(styled, plain.width());
    }

    print_line(String::new(), 0);
    let hint = "  Type 'help' for available commands";
    print_line(hint.with(colors::DIM).to_string(), hint.width());

    println!(
        "  {}{}{}",
        box_chars::DOUBLE_BOTTOM_LEFT.with(colors::INDIGO),
        border.with(colors::INDIGO),
        box_chars::DOUBLE_BOTTOM_RIGHT.with(colors::INDIGO)
    );
    println!();
}

pub struct CommandHelp {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
}

pub fn print_help(commands: &[CommandHelp]) {
    print_section_header("Available Commands");
    println!();

    let group = |names: &[&str]| -> Vec<&CommandHelp> {
        commands
            .iter()
            .filter(|c| names.contains(&c.name))
            .collect()
    };

    print_command_group(
        "Browsing",
        &group(&["more", "list", "show"]),
        colors::TEAL,
    );
    print_command_group(
        "Filtering",
        &group(&["filter", "unfilter", "search", "options"]),
        colors::INDIGO,
    );
    print_command_group(
        "Session",
        &group(&["status", "help", "exit"]),
        colors::AMBER,
    );

    print_section_footer();
}

fn print_command_group(title: &str, commands: &[&CommandHelp], color: CtColor) {
    println!(
        "  {} {}",
        box_chars::DIAMOND.with(color),
        title.with(color).bold()
    );
    for cmd in commands {
        println!(
            "      {} {}  {}",
            cmd.name.with(colors::GREEN).bold(),
            cmd.args.with(colors::DIM),
            cmd.description.with(colors::WHITE)
        );
    }
    println!();
}

pub fn print_goodbye() {
    println!();
    println!("  {}", "Happy hunting!".with(colors::INDIGO).bold());
    println!();
}
