use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    let bold = |color: AnsiColor| Style::new().bold().fg_color(Some(Color::Ansi(color)));

    Styles::styled()
        .usage(bold(AnsiColor::Magenta).underline())
        .header(bold(AnsiColor::Magenta).underline())
        .literal(bold(AnsiColor::Green))
        .invalid(bold(AnsiColor::Red))
        .error(bold(AnsiColor::Red))
        .valid(bold(AnsiColor::Green))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette - Dusk
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const TEAL: Color = Color::Rgb {
        r: 64,
        g: 200,
        b: 190,
    };
    pub const VIOLET: Color = Color::Rgb {
        r: 150,
        g: 110,
        b: 230,
    };
    pub const ROSE: Color = Color::Rgb {
        r: 240,
        g: 110,
        b: 150,
    };
    pub const AMBER: Color = Color::Rgb {
        r: 250,
        g: 180,
        b: 60,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 90,
        g: 220,
        b: 120,
    };
    pub const RED: Color = Color::Rgb {
        r: 240,
        g: 70,
        b: 70,
    };
    pub const DIM: Color = Color::Rgb {
        r: 120,
        g: 120,
        b: 140,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 235,
        g: 235,
        b: 240,
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
    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";

    pub const ARROW_RIGHT: &str = "▶";
    pub const BULLET: &str = "●";
    pub const DIAMOND: &str = "◆";
    pub const NOTE: &str = "♪";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
    pub const BAR_FULL: &str = "█";
    pub const BAR_EMPTY: &str = "░";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_banner() {
    let banner = r#"
    ╔╦╗╔═╗╔═╗╔╦╗   ╔═╗╔═╗╔╦╗╔═╗╔═╗╔═╗╔═╗╦═╗
    ║║║║ ║║ ║ ║║   ║  ║ ║║║║╠═╝║ ║╚═╗║╣ ╠╦╝
    ╩ ╩╚═╝╚═╝═╩╝   ╚═╝╚═╝╩ ╩╩  ╚═╝╚═╝╚═╝╩╚═
"#;

    let gradient_colors = [colors::TEAL, colors::TEAL, colors::VIOLET, colors::ROSE];
    for (i, line) in banner.lines().enumerate() {
        let color = gradient_colors.get(i).unwrap_or(&colors::TEAL);
        println!("{}", line.with(*color).bold());
    }

    let subtitle = "    ♪ ♫ ♪  from words to tempo, key and timbre  ♪ ♫ ♪";
    println!("{}", subtitle.with(colors::DIM));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    eprintln!(
        " {} {}",
        box_chars::CROSS_MARK.with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::AMBER).bold(),
        message.with(colors::AMBER)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Section Headers
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 60;

pub fn print_section_header(title: &str) {
    let title_len = title.width();
    let padding = SECTION_WIDTH.saturating_sub(title_len + 4) / 2;

    println!();
    print!("{}", box_chars::ROUND_TOP_LEFT.with(colors::TEAL));
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL.repeat(padding).with(colors::TEAL)
    );
    print!(
        " {} ",
        title.with(colors::TEAL).bold().attribute(Attribute::Italic)
    );
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL
            .repeat(SECTION_WIDTH.saturating_sub(title_len + 4 + padding))
            .with(colors::TEAL)
    );
    println!("{}", box_chars::ROUND_TOP_RIGHT.with(colors::TEAL));
}

pub fn print_section_footer() {
    print!("{}", box_chars::ROUND_BOTTOM_LEFT.with(colors::TEAL));
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL
            .repeat(SECTION_WIDTH)
            .with(colors::TEAL)
    );
    println!("{}", box_chars::ROUND_BOTTOM_RIGHT.with(colors::TEAL));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Key-Value Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::VIOLET),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_key_value_highlight(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::DIAMOND.with(colors::ROSE),
        format!("{}:", key).with(colors::TEAL).bold(),
        value.with(colors::GREEN).bold()
    );
}

pub fn print_list_item(item: &str, indent: usize) {
    let indent_str = "  ".repeat(indent);
    println!(
        "{}{}  {}",
        indent_str,
        box_chars::ARROW_RIGHT.with(colors::TEAL),
        item.with(colors::WHITE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Score Bars
// ═══════════════════════════════════════════════════════════════════════════════

/// Render `fraction` (clamped to [0, 1]) as a bar `width` cells wide.
pub fn render_bar(fraction: f32, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f32).round() as usize;
    format!(
        "{}{}",
        box_chars::BAR_FULL.repeat(filled),
        box_chars::BAR_EMPTY.repeat(width - filled)
    )
}

/// Labelled bar, e.g. an energy level out of ten or a similarity score.
pub fn print_score_bar(label: &str, fraction: f32, value: &str) {
    println!(
        "  {} {:<11} {} {}",
        box_chars::NOTE.with(colors::VIOLET),
        label.with(colors::DIM),
        render_bar(fraction, 24).with(colors::TEAL),
        value.with(colors::WHITE)
    );
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
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        TableBuilder {
            headers: headers.into_iter().map(String::from).collect(),
            rows: Vec::new(),
            col_widths,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(cell.width());
            }
        }
        self.rows.push(row);
    }

    fn print_border(&self, left: &str, joint: &str, right: &str) {
        print!("{}", left.with(colors::TEAL));
        for (i, width) in self.col_widths.iter().enumerate() {
            print!(
                "{}",
                box_chars::SINGLE_HORIZONTAL
                    .repeat(width + 2)
                    .with(colors::TEAL)
            );
            if i + 1 < self.col_widths.len() {
                print!("{}", joint.with(colors::TEAL));
            }
        }
        println!("{}", right.with(colors::TEAL));
    }

    pub fn print(&self) {
        self.print_border(
            box_chars::ROUND_TOP_LEFT,
            box_chars::T_TOP,
            box_chars::ROUND_TOP_RIGHT,
        );

        print!("{}", box_chars::SINGLE_VERTICAL.with(colors::TEAL));
        for (i, header) in self.headers.iter().enumerate() {
            let padding = self.col_widths[i].saturating_sub(header.width());
            print!(
                " {}{} ",
                header.clone().with(colors::TEAL).bold(),
                " ".repeat(padding)
            );
            print!("{}", box_chars::SINGLE_VERTICAL.with(colors::TEAL));
        }
        println!();

        self.print_border(box_chars::T_LEFT, box_chars::CROSS, box_chars::T_RIGHT);

        for row in &self.rows {
            print!("{}", box_chars::SINGLE_VERTICAL.with(colors::TEAL));
            for (i, cell) in row.iter().enumerate() {
                let width = self.col_widths.get(i).copied().unwrap_or(0);
                let padding = width.saturating_sub(cell.width());
                print!(" {}{} ", cell.clone().with(colors::WHITE), " ".repeat(padding));
                print!("{}", box_chars::SINGLE_VERTICAL.with(colors::TEAL));
            }
            println!();
        }

        self.print_border(
            box_chars::ROUND_BOTTOM_LEFT,
            box_chars::T_BOTTOM,
            box_chars::ROUND_BOTTOM_RIGHT,
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt Styling
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!(
        "{}{} ",
        box_chars::NOTE.with(colors::TEAL).bold(),
        "❯".with(colors::VIOLET).bold(),
    )
}

pub fn print_command_echo(command: &str) {
    println!(
        "{}{}  {}",
        box_chars::NOTE.with(colors::TEAL).bold(),
        "❯".with(colors::VIOLET).bold(),
        command.with(colors::GREEN).bold()
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Welcome Message
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_welcome(details: &[(&str, String)]) {
    print_banner();
    print_section_header("Session");
    for (key, value) in details {
        print_key_value(key, value);
    }
    println!(
        "  {}",
        "Type 'help' for available commands".with(colors::DIM)
    );
    print_section_footer();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Help Display
// ═══════════════════════════════════════════════════════════════════════════════

pub struct CommandHelp {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
    pub group: CommandGroup,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Analysis,
    Reference,
    Session,
}

pub fn print_help(commands: &[CommandHelp]) {
    println!();
    print_section_header("Available Commands");
    println!();

    fn print_command_group(title: &str, commands: &[&CommandHelp], color: CtColor) {
        if commands.is_empty() {
            return;
        }
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

    let groups = [
        (CommandGroup::Analysis, "Analysis", colors::TEAL),
        (CommandGroup::Reference, "Reference", colors::VIOLET),
        (CommandGroup::Session, "Session", colors::AMBER),
    ];
    for (group, title, color) in groups {
        let members: Vec<&CommandHelp> = commands.iter().filter(|c| c.group == group).collect();
        print_command_group(title, &members, color);
    }

    print_section_footer();
}

pub fn print_goodbye() {
    println!();
    println!(
        "  {} {}",
        box_chars::NOTE.with(colors::TEAL),
        "Goodbye! Keep the music playing.".with(colors::VIOLET).bold()
    );
    println!();
}

pub fn flush() {
    let _ = io::stdout().flush();
}
