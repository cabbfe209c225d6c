use std::io::IsTerminal;

use termimad::{crossterm::style::Color, Alignment, MadSkin};

pub fn print_md(s: impl AsRef<str>) {
    let mut printer = MarkdownPrinter::new();
    printer.add(s);
    printer.dump();
}

/// Collects Markdown and renders it with terminal styling, or as plain text when stdout is piped.
pub struct MarkdownPrinter {
    content: String,
}

impl MarkdownPrinter {
    pub fn new() -> Self {
        Self {
            content: String::new(),
        }
    }

    fn skin() -> MadSkin {
        let mut skin = MadSkin::default();
        for header in skin.headers.iter_mut() {
            header.align = Alignment::Left;
            header.set_fg(Color::Cyan);
        }
        skin.headers[0].set_bg(Color::DarkCyan);
        skin.headers[0].set_fg(Color::White);
        skin
    }

    pub fn dump(&self) {
        if std::io::stdout().is_terminal() {
            Self::skin().print_text(&self.content);
        } else {
            println!("{}", self.content);
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn add(&mut self, s: impl AsRef<str>) {
        self.content.push_str(s.as_ref());
    }

    /// Append a Markdown table. Every row must have as many cells as `header`.
    pub fn add_table<R, C>(&mut self, header: &[&str], rows: R)
    where
        R: IntoIterator<Item = Vec<C>>,
        C: AsRef<str>,
    {
        self.add(format!("|{}|\n", header.join("|")));
        self.add(format!("|{}|\n", vec!["-"; header.len()].join("|")));
        for row in rows {
            let cells = row.iter().map(|c| c.as_ref()).collect::<Vec<_>>();
            self.add(format!("|{}|\n", cells.join("|")));
        }
    }
}

#[macro_export]
macro_rules! print_md {
    ($($arg:tt)*) => {
        $crate::utils::md::print_md(format!($($arg)*));
    };
}
