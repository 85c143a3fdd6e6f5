//! Terminal surface adapter
//!
//! Paints dashboard panels as a rounded box with ANSI styling via `colored`.
//! Every redraw clears the screen first; annotations are appended below.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use crate::dashboard::{display_width, Annotation, Color, Line, Panel, Span};
use crate::ports::DisplaySurface;

/// Clear screen and move the cursor home
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Horizontal padding inside the border
const PADDING: usize = 1;

/// Terminal display surface
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl TerminalSurface<io::Stdout> {
    /// Surface on the process's stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Get the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the surface, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &Line, inner_width: usize, border: Color) -> io::Result<()> {
        let pad = " ".repeat(PADDING);
        write!(self.out, "{}{}", paint("│", border), pad)?;
        for span in &line.spans {
            write!(self.out, "{}", styled(span))?;
        }
        let fill = inner_width.saturating_sub(line.width());
        writeln!(
            self.out,
            "{}{}{}",
            " ".repeat(fill),
            pad,
            paint("│", border)
        )
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn clear(&mut self) -> io::Result<()> {
        write!(self.out, "{}", CLEAR_SCREEN)?;
        self.out.flush()
    }

    fn paint(&mut self, panel: &Panel) -> io::Result<()> {
        let inner_width = panel
            .content_width()
            .max(display_width(&panel.title) + 2)
            .max(display_width(&panel.subtitle) + 2);
        let span = inner_width + 2 * PADDING;

        writeln!(
            self.out,
            "{}",
            paint(&rule('╭', &panel.title, '╮', span, true), panel.border)
        )?;
        for line in &panel.lines {
            self.write_line(line, inner_width, panel.border)?;
        }
        writeln!(
            self.out,
            "{}",
            paint(&rule('╰', &panel.subtitle, '╯', span, false), panel.border)
        )?;
        self.out.flush()
    }

    fn annotate(&mut self, annotation: &Annotation) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {}",
            annotation.label.as_str().red(),
            annotation.detail
        )?;
        self.out.flush()
    }
}

/// Horizontal border with a centered caption
fn rule(left: char, caption: &str, right: char, span: usize, bold: bool) -> String {
    let (caption, caption_width) = if caption.is_empty() {
        (String::new(), 0)
    } else if bold {
        (format!(" {} ", caption.bold()), display_width(caption) + 2)
    } else {
        (format!(" {} ", caption), display_width(caption) + 2)
    };
    let dashes = span.saturating_sub(caption_width);
    let before = dashes / 2;
    let after = dashes - before;
    format!(
        "{}{}{}{}{}",
        left,
        "─".repeat(before),
        caption,
        "─".repeat(after),
        right
    )
}

fn paint(text: &str, color: Color) -> ColoredString {
    match color {
        Color::Blue => text.blue(),
        Color::Green => text.green(),
        Color::Yellow => text.yellow(),
        Color::Red => text.red(),
    }
}

fn styled(span: &Span) -> ColoredString {
    let mut out = match span.style.color {
        Some(color) => paint(&span.text, color),
        None => span.text.normal(),
    };
    if span.style.bold {
        out = out.bold();
    }
    if span.style.blink {
        out = out.blink();
    }
    out
}
