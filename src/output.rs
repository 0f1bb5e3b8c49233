//! Human readable rendering of a stack's contents

use std::fmt::{self, Display, Formatter};
use std::io;
use std::io::Write;

use atty::Stream;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::stack::Stack;

const HEADING: &str = "Stack (top -> bottom):";
const EMPTY: &str = "Stack is empty";

/// Renders `Stack (top -> bottom): v1 v2 ... vn` followed by a
/// `Size: len/capacity` line, or `Stack is empty`
impl<T: Display> Display for Stack<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(EMPTY);
        }

        f.write_str(HEADING)?;

        for value in self.iter() {
            write!(f, " {}", value)?;
        }

        write!(f, "\nSize: {}/{}", self.len(), self.capacity())
    }
}

impl<T: Display> Stack<T> {
    /// Print the contents to stdout, in colour if stdout is a terminal
    pub fn print(&self) {
        let color = if atty::is(Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };

        let mut stdout = StandardStream::stdout(color);
        let _ = self.write_colored(&mut stdout);
    }

    /// Write the same listing as [`Display`], highlighting the heading and
    /// size summary where `out` supports colour
    pub fn write_colored(&self, out: &mut impl WriteColor) -> io::Result<()> {
        if self.is_empty() {
            set_color(out, Color::Yellow, false)?;
            write!(out, "{}", EMPTY)?;
            reset(out)?;
            return writeln!(out);
        }

        set_color(out, Color::Cyan, true)?;
        write!(out, "{}", HEADING)?;
        reset(out)?;

        for value in self.iter() {
            write!(out, " {}", value)?;
        }

        writeln!(out)?;

        set_color(out, Color::Blue, false)?;
        write!(out, "Size: {}/{}", self.len(), self.capacity())?;
        reset(out)?;
        writeln!(out)
    }
}

fn set_color(out: &mut impl WriteColor, color: Color, bold: bool) -> io::Result<()> {
    let mut color_spec = ColorSpec::new();
    color_spec.set_fg(Some(color));
    color_spec.set_bold(bold);
    out.set_color(&color_spec)
}

fn reset(out: &mut impl WriteColor) -> io::Result<()> {
    let mut reset_color = ColorSpec::new();
    reset_color.set_reset(true);
    out.set_color(&reset_color)
}
