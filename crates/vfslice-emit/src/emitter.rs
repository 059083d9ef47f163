use anyhow::Result;
use std::io::Write;

pub type EmitResult = Result<()>;

#[derive(Debug, Clone)]
pub struct EmitContext {
    pub indent_level: usize,
    pub use_colors: bool,
}

impl EmitContext {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            use_colors: false,
        }
    }

    pub fn colored() -> Self {
        Self {
            use_colors: true,
            ..Self::new()
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn prefix(&self) -> String {
        "    ".repeat(self.indent_level)
    }
}

impl Default for EmitContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that can render itself to a writer.
pub trait Emittable {
    fn emit<W: Write>(&self, writer: &mut W, context: &mut EmitContext) -> EmitResult;

    fn to_formatted_string(&self, context: &mut EmitContext) -> Result<String> {
        let mut buffer = Vec::new();
        self.emit(&mut buffer, context)?;
        Ok(String::from_utf8(buffer)?)
    }
}

pub(crate) fn write_line<W: Write>(
    writer: &mut W,
    context: &EmitContext,
    text: &str,
) -> EmitResult {
    writeln!(writer, "{}{}", context.prefix(), text)?;
    Ok(())
}

pub(crate) fn write_section<W: Write>(
    writer: &mut W,
    context: &EmitContext,
    title: &str,
) -> EmitResult {
    let header = format!("=== {} ===", title);
    if context.use_colors {
        use colored::Colorize;
        writeln!(writer, "{}{}", context.prefix(), header.bright_cyan())?;
    } else {
        writeln!(writer, "{}{}", context.prefix(), header)?;
    }
    Ok(())
}
