//! Tagged receipt-markup builder
//!
//! BLE thermal printer drivers on the mobile side consume a small tag
//! dialect instead of raw ESC/POS: a `<Printout>` root with `<Text>`,
//! `<NewLine />` and `<Line />` elements. This builder emits that dialect
//! deterministically, with XML escaping for customer-supplied text.

/// Alignment attribute of a `<Text>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

impl Align {
    fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
        }
    }
}

/// Builder for the tagged markup rendering
pub struct MarkupBuilder {
    buf: String,
}

impl MarkupBuilder {
    pub fn new() -> Self {
        Self {
            buf: String::from("<Printout>\n"),
        }
    }

    /// Emit a `<Text>` element with the given alignment
    pub fn text(&mut self, align: Align, s: &str) -> &mut Self {
        self.buf.push_str("  <Text align=\"");
        self.buf.push_str(align.as_str());
        self.buf.push_str("\">");
        self.buf.push_str(&escape_xml(s));
        self.buf.push_str("</Text>\n");
        self
    }

    /// Emit a centered `<Text>` element
    pub fn text_center(&mut self, s: &str) -> &mut Self {
        self.text(Align::Center, s)
    }

    /// Emit a left-aligned `<Text>` element
    pub fn text_left(&mut self, s: &str) -> &mut Self {
        self.text(Align::Left, s)
    }

    /// Emit a `<NewLine />` element
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push_str("  <NewLine />\n");
        self
    }

    /// Emit n `<NewLine />` elements
    pub fn newlines(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.newline();
        }
        self
    }

    /// Emit a `<Line />` separator drawn with the given character
    pub fn line(&mut self, line_char: char) -> &mut Self {
        self.buf.push_str("  <Line lineChar=\"");
        self.buf.push(line_char);
        self.buf.push_str("\" />\n");
        self
    }

    /// Close the `<Printout>` root and return the document
    pub fn finish(mut self) -> String {
        self.buf.push_str("</Printout>");
        self.buf
    }
}

impl Default for MarkupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
