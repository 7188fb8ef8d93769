//! Markup serialisation.
//!
//! Output is compact: no declaration, no indentation, and childless elements
//! are written in the self-closing form.
//!
//! Parsers normalise literal line breaks and tabs inside attribute values to
//! spaces, and carriage returns anywhere to line feeds. Those characters are
//! written as character references so values survive a re-parse.

use std::fmt::{self, Display, Formatter, Write};

use crate::element::{Document, Element, Node};

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('<')?;
        f.write_str(self.name())?;
        for (name, value) in self.attributes() {
            write!(f, " {name}=\"")?;
            write_escaped(f, value, true)?;
            f.write_char('"')?;
        }
        if self.children().is_empty() {
            return f.write_str("/>");
        }
        f.write_char('>')?;
        for node in self.children() {
            match node {
                Node::Element(child) => Display::fmt(child, f)?,
                Node::Text(text) => write_escaped(f, text, false)?,
            }
        }
        write!(f, "</{}>", self.name())
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.root(), f)
    }
}

fn write_escaped(f: &mut Formatter<'_>, raw: &str, in_attribute: bool) -> fmt::Result {
    for ch in raw.chars() {
        match ch {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' if in_attribute => f.write_str("&quot;")?,
            '\n' if in_attribute => f.write_str("&#10;")?,
            '\t' if in_attribute => f.write_str("&#9;")?,
            '\r' => f.write_str("&#13;")?,
            other => f.write_char(other)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{Document, Element};

    #[rstest]
    fn escapes_markup_in_text_and_attributes() {
        let element = Element::new("command")
            .with_attribute("note", "say \"hi\" & <bye>")
            .with_text("show route | match <10.0.0.0>");

        assert_eq!(
            element.to_string(),
            "<command note=\"say &quot;hi&quot; &amp; &lt;bye&gt;\">\
             show route | match &lt;10.0.0.0&gt;</command>"
        );
    }

    #[rstest]
    fn attribute_layout_characters_survive_a_reparse() {
        let element = Element::new("annotate").with_attribute("comment", "x\ny\tz\r");
        let markup = element.to_string();
        assert_eq!(markup, "<annotate comment=\"x&#10;y&#9;z&#13;\"/>");

        let reparsed = Document::parse(&markup).expect("reparse");
        assert_eq!(reparsed.root().attribute("comment"), Some("x\ny\tz\r"));
    }

    #[rstest]
    fn text_keeps_line_feeds_and_carriage_returns() {
        let element = Element::new("configuration-text").with_text("a\r\nb\tc");
        let markup = element.to_string();
        assert_eq!(markup, "<configuration-text>a&#13;\nb\tc</configuration-text>");

        let reparsed = Document::parse(&markup).expect("reparse");
        assert_eq!(reparsed.root().text(), "a\r\nb\tc");
    }

    #[rstest]
    fn childless_elements_self_close() {
        let element = Element::new("commit-configuration").with_attribute("check", "");
        assert_eq!(element.to_string(), "<commit-configuration check=\"\"/>");
    }
}
