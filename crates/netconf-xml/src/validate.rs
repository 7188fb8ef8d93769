//! XML 1.0 name and character checks.
//!
//! Construction never validates, so builders stay infallible. Code that
//! places caller-supplied strings into a tree checks them here, or checks
//! the finished tree with [`Element::validate`](crate::Element::validate),
//! before the markup leaves the process.

/// Reports whether `name` is a valid XML 1.0 element or attribute name.
///
/// Qualified names such as `junos:comment` are accepted.
///
/// ```
/// use netconf_xml::is_name;
///
/// assert!(is_name("confirm-timeout"));
/// assert!(is_name("junos:comment"));
/// assert!(!is_name("bad name"));
/// assert!(!is_name("1st"));
/// ```
#[must_use]
pub fn is_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start) && chars.all(is_name_char)
}

/// Reports whether every character of `text` may appear in an XML 1.0
/// document.
///
/// Control characters other than tab, line feed and carriage return are
/// rejected, as are the non-characters U+FFFE and U+FFFF.
#[must_use]
pub fn is_text(text: &str) -> bool {
    text.chars().all(is_xml_char)
}

const fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

const fn is_name_start(ch: char) -> bool {
    matches!(
        ch,
        ':' | 'A'..='Z'
            | '_'
            | 'a'..='z'
            | '\u{C0}'..='\u{D6}'
            | '\u{D8}'..='\u{F6}'
            | '\u{F8}'..='\u{2FF}'
            | '\u{370}'..='\u{37D}'
            | '\u{37F}'..='\u{1FFF}'
            | '\u{200C}'..='\u{200D}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{EFFFF}'
    )
}

const fn is_name_char(ch: char) -> bool {
    is_name_start(ch)
        || matches!(
            ch,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}
