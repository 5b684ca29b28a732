//! Text dump of a decoded group list
//!
//! Output is a pure function of the group list and the options: one header line
//! per group, then one line per element in decode order.
//!
//! ```text
//! Group 0x0008 (2 elements)
//!     0x0008  0x0000  ul  length = 4     : 18
//!     0x0008  0x0010  CS  length = 4     : "ORIG"
//! ```
//!
//! An implicit (dictionary-defaulted) VR is printed in lower case.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::config::DumpOptions;
use crate::dictionary::attribute_name;
use crate::types::{Element, Group, GroupList, Value, VrSource};

/// Write the dump of `groups` to `out`
pub fn render<W: Write>(groups: &GroupList, out: &mut W, options: &DumpOptions) -> io::Result<()> {
    for group in groups {
        writeln!(out, "{}", group_line(group))?;
        for element in group.elements() {
            writeln!(out, "{}", element_line(element, options))?;
        }
    }
    out.flush()
}

/// Render the dump into a string
pub fn render_to_string(groups: &GroupList, options: &DumpOptions) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&group_line(group));
        out.push('\n');
        for element in group.elements() {
            out.push_str(&element_line(element, options));
            out.push('\n');
        }
    }
    out
}

fn group_line(group: &Group) -> String {
    let noun = if group.len() == 1 { "element" } else { "elements" };
    format!("Group 0x{:04x} ({} {})", group.id(), group.len(), noun)
}

fn element_line(element: &Element, options: &DumpOptions) -> String {
    let tag = element.tag();
    let code = element.vr().to_string();
    let vr = match element.vr_source() {
        VrSource::Explicit => code.to_string(),
        VrSource::Implicit => code.to_ascii_lowercase(),
    };

    let mut line = format!(
        "    0x{:04x}  0x{:04x}  {}  length = {:<6}: {}",
        tag.group(),
        tag.element(),
        vr,
        element.length(),
        format_value(&element.value(), options)
    );
    if options.show_names {
        if let Some(name) = attribute_name(tag) {
            let _ = write!(line, "  [{}]", name);
        }
    }
    line
}

/// Representation-appropriate text for a value
pub fn format_value(value: &Value, options: &DumpOptions) -> String {
    match value {
        Value::Empty => "<empty>".to_string(),
        Value::Text(text) => format!("\"{}\"", text),
        Value::U16(items) => join(items, options.max_values),
        Value::I16(items) => join(items, options.max_values),
        Value::U32(items) => join(items, options.max_values),
        Value::I32(items) => join(items, options.max_values),
        Value::F32(items) => join(items, options.max_values),
        Value::F64(items) => join(items, options.max_values),
        Value::Tags(items) => {
            let tags: Vec<String> = items
                .iter()
                .map(|t| format!("({:04x},{:04x})", t.group(), t.element()))
                .collect();
            join(&tags, options.max_values)
        }
        Value::Binary(bytes) => hex_preview(bytes, options.max_preview_bytes),
    }
}

fn join<T: std::fmt::Display>(items: &[T], limit: usize) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().take(limit).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", item);
    }
    if items.len() > limit {
        out.push_str(" ...");
    }
    out
}

fn hex_preview(bytes: &[u8], limit: usize) -> String {
    let mut out = String::with_capacity(bytes.len().min(limit) * 3);
    for (i, byte) in bytes.iter().take(limit).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:02x}", byte);
    }
    if bytes.len() > limit {
        out.push_str(" ...");
    }
    out
}
