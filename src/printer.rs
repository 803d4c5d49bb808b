//! mconf-form and JSON-form value printers.

use crate::token::is_bare_key;
use crate::value::Value;

/// The one-line/multi-line fallback threshold: a container shorter than this
/// many characters in its single-line form is always printed inline, even
/// inside a multi-line parent. Decided bottom-up, per SPEC_FULL.md.
const ONE_LINE_THRESHOLD: usize = 16;

/// Renders `v` in mconf form. `indent == 0` forces a fully single-line
/// rendering; otherwise each level is indented by `indent` spaces, with
/// containers under [`ONE_LINE_THRESHOLD`] collapsed to one line regardless
/// of depth.
pub fn value_to_string(v: &Value, indent: usize) -> String {
    render(v, indent, 0)
}

fn render(v: &Value, indent: usize, depth: usize) -> String {
    match v {
        Value::List(_) | Value::Object(_) => {
            let inline = one_line(v);
            if indent == 0 || inline.chars().count() < ONE_LINE_THRESHOLD {
                inline
            } else {
                multi_line(v, indent, depth)
            }
        }
        _ => one_line(v),
    }
}

fn one_line(v: &Value) -> String {
    match v {
        Value::String(s) => escape_mconf_string(s),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format!("{:?}", f.into_inner()),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::List(items) => {
            let body: Vec<String> = items.iter().map(one_line).collect();
            format!("[{}]", body.join(", "))
        }
        Value::Object(map) => {
            let body: Vec<String> = map.iter().map(|(k, v)| format!("{} = {}", print_key(k), one_line(v))).collect();
            format!("{{{}}}", body.join(", "))
        }
    }
}

fn multi_line(v: &Value, indent: usize, depth: usize) -> String {
    let pad_inner = " ".repeat(indent * (depth + 1));
    let pad_outer = " ".repeat(indent * depth);
    match v {
        Value::List(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            let mut out = String::from("[\n");
            for item in items {
                out.push_str(&pad_inner);
                out.push_str(&render(item, indent, depth + 1));
                out.push_str(",\n");
            }
            out.push_str(&pad_outer);
            out.push(']');
            out
        }
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            let mut out = String::from("{\n");
            for (k, val) in map {
                out.push_str(&pad_inner);
                out.push_str(&print_key(k));
                out.push_str(" = ");
                out.push_str(&render(val, indent, depth + 1));
                out.push_str(",\n");
            }
            out.push_str(&pad_outer);
            out.push('}');
            out
        }
        other => one_line(other),
    }
}

/// A bare key iff it is a legal word per the tokeniser's word rule and not
/// one of the reserved `Bool`/`Null` words, otherwise a quoted, escaped
/// string.
fn print_key(key: &str) -> String {
    if is_bare_key(key) { key.to_string() } else { escape_mconf_string(key) }
}

fn escape_mconf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Renders `v` as compact JSON.
pub fn to_json_string(v: &Value) -> String {
    match v {
        Value::String(s) => escape_json_string(s),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format!("{:?}", f.into_inner()),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::List(items) => {
            let body: Vec<String> = items.iter().map(to_json_string).collect();
            format!("[{}]", body.join(","))
        }
        Value::Object(map) => {
            let body: Vec<String> =
                map.iter().map(|(k, v)| format!("{}:{}", escape_json_string(k), to_json_string(v))).collect();
            format!("{{{}}}", body.join(","))
        }
    }
}

fn escape_json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
