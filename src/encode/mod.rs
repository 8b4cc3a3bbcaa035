mod writer;

use std::io::Write;

use serde_json::{Map, Number, Value};

use crate::constants::{STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::options::PrintOptions;
use crate::types::{MapNode, Node, NodeKind};
use crate::{Error, Result};

use writer::Writer;

/// Print a node as JSON with default options (2-space indent).
///
/// Every pair of a map is written, duplicates included, so re-parsing the output gives back
/// the same tree. `Undefined` nodes have no JSON form and fail with
/// [`Error::UndefinedValue`]. Object sections that never formed a pair fail with
/// [`Error::InvalidSection`].
///
/// # Examples
/// ```
/// let result = tolerant_json::parse(r#"{"a": [1, true], /* note */ "b": "x"}"#);
/// let text = tolerant_json::to_string(&result.root.unwrap())?;
/// assert_eq!(text, "{\n  \"a\": [\n    1,\n    true\n  ],\n  \"b\": \"x\"\n}");
/// # Ok::<(), tolerant_json::Error>(())
/// ```
pub fn to_string(node: &Node) -> Result<String> {
    to_string_with_options(node, &PrintOptions::default())
}

pub fn to_string_with_options(node: &Node, options: &PrintOptions) -> Result<String> {
    let mut writer = Writer::new(options);
    write_node(&mut writer, node, 0)?;
    if options.trailing_newline {
        writer.write_newline();
    }
    Ok(writer.finish())
}

pub fn to_writer<W: Write>(writer: W, node: &Node) -> Result<()> {
    to_writer_with_options(writer, node, &PrintOptions::default())
}

pub fn to_writer_with_options<W: Write>(
    mut writer: W,
    node: &Node,
    options: &PrintOptions,
) -> Result<()> {
    let text = to_string_with_options(node, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

fn write_node(writer: &mut Writer, node: &Node, depth: usize) -> Result<()> {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || match &node.kind {
        NodeKind::Map(map) => write_map(writer, map, depth),
        NodeKind::List(items) => write_list(writer, items, depth),
        NodeKind::Boolean(value) => {
            writer.write_bool(*value);
            Ok(())
        }
        NodeKind::Integer(value) => {
            writer.write_integer(value);
            Ok(())
        }
        NodeKind::String(value) => {
            writer.write_quoted_string(value);
            Ok(())
        }
        NodeKind::Undefined(_) => Err(Error::UndefinedValue { span: node.span }),
    })
}

fn check_keys(map: &MapNode) -> Result<()> {
    match map.invalid.first() {
        Some(section) => Err(Error::InvalidSection {
            span: section.key.span,
        }),
        None => Ok(()),
    }
}

fn write_map(writer: &mut Writer, map: &MapNode, depth: usize) -> Result<()> {
    check_keys(map)?;
    if map.is_empty() {
        writer.write_str("{}");
        return Ok(());
    }
    writer.write_char('{');
    for (idx, (key, value)) in map.pairs.iter().enumerate() {
        if idx > 0 {
            writer.write_char(',');
        }
        writer.write_line_break(depth + 1);
        writer.write_quoted_string(key.as_str());
        writer.write_key_separator();
        write_node(writer, value, depth + 1)?;
    }
    writer.write_line_break(depth);
    writer.write_char('}');
    Ok(())
}

fn write_list(writer: &mut Writer, items: &[Node], depth: usize) -> Result<()> {
    if items.is_empty() {
        writer.write_str("[]");
        return Ok(());
    }
    writer.write_char('[');
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            writer.write_char(',');
        }
        writer.write_line_break(depth + 1);
        write_node(writer, item, depth + 1)?;
    }
    writer.write_line_break(depth);
    writer.write_char(']');
    Ok(())
}

/// Convert a node into a `serde_json::Value`.
///
/// Duplicate keys collapse to their first occurrence. Integers keep their full precision.
pub fn to_value(node: &Node) -> Result<Value> {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || match &node.kind {
        NodeKind::Map(map) => {
            check_keys(map)?;
            let mut object = Map::with_capacity(map.pairs.len());
            for (key, value) in map.first_occurrences() {
                object.insert(key.value.to_string(), to_value(value)?);
            }
            Ok(Value::Object(object))
        }
        NodeKind::List(items) => items
            .iter()
            .map(to_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        NodeKind::Boolean(value) => Ok(Value::Bool(*value)),
        NodeKind::Integer(value) => value
            .to_string()
            .parse::<Number>()
            .map(Value::Number)
            .map_err(|err| Error::serialize(format!("integer {value}: {err}"))),
        NodeKind::String(value) => Ok(Value::String(value.clone())),
        NodeKind::Undefined(_) => Err(Error::UndefinedValue { span: node.span }),
    })
}
