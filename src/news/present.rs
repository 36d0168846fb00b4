use super::model::Story;
use crate::util::sanitize::strip_controls;
use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;

/// Pretty-prints the whole document with four-space indentation. Keys keep
/// the order the server sent them in.
pub fn write_full_data<W: Write>(doc: &Value, out: &mut W) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut *out, formatter);
    doc.serialize(&mut ser)?;
    writeln!(out)?;
    Ok(())
}

/// Writes one `"<title>", <byline>` line per story, in response order.
pub fn write_top_headlines<W: Write>(doc: &Value, out: &mut W) -> Result<()> {
    for (i, entry) in results(doc)?.iter().enumerate() {
        let story = story_at(entry, i)?;
        let byline = story
            .byline
            .ok_or_else(|| anyhow!("story {} is missing field `byline`", i + 1))?;
        writeln!(
            out,
            "\"{}\", {}",
            strip_controls(&story.title),
            strip_controls(&byline)
        )?;
    }
    Ok(())
}

pub fn single_top_headline(doc: &Value) -> Result<String> {
    let Some(first) = results(doc)?.first() else {
        bail!("response field `results` is empty");
    };
    Ok(story_at(first, 0)?.title)
}

fn results(doc: &Value) -> Result<&Vec<Value>> {
    doc.get("results")
        .ok_or_else(|| anyhow!("response is missing field `results`"))?
        .as_array()
        .ok_or_else(|| anyhow!("response field `results` is not an array"))
}

fn story_at(entry: &Value, i: usize) -> Result<Story> {
    Story::deserialize(entry).with_context(|| format!("story {} is malformed", i + 1))
}
