pub mod category;
mod decode;
mod fetch;
mod model;
mod present;

use crate::config::RuntimeConfig;
use crate::ui::{self, LineSource};
use crate::util::sanitize::strip_controls;
use anyhow::Result;
use category::Category;
use reqwest::Client;
use serde_json::Value;
use std::io::Write;

/// Builds, fetches, decodes and presents Top Stories for one category at a
/// time. Holds nothing but the client and the read-only key/base pair.
pub struct HeadlineFetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HeadlineFetcher {
    pub fn new(cfg: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            client: fetch::build_client()?,
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
        })
    }

    pub fn url(&self, category: Category) -> String {
        fetch::create_url(&self.base_url, category.as_str(), &self.api_key)
    }

    pub async fn raw_data<W: Write>(&self, category: Category, out: &mut W) -> Result<Option<String>> {
        tracing::debug!(%category, "fetching top stories");
        fetch::get_raw_data(&self.client, &self.url(category), out).await
    }

    async fn document<W: Write>(&self, category: Category, out: &mut W) -> Result<Option<Value>> {
        match self.raw_data(category, out).await? {
            Some(raw) => Ok(Some(decode::decode(&raw)?)),
            None => Ok(None),
        }
    }

    /// Returns `false` when the fetch was refused and nothing was shown.
    pub async fn show_full_data<W: Write>(&self, category: Category, out: &mut W) -> Result<bool> {
        let Some(doc) = self.document(category, out).await? else {
            return Ok(false);
        };
        present::write_full_data(&doc, out)?;
        Ok(true)
    }

    pub async fn show_top_headlines<W: Write>(&self, category: Category, out: &mut W) -> Result<bool> {
        let Some(doc) = self.document(category, out).await? else {
            return Ok(false);
        };
        present::write_top_headlines(&doc, out)?;
        Ok(true)
    }

    pub async fn show_single_top_headline<W: Write>(
        &self,
        category: Category,
        out: &mut W,
    ) -> Result<Option<String>> {
        match self.document(category, out).await? {
            Some(doc) => Ok(Some(present::single_top_headline(&doc)?)),
            None => Ok(None),
        }
    }
}

/// Runs the three staged examples followed by the batch query.
pub async fn run<L: LineSource, W: Write>(
    cfg: &RuntimeConfig,
    fetcher: &HeadlineFetcher,
    input: &mut L,
    out: &mut W,
) -> Result<()> {
    if let Some(h) = cfg.header.as_deref() {
        writeln!(out, "{}", h)?;
    }
    writeln!(out, "Categories: {}", category::joined())?;
    let category = ui::prompt_category(input, out)?;

    section(out, &format!("Example 1: {} full data", category))?;
    ui::wait_for_enter(input)?;
    fetcher.show_full_data(category, out).await?;

    section(out, &format!("Example 2: {} headlines and authors", category))?;
    ui::wait_for_enter(input)?;
    fetcher.show_top_headlines(category, out).await?;

    section(out, "Example 3: Top headlines in multiple categories")?;
    writeln!(out, "Categories: {}", category::joined())?;
    for entry in ui::prompt_category_list(input)? {
        let c = match entry {
            Ok(c) => c,
            Err(unknown) => {
                writeln!(out, "{}", unknown)?;
                continue;
            }
        };
        match fetcher.show_single_top_headline(c, out).await {
            Ok(Some(title)) => writeln!(out, "{}: {}", c, strip_controls(&title))?,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(category = %c, error = %e, "headline lookup failed");
                writeln!(out, "{}: error: {:#}", c, e)?;
            }
        }
    }
    Ok(())
}

fn section<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out, "\n\n")?;
    writeln!(out, "{}", console::style(title).bold())?;
    Ok(())
}
