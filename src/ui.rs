use crate::news::category::{self, Category, UnknownCategory};
use anyhow::Result;
use dialoguer::Input;
use std::io::Write;

pub const CATEGORY_PROMPT: &str = "Please input a category to test";
pub const CONTINUE_PROMPT: &str = "Press enter to continue";
pub const LIST_PROMPT: &str = "Please input a set of categories, separated by a space";

/// Somewhere lines of user input come from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Reads from the controlling terminal.
pub struct TermInput;

impl LineSource for TermInput {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let s: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(s)
    }
}

/// Asks until the answer names a known section.
pub fn prompt_category<L: LineSource, W: Write>(input: &mut L, out: &mut W) -> Result<Category> {
    loop {
        let answer = input.read_line(CATEGORY_PROMPT)?;
        match answer.parse::<Category>() {
            Ok(c) => return Ok(c),
            Err(_) => {
                tracing::debug!(answer = %answer.trim(), "unknown category");
                writeln!(out, "I didn't understand that.")?;
            }
        }
    }
}

pub fn wait_for_enter<L: LineSource>(input: &mut L) -> Result<()> {
    input.read_line(CONTINUE_PROMPT)?;
    Ok(())
}

pub fn prompt_category_list<L: LineSource>(
    input: &mut L,
) -> Result<Vec<Result<Category, UnknownCategory>>> {
    let line = input.read_line(LIST_PROMPT)?;
    Ok(category::parse_list(&line))
}
