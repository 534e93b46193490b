use crate::shell::ast::is_reserved;
use crate::shell::error::{ShellError, ShellResult};
use regex::Regex;
use std::sync::LazyLock;

static DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+)='([^']*)'$").unwrap());

/// User aliases, kept in declaration order for listing.
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Parses `name='command text'` and declares it.
    pub fn declare_line(&mut self, declaration: &str) -> ShellResult<()> {
        let caps = DECLARATION
            .captures(declaration)
            .ok_or_else(|| ShellError::invalid("alias", "invalid alias format"))?;
        self.declare(&caps[1], &caps[2])
    }

    /// An alias may neither shadow a built-in keyword nor redefine a live alias.
    pub fn declare(&mut self, name: &str, value: &str) -> ShellResult<()> {
        if is_reserved(name) || self.contains(name) {
            return Err(ShellError::invalid(
                "alias",
                format!("{} already exists or is a reserved command", name),
            ));
        }
        self.entries.push((name.to_string(), value.to_string()));
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> ShellResult<()> {
        let pos = self
            .entries
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| ShellError::not_found("unalias", format!("{} alias does not exist", name)))?;
        self.entries.remove(pos);
        Ok(())
    }

    /// `name='command text'` lines in declaration order.
    pub fn listing(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, value)| format!("{}='{}'", name, value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
