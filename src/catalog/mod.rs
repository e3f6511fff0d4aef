//! Static tool catalog: personas, prompt templates, envelopes and canned responses.
//!
//! Everything here is read-only data built into the binary. A [`Catalog`] is
//! the set of tools belonging to one [`Profile`], assembled once at startup.

pub mod customer;
pub mod memes;
pub mod pm;

pub use memes::{select_meme, MemeConfig, MEME_CONFIGS};

use crate::types::Profile;
use std::fmt;

/// A declared tool parameter. All parameters are optional strings.
#[derive(Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Substituted when the caller leaves the parameter blank.
    pub default: &'static str,
}

/// Decorated header and footer wrapped around every response of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    pub header: &'static str,
    pub footer: &'static str,
}

/// Which external client produces the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Text,
    Meme,
}

/// Resolved parameter values, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolArgs {
    values: Vec<(&'static str, String)>,
}

impl ToolArgs {
    pub fn new(values: Vec<(&'static str, String)>) -> Self {
        Self { values }
    }

    /// Value of a parameter, or `""` if the tool does not declare it.
    pub fn get(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// One persona-response tool.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    /// System-role persona sent with every prompt.
    pub persona: &'static str,
    pub prompt: fn(&ToolArgs) -> String,
    pub envelope: Envelope,
    pub backend: Backend,
    /// Canned responses. Empty when `inline_fallback` is set.
    pub fallbacks: &'static [&'static str],
    /// Fallback rendered from the resolved parameters at call time.
    pub inline_fallback: Option<fn(&ToolArgs) -> String>,
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("backend", &self.backend)
            .field("params", &self.params.len())
            .field("fallbacks", &self.fallbacks.len())
            .field("inline_fallback", &self.inline_fallback.is_some())
            .finish()
    }
}

impl ToolSpec {
    pub fn build_prompt(&self, args: &ToolArgs) -> String {
        (self.prompt)(args)
    }
}

/// The tools exposed under one profile.
#[derive(Debug, Clone)]
pub struct Catalog {
    profile: Profile,
    tools: Vec<&'static ToolSpec>,
}

impl Catalog {
    /// Assemble the catalog for a profile.
    pub fn for_profile(profile: Profile) -> Self {
        let tools: Vec<&'static ToolSpec> = match profile {
            Profile::Pm => pm::PM_TOOLS.iter().collect(),
            Profile::PmMeme => pm::PM_TOOLS
                .iter()
                .chain(std::iter::once(&pm::GENERATE_PM_MEME))
                .collect(),
            Profile::Customer => customer::CUSTOMER_TOOLS.iter().collect(),
        };
        Self { profile, tools }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn get(&self, name: &str) -> Option<&'static ToolSpec> {
        self.tools.iter().copied().find(|t| t.name == name)
    }

    pub fn tools(&self) -> &[&'static ToolSpec] {
        &self.tools
    }

    /// The fallback set for a tool, if it has a non-empty one.
    pub fn fallbacks(&self, name: &str) -> Option<&'static [&'static str]> {
        self.get(name)
            .map(|t| t.fallbacks)
            .filter(|set| !set.is_empty())
    }
}
