//! Tool dispatch: catalog → client → fallback → envelope.
//!
//! Every tool call resolves its parameters, asks the matching client for a
//! body and, if none comes back, substitutes a canned response. The envelope
//! is the same on both paths, so callers always get a well-formed string.

pub mod fallback;
pub mod format;
pub mod traits;

pub use fallback::{fallback, select_fallback, GENERIC_FALLBACK};
pub use format::format_response;
pub use traits::ToolDefinition;

use crate::catalog::{select_meme, Backend, Catalog, ToolArgs, ToolSpec};
use crate::clients::{MemeCaptioner, TextGenerator};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// The only way a call can fail: naming a tool the profile does not have.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Everything a tool call needs. Shared read-only across concurrent calls.
#[derive(Clone)]
pub struct ToolContext {
    catalog: Catalog,
    text: Arc<dyn TextGenerator>,
    captioner: Arc<dyn MemeCaptioner>,
}

impl ToolContext {
    pub fn new(
        catalog: Catalog,
        text: Arc<dyn TextGenerator>,
        captioner: Arc<dyn MemeCaptioner>,
    ) -> Self {
        Self {
            catalog,
            text,
            captioner,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Definitions for every tool in the active profile.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.catalog
            .tools()
            .iter()
            .map(|spec| ToolDefinition::from_spec(spec))
            .collect()
    }

    /// Invoke a tool by name with JSON arguments.
    pub async fn invoke(&self, name: &str, arguments: &Value) -> Result<String, DispatchError> {
        let spec = self
            .catalog
            .get(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;
        Ok(self.execute(spec, arguments).await)
    }

    /// Run one tool. Always returns a formatted response.
    pub async fn execute(&self, spec: &'static ToolSpec, arguments: &Value) -> String {
        let args = resolve_args(spec, arguments);
        info!("Executing {}", spec.name);

        let generated = match spec.backend {
            Backend::Text => {
                let prompt = spec.build_prompt(&args);
                self.text.generate(&prompt, spec.persona).await.into_text()
            }
            Backend::Meme => {
                let scenario = spec.build_prompt(&args);
                let meme = select_meme(&scenario, args.get("meme_type"), &mut rand::thread_rng());
                debug!("Selected meme template {} for '{}'", meme.template_id, scenario);
                self.captioner
                    .caption(meme)
                    .await
                    .into_image()
                    .map(|image| format::meme_body(&scenario, &image))
            }
        };

        resolve(&self.catalog, spec, &args, generated)
    }
}

/// Format a generated body, or the tool's fallback when there is none.
pub fn resolve(
    catalog: &Catalog,
    spec: &ToolSpec,
    args: &ToolArgs,
    generated: Option<String>,
) -> String {
    let body = match generated {
        Some(text) => text,
        None => match spec.inline_fallback {
            Some(render) => render(args),
            None => fallback(catalog, spec.name).to_string(),
        },
    };
    format_response(&spec.envelope, &body)
}

/// Resolve declared parameters; blank or missing values take the declared default.
pub fn resolve_args(spec: &ToolSpec, arguments: &Value) -> ToolArgs {
    if let Some(obj) = arguments.as_object() {
        for key in obj.keys() {
            if !spec.params.iter().any(|p| p.name == key) {
                debug!("{}: ignoring undeclared argument '{}'", spec.name, key);
            }
        }
    }

    let values = spec
        .params
        .iter()
        .map(|p| {
            let value = arguments
                .get(p.name)
                .and_then(argument_text)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| p.default.to_string());
            (p.name, value)
        })
        .collect();
    ToolArgs::new(values)
}

fn argument_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
