//! Karen: persona-response tools served over MCP.
//!
//! Each tool sends a persona prompt to an OpenAI chat model (or an Imgflip
//! meme template) and wraps the result in a fixed header and footer. When
//! a remote service is missing or failing, a canned response takes its
//! place, so every call produces a well-formed reply.

pub mod catalog;
pub mod clients;
pub mod config;
pub mod mcp;
pub mod tools;
pub mod types;
