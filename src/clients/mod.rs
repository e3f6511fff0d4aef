//! Outbound clients for text generation and meme captioning.
//!
//! Both clients swallow every failure at their boundary: callers only ever
//! see a result value, never an error.

pub mod error;
pub mod imgflip;
pub mod inference;
pub mod traits;

pub use error::ClientError;
pub use imgflip::ImgflipClient;
pub use inference::OpenAiClient;
pub use traits::{MemeCaptioner, TextGenerator};
