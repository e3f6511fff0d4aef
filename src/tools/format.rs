//! Response envelopes.

use crate::catalog::Envelope;
use crate::types::MemeImage;

/// Wrap a body between the tool's header and footer lines.
pub fn format_response(envelope: &Envelope, body: &str) -> String {
    format!("{}\n\n{}\n\n{}", envelope.header, body, envelope.footer)
}

/// Body of a successful meme response.
pub fn meme_body(scenario: &str, image: &MemeImage) -> String {
    format!(
        "✨ Meme created for: {}\n\n🔗 View your meme: {}\n📄 Share page: {}",
        scenario, image.url, image.page_url
    )
}
