//! Email parsing for RFC822 (.eml) files.
//!
//! Pulls the `Subject` and `From` headers and the decoded text of every
//! `text/plain` and `text/html` part. Undecodable bytes are dropped rather
//! than treated as errors.

use mail_parser::{Message, MessageParser, MessagePart, MimeHeaders, PartType};
use std::path::Path;

use super::ExtractionError;

/// Parsed email information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEmail {
    /// Subject header, empty if absent.
    pub subject: String,
    /// Sender, rendered as `Name <addr>` or `addr`; empty if absent.
    pub from: String,
    /// Concatenated body text, not yet normalized.
    pub body: String,
}

/// Email parser for RFC822 (.eml) files.
pub struct EmailExtractor;

impl EmailExtractor {
    /// Parse an email file from disk.
    pub fn parse_file(email_path: &Path) -> Result<ParsedEmail, ExtractionError> {
        let raw_email = std::fs::read(email_path)?;
        Self::parse_bytes(&raw_email)
    }

    /// Parse raw RFC822 bytes.
    pub fn parse_bytes(raw_email: &[u8]) -> Result<ParsedEmail, ExtractionError> {
        let message = MessageParser::default()
            .parse(raw_email)
            .ok_or_else(|| ExtractionError::EmailParse("no message found".to_string()))?;

        let subject = message.subject().unwrap_or_default().to_string();
        let from = message
            .from()
            .and_then(|addrs| addrs.first())
            .map(|addr| match addr.name() {
                Some(name) => format!("{} <{}>", name, addr.address().unwrap_or_default()),
                None => addr.address().unwrap_or_default().to_string(),
            })
            .unwrap_or_default();

        Ok(ParsedEmail {
            subject,
            from,
            body: body_text(&message),
        })
    }
}

fn body_text(message: &Message) -> String {
    let root = message.root_part();
    if !matches!(root.body, PartType::Multipart(_)) {
        return decode_ignoring_errors(root.contents());
    }

    message
        .parts
        .iter()
        .filter(|part| is_text_part(part))
        .map(|part| decode_ignoring_errors(part.contents()))
        .collect()
}

/// Parts without a Content-Type header default to text/plain.
fn is_text_part(part: &MessagePart) -> bool {
    if matches!(part.body, PartType::Multipart(_) | PartType::Message(_)) {
        return false;
    }
    match part.content_type() {
        Some(ct) => {
            let ctype = ct.ctype().to_ascii_lowercase();
            let subtype = ct.subtype().unwrap_or_default().to_ascii_lowercase();
            ctype == "text" && (subtype == "plain" || subtype == "html")
        }
        None => true,
    }
}

/// Decode UTF-8, skipping invalid byte sequences.
fn decode_ignoring_errors(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
