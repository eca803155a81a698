//! Chat and SMS deep links
//!
//! Builds `https://wa.me/...` and `sms:` URIs carrying the plain-text
//! receipt as a percent-encoded message body. The phone number gets a
//! fixed country-code prefix; beyond being non-empty it is not validated,
//! so a malformed number yields a syntactically valid but undeliverable
//! URI. That is accepted behavior, not an error.

use crate::error::{PosError, PosResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the characters `encodeURIComponent` leaves alone,
/// so decoding the body component reproduces the text exactly.
const MESSAGE_BODY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Deep-link builder bound to one country-code prefix
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    country_code: String,
}

impl LinkBuilder {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
        }
    }

    /// WhatsApp chat link with the receipt text as message body
    pub fn chat_link(&self, phone: &str, body: &str) -> PosResult<String> {
        let phone = self.qualified(phone)?;
        Ok(format!(
            "https://wa.me/{}?text={}",
            phone,
            utf8_percent_encode(body, MESSAGE_BODY)
        ))
    }

    /// SMS link with the receipt text as message body
    pub fn sms_link(&self, phone: &str, body: &str) -> PosResult<String> {
        let phone = self.qualified(phone)?;
        Ok(format!(
            "sms:{}?body={}",
            phone,
            utf8_percent_encode(body, MESSAGE_BODY)
        ))
    }

    fn qualified(&self, phone: &str) -> PosResult<String> {
        if phone.trim().is_empty() {
            return Err(PosError::LinkOpenFailed(
                "customer has no phone number".to_string(),
            ));
        }
        Ok(format!("{}{}", self.country_code, phone.trim()))
    }
}
