use url::Url;

use crate::models::{BookingInquiry, InquiryField, RouteFields};

pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Fixed framing around the per-field lines of an inquiry message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryFormatter {
    greeting: String,
    header: String,
    closing: String,
}

impl InquiryFormatter {
    pub fn for_business(short_name: &str) -> Self {
        Self {
            greeting: format!("Hello {short_name}!"),
            header: "*New Booking Inquiry*".to_string(),
            closing: "Please provide a quote.".to_string(),
        }
    }

    pub fn compose(&self, inquiry: &BookingInquiry, route_fields: RouteFields) -> String {
        let mut lines = vec![
            self.greeting.clone(),
            String::new(),
            self.header.clone(),
            String::new(),
        ];
        lines.extend(
            route_fields
                .form_fields()
                .into_iter()
                .map(|field| field_line(field, inquiry.value(field))),
        );
        lines.push(String::new());
        lines.push(self.closing.clone());
        lines.join("\n")
    }
}

fn field_line(field: InquiryField, value: &str) -> String {
    format!("*{}:* {}", field.message_label(), value)
}

/// Percent-encodes `input` with the `encodeURIComponent` unreserved set.
pub fn pct_encode(input: &str) -> String {
    let mut output = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric()
            || matches!(
                byte,
                b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')'
            )
        {
            output.push(byte as char);
        } else {
            output.push('%');
            output.push_str(&format!("{:02X}", byte));
        }
    }
    output
}

/// Chat link for `number`, optionally pre-filled with `text`.
pub fn whatsapp_link(number: &str, text: Option<&str>) -> String {
    match text {
        Some(text) => format!("{WHATSAPP_BASE_URL}/{number}?text={}", pct_encode(text)),
        None => format!("{WHATSAPP_BASE_URL}/{number}"),
    }
}

/// Recovers the pre-filled text from a chat link built by [`whatsapp_link`].
pub fn extract_message(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
}
