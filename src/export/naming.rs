//! Artifact file names, message templates and the messaging deep link.

use url::Url;

use crate::core::ClientInfo;

/// Extension of every artifact.
pub const PDF_EXTENSION: &str = "pdf";

/// Replace every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_file_stem(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `{label}_{client}.pdf`, with the client name sanitized.
///
/// A blank client name is replaced by `fallback`.
///
/// ```
/// use quotekit::export::artifact_file_name;
///
/// assert_eq!(artifact_file_name("Quote", "Acme S.A.C.", "Client"), "Quote_Acme_S_A_C_.pdf");
/// assert_eq!(artifact_file_name("Quote", "  ", "Client"), "Quote_Client.pdf");
/// ```
pub fn artifact_file_name(label: &str, client_name: &str, fallback: &str) -> String {
    let name = client_name.trim();
    let stem = if name.is_empty() { fallback } else { name };
    format!(
        "{}_{}.{PDF_EXTENSION}",
        sanitize_file_stem(label),
        sanitize_file_stem(stem)
    )
}

/// Text attached to a native share.
pub fn share_message(client: &ClientInfo) -> String {
    format!(
        "Hello {}, please find attached quote {}.",
        client.display_name(),
        document_number(client)
    )
}

/// Text prefilled in the messaging app when native file sharing is
/// unavailable. The user attaches `file_name` by hand.
pub fn fallback_message(client: &ClientInfo, file_name: &str) -> String {
    format!(
        "Hello {}, here is quote {}.\n\n(Attach the downloaded file {} before sending.)",
        client.display_name(),
        document_number(client),
        file_name
    )
}

/// `base?text=<urlencoded text>`. Any existing query on `base` is replaced.
pub fn messaging_link(base: &Url, text: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().clear().append_pair("text", text);
    url
}

fn document_number(client: &ClientInfo) -> &str {
    let number = client.document_number.trim();
    if number.is_empty() { "(no number)" } else { number }
}
