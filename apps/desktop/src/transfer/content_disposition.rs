//! Suggested-filename extraction from a `Content-Disposition` response header.

/// Returns the filename suggested by an attachment-style header value.
///
/// Understands `filename="quoted"` and `filename=token` parameters; an RFC 5987
/// `filename*=UTF-8''percent-encoded` parameter wins over both when it decodes
/// to something non-empty.
pub fn suggested_filename(header_value: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for param in header_value.split(';') {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if key.eq_ignore_ascii_case("filename*") {
            let encoded = value
                .strip_prefix("UTF-8''")
                .or_else(|| value.strip_prefix("utf-8''"));
            let decoded = encoded.map(percent_decoded).unwrap_or_default();
            if !decoded.is_empty() {
                return Some(decoded);
            }
        } else if key.eq_ignore_ascii_case("filename") {
            let name = unquoted(value);
            if !name.is_empty() {
                plain = Some(name);
            }
        }
    }

    plain
}

/// Strips surrounding double quotes and unescapes `\"` and `\\` inside them.
fn unquoted(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    out
}

fn percent_decoded(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();
    while let Some(b) = bytes.next() {
        if b != b'%' {
            out.push(b);
            continue;
        }
        match (
            bytes.next().and_then(hex_value),
            bytes.next().and_then(hex_value),
        ) {
            (Some(high), Some(low)) => out.push(high << 4 | low),
            // Malformed escape: keep the literal percent sign and move on.
            _ => out.push(b'%'),
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_quoted_filename() {
        let name = suggested_filename("attachment; filename=\"x.pdf\"");
        assert_eq!(name.as_deref(), Some("x.pdf"));
    }

    #[test]
    fn extracts_token_filename() {
        let name = suggested_filename("attachment; filename=x.pdf");
        assert_eq!(name.as_deref(), Some("x.pdf"));
    }

    #[test]
    fn unescapes_quoted_pairs() {
        let name = suggested_filename(r#"attachment; filename="a \"b\" c.pdf""#);
        assert_eq!(name.as_deref(), Some("a \"b\" c.pdf"));
    }

    #[test]
    fn decodes_extended_filename() {
        let name = suggested_filename("attachment; filename*=UTF-8''curr%C3%ADculo.pdf");
        assert_eq!(name.as_deref(), Some("currículo.pdf"));
    }

    #[test]
    fn extended_filename_wins_over_plain() {
        let name = suggested_filename(
            "attachment; filename=\"fallback.pdf\"; filename*=UTF-8''real%20name.pdf",
        );
        assert_eq!(name.as_deref(), Some("real name.pdf"));
    }

    #[test]
    fn missing_filename_yields_none() {
        assert_eq!(suggested_filename("attachment"), None);
        assert_eq!(suggested_filename("inline; size=42"), None);
        assert_eq!(suggested_filename("attachment; filename=\"\""), None);
    }
}
