/// Map an arbitrary client-supplied filename to a filesystem-legal form.
///
/// Every run of whitespace collapses to a single underscore, then any
/// character outside `[A-Za-z0-9.\-_]` becomes an underscore. The result
/// never contains path separators, so a sanitized name cannot escape the
/// storage root. Total and idempotent.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
                in_whitespace = true;
            }
            continue;
        }

        in_whitespace = false;
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            out.push(c);
        } else {
            out.push('_');
        }
    }

    out
}
