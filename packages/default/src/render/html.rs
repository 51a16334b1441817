use super::RenderedList;
use crate::api::is_addressable_id;

/// Escapes text for use in HTML element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full dashboard page around the rendered list.
///
/// The create control posts to `/environments`; each take-down control is a
/// form posting to `/environments/{id}/take-down`. Entries whose id cannot be
/// addressed get a disabled control instead.
pub fn render_page(list: &RenderedList) -> String {
    let items: String = list
        .entries()
        .iter()
        .map(|entry| {
            let action = take_down_action(&entry.remove.data_id);
            entry.to_html_with_action(action.as_deref()) + "\n"
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Environments</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css">
</head>
<body>
<div class="container mt-5">
<h1>Environments</h1>
<form method="post" action="/environments">
<button id="create-env" class="btn btn-primary mb-3">Create environment</button>
</form>
<ul id="environments" class="list-group">
{items}</ul>
</div>
</body>
</html>
"#
    )
}

/// Dashboard path that takes down `id`, or `None` if `id` would not survive
/// as a single path segment.
pub fn take_down_action(id: &str) -> Option<String> {
    is_addressable_id(id)
        .then(|| format!("/environments/{}/take-down", urlencoding::encode(id)))
}
