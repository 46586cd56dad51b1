//! Utility functions: tracing and HTML escaping.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize pretty CLI logging.
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  fmt()
    .with_env_filter(filter)
    .with_target(false)
    .pretty()
    .init();
}

/// HTML escaping for text and attribute content.
pub fn html_escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
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

#[cfg(test)]
mod tests {
  use super::html_escape;

  #[test]
  fn escapes_markup_characters() {
    assert_eq!(
      html_escape(r#"<script>alert("x & 'y'")</script>"#),
      "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
    );
  }

  #[test]
  fn leaves_plain_text_alone() {
    assert_eq!(html_escape("coffee at 9, café ☕"), "coffee at 9, café ☕");
  }
}
