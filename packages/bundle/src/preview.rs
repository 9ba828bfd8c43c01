//! Preview document composition.
//!
//! The preview runs arbitrary user JavaScript, so the composed document is
//! only ever delivered behind [`SANDBOX_CSP`]: scripts may execute, but the
//! document gets a unique opaque origin and no access to the host page.

/// Security policy for serving the composed preview. Scripts run; same-origin
/// access to the hosting page is denied.
pub const SANDBOX_CSP: &str = "sandbox allow-scripts";

/// Compose the three buffers into a single preview document. The JS lands
/// in a module script block so its top-level bindings stay out of the
/// global scope.
pub fn compose_document(html: &str, css: &str, js: &str) -> String {
    format!(
        r#"<html>
  <head>
    <style>{css}</style>
  </head>
  <body>
    {html}
    <script type="module">{js}</script>
  </body>
</html>
"#
    )
}

/// Wrap the HTML buffer in a minimal standalone document that links the
/// archive's `style.css` and `script.js` entries.
pub fn linked_document(html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Scratchpad Project</title>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    {html}
    <script src="script.js"></script>
</body>
</html>
"#
    )
}
