//! Full-page document wrapper for non-partial responses.

use crate::html::fragment::{escape, Fragment};

const STYLES: &str = "\
:root{--space-4:1rem;font-family:system-ui,sans-serif;color:#1f2430;background:#f5f6f8}\
.page{max-width:1100px;margin:0 auto;padding:2rem}\
.bento-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(var(--bento-min),1fr))}\
.card{background:#fff;border-radius:12px;padding:1rem;box-shadow:0 1px 3px rgba(0,0,0,.08);margin:1rem 0}\
.metric__label{font-size:.85rem;color:#667}.metric__value{font-size:1.6rem;font-weight:600}\
.table{width:100%;border-collapse:collapse}.table th,.table td{padding:.4rem;text-align:left}\
.table th button{all:unset;cursor:pointer;font-weight:600}\
.table__pager{display:flex;gap:1rem;align-items:center;margin-top:.5rem}\
.form{display:flex;gap:.5rem;align-items:end;flex-wrap:wrap}.form__field{display:flex;flex-direction:column}\
.notice--error{border-left:4px solid #c0392b}";

/// Render a complete HTML document around `body`.
pub fn document(title: &str, htmx_src: &str, body: &Fragment) -> String {
    format!(
        "<!doctype html><html lang='en'><head><meta charset='utf-8'>\
         <meta name='viewport' content='width=device-width, initial-scale=1'>\
         <title>{title}</title><style>{STYLES}</style>\
         <script src='{src}' defer></script></head>\
         <body>{body}</body></html>",
        title = escape(title),
        src = escape(htmx_src),
    )
}
