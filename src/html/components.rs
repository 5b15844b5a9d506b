//! Layout primitives.
//!
//! Every function here is pure: children are already-built fragments and every
//! scalar is escaped before it is embedded.

use std::fmt::Display;

use crate::html::fragment::{escape, escape_display, join, Fragment};

/// Page body with a titled header.
pub fn page(title: &str, children: impl IntoIterator<Item = Fragment>) -> Fragment {
    Fragment::trusted(format!(
        "<div class='page'><header class='page__header'><h1>{}</h1></header>\
         <main class='page__body'>{}</main></div>",
        escape(title),
        join(children)
    ))
}

/// Responsive grid whose columns are at least `min_col` pixels wide.
pub fn grid(children: impl IntoIterator<Item = Fragment>, min_col: u32) -> Fragment {
    Fragment::trusted(format!(
        "<div class='bento-grid' style='--bento-min:{min_col}px;gap:var(--space-4);'>{}</div>",
        join(children)
    ))
}

/// Metric card: label, headline value and an optional delta.
pub fn metric(label: &str, value: impl Display, delta: Option<&str>) -> Fragment {
    let delta = delta
        .map(|d| format!("<span class='metric__delta' aria-label='delta'>{}</span>", escape(d)))
        .unwrap_or_default();
    Fragment::trusted(format!(
        "<div class='card metric'><div class='metric__label'>{}</div>\
         <div class='metric__value'>{}</div>{delta}</div>",
        escape(label),
        escape_display(value)
    ))
}

/// Paragraph of escaped text.
pub fn text(body: &str) -> Fragment {
    Fragment::trusted(format!("<p class='text'>{}</p>", escape(body)))
}

/// Card container, optionally addressable by id (e.g. as an `hx-target`).
pub fn card(id: Option<&str>, children: impl IntoIterator<Item = Fragment>) -> Fragment {
    let id = id
        .map(|id| format!(" id='{}'", escape(id)))
        .unwrap_or_default();
    Fragment::trusted(format!("<div{id} class='card'>{}</div>", join(children)))
}

/// Labeled single-line text input.
pub fn input_text(name: &str, label: &str, placeholder: &str, value: &str) -> Fragment {
    Fragment::trusted(format!(
        "<label class='form__field'><span>{}</span>\
         <input type='text' name='{}' placeholder='{}' value='{}' /></label>",
        escape(label),
        escape(name),
        escape(placeholder),
        escape(value)
    ))
}

/// Labeled file input.
pub fn upload(name: &str, label: &str, accept: Option<&str>) -> Fragment {
    let accept = accept
        .map(|a| format!(" accept='{}'", escape(a)))
        .unwrap_or_default();
    Fragment::trusted(format!(
        "<label class='form__field'><span>{}</span>\
         <input type='file' name='{}'{accept} /></label>",
        escape(label),
        escape(name)
    ))
}

/// Submit button; `kind` selects the `btn--<kind>` style.
pub fn button(label: &str, kind: &str) -> Fragment {
    Fragment::trusted(format!(
        "<button class='btn btn--{}' type='submit'>{}</button>",
        escape(kind),
        escape(label)
    ))
}

/// Form builder. Submits through HTMX by default.
#[derive(Debug, Clone)]
pub struct Form {
    action: String,
    method: String,
    hx: bool,
    target: Option<String>,
    swap: String,
    multipart: bool,
    children: Vec<Fragment>,
}

impl Form {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: "post".to_string(),
            hx: true,
            target: None,
            swap: "innerHTML".to_string(),
            multipart: false,
            children: Vec::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into().to_lowercase();
        self
    }

    /// Plain browser submission, no `hx-*` attributes.
    pub fn without_hx(mut self) -> Self {
        self.hx = false;
        self
    }

    /// CSS selector of the element that receives the response.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn swap(mut self, swap: impl Into<String>) -> Self {
        self.swap = swap.into();
        self
    }

    /// Encode as `multipart/form-data` (required for file inputs).
    pub fn multipart(mut self) -> Self {
        self.multipart = true;
        self
    }

    pub fn child(mut self, child: Fragment) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Fragment>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn render(self) -> Fragment {
        let method = escape(&self.method);
        let action = escape(&self.action);
        let mut attrs = String::new();
        if self.multipart {
            attrs.push_str(" enctype='multipart/form-data'");
        }
        if self.hx {
            attrs.push_str(&format!(" hx-{method}='{action}'"));
            if let Some(target) = &self.target {
                attrs.push_str(&format!(" hx-target='{}'", escape(target)));
            }
            attrs.push_str(&format!(" hx-swap='{}'", escape(&self.swap)));
            if self.multipart {
                attrs.push_str(" hx-encoding='multipart/form-data'");
            }
        }
        Fragment::trusted(format!(
            "<form class='form' action='{action}' method='{method}'{attrs}>{}</form>",
            join(self.children)
        ))
    }
}

impl From<Form> for Fragment {
    fn from(form: Form) -> Self {
        form.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_escapes_title() {
        let html = page("<Admin>", [text("hello")]);
        assert!(html.as_str().contains("<h1>&lt;Admin&gt;</h1>"));
        assert!(html.as_str().contains("<p class='text'>hello</p>"));
    }

    #[test]
    fn test_metric_without_delta() {
        let html = metric("Latency", 42, None);
        assert!(html.as_str().contains("<div class='metric__value'>42</div>"));
        assert!(!html.as_str().contains("metric__delta"));
    }

    #[test]
    fn test_metric_with_delta() {
        let html = metric("Sessions", "312", Some("+12"));
        assert!(html.as_str().contains("aria-label='delta'>+12</span>"));
    }

    #[test]
    fn test_grid_sets_min_column() {
        let html = grid([text("a"), text("b")], 240);
        assert!(html.as_str().contains("--bento-min:240px"));
        assert_eq!(html.as_str().matches("<p class='text'>").count(), 2);
    }

    #[test]
    fn test_form_with_hx_attributes() {
        let html: Fragment = Form::new("/echo")
            .target("#result")
            .child(input_text("message", "Message", "Type...", ""))
            .child(button("Send", "primary"))
            .into();
        let html = html.as_str();
        assert!(html.contains("hx-post='/echo'"));
        assert!(html.contains("hx-target='#result'"));
        assert!(html.contains("hx-swap='innerHTML'"));
        assert!(html.contains("<button class='btn btn--primary' type='submit'>Send</button>"));
    }

    #[test]
    fn test_form_without_hx() {
        let html = Form::new("/plain").method("GET").without_hx().render();
        assert!(html.as_str().contains("method='get'"));
        assert!(!html.as_str().contains("hx-"));
    }

    #[test]
    fn test_upload_accept_is_optional() {
        assert!(upload("file", "File", Some(".csv")).as_str().contains("accept='.csv'"));
        assert!(!upload("file", "File", None).as_str().contains("accept="));
    }

    #[test]
    fn test_input_escapes_attribute_values() {
        let html = input_text("q", "Query", "", "' onfocus='alert(1)");
        assert!(!html.as_str().contains("' onfocus='"));
    }
}
