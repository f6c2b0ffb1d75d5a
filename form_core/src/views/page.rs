use std::collections::BTreeMap;
use std::time::Duration;

use v_htmlescape::escape;

use crate::form::{FocusArea, FormField, FormValues, InMemoryForm};
use crate::ui::StatusBanner;

/// Everything needed to draw the form page once.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub title: String,
    pub values: FormValues,
    pub field_errors: BTreeMap<FormField, String>,
    pub status: Option<StatusBanner>,
    pub preview: Option<String>,
    pub controls_enabled: bool,
    /// Reload a blank form after this delay (set after a successful submit).
    pub reload_after: Option<Duration>,
    pub status_auto_hide: Duration,
}

impl PageModel {
    pub fn new(title: impl Into<String>, values: FormValues, status_auto_hide: Duration) -> Self {
        Self {
            title: title.into(),
            values,
            field_errors: BTreeMap::new(),
            status: None,
            preview: None,
            controls_enabled: true,
            reload_after: None,
            status_auto_hide,
        }
    }

    pub fn from_form(title: impl Into<String>, form: &InMemoryForm, status_auto_hide: Duration) -> Self {
        use crate::form::FormView;

        Self {
            field_errors: form.field_errors().clone(),
            status: form.status().cloned(),
            preview: form.preview().map(str::to_string),
            controls_enabled: form.controls_enabled(),
            ..Self::new(title, form.values(), status_auto_hide)
        }
    }

    pub fn reload_after(mut self, delay: Duration) -> Self {
        self.reload_after = Some(delay);
        self
    }
}

pub fn render_form_page(page: &PageModel) -> String {
    let refresh = match page.reload_after {
        Some(delay) => format!(
            r#"<meta http-equiv="refresh" content="{}; url=/">"#,
            delay.as_secs_f64()
        ),
        None => String::new(),
    };
    let disabled = if page.controls_enabled { "" } else { " disabled" };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    {refresh}
    <title>{title}</title>
    <style>
        body {{
            margin: 0;
            font-family: 'Inter', system-ui, -apple-system, 'Segoe UI', sans-serif;
            background: #f1f5f9;
            color: #0f172a;
        }}
        main {{
            width: min(760px, 94vw);
            margin: 2.5rem auto;
            background: #ffffff;
            border-radius: 16px;
            padding: 2rem 2.5rem;
            box-shadow: 0 24px 48px rgba(15, 23, 42, 0.12);
        }}
        label {{
            display: flex;
            flex-direction: column;
            gap: 0.4rem;
            margin-top: 1.1rem;
            font-weight: 600;
        }}
        input, textarea, select {{
            border-radius: 10px;
            border: 1px solid #cbd5e1;
            padding: 0.7rem 0.85rem;
            font-size: 1rem;
            font-family: inherit;
        }}
        .field.error input, .field.error textarea {{
            border-color: #dc2626;
        }}
        .error-message {{
            color: #dc2626;
            font-size: 0.875rem;
            font-weight: 400;
        }}
        .actions {{
            display: flex;
            flex-wrap: wrap;
            gap: 0.75rem;
            margin-top: 1.75rem;
        }}
        button {{
            border-radius: 10px;
            border: none;
            padding: 0.8rem 1.4rem;
            font-size: 1rem;
            font-weight: 600;
            cursor: pointer;
            background: #2563eb;
            color: #ffffff;
        }}
        button.secondary {{
            background: #e2e8f0;
            color: #0f172a;
        }}
        button:disabled {{
            opacity: 0.5;
            cursor: not-allowed;
        }}
        .status {{
            border-radius: 12px;
            padding: 1rem 1.25rem;
            margin-bottom: 1.5rem;
        }}
        .status.auto-hide {{
            animation: status-fade 0.4s ease {hide_after}s forwards;
        }}
        @keyframes status-fade {{
            to {{ opacity: 0; visibility: hidden; height: 0; padding: 0; margin: 0; }}
        }}
        .status.loading {{ background: #dbeafe; color: #1e3a8a; }}
        .status.success {{ background: #dcfce7; color: #14532d; }}
        .status.error {{ background: #fee2e2; color: #7f1d1d; }}
        .status p {{ margin: 0.35rem 0 0; font-weight: 400; }}
        dialog pre {{
            max-height: 60vh;
            overflow: auto;
            background: #0f172a;
            color: #e2e8f0;
            padding: 1rem;
            border-radius: 10px;
        }}
    </style>
</head>
<body>
<main>
    <header>
        <h1>{title}</h1>
        <p>Describe the content you need and the workflow will draft it for you.</p>
    </header>
    {status}
    <form method="post" action="/">
        {fields}
        <div class="actions">
            <button type="submit" name="action" value="submit"{disabled}>Generate Content</button>
            <button type="submit" name="action" value="preview" class="secondary"{disabled}>Preview Data</button>
            <button type="submit" name="action" value="suggest" class="secondary"{disabled}>Suggest for Focus Area</button>
            <button type="submit" name="action" value="test-connection" class="secondary"{disabled}>Test Connection</button>
        </div>
    </form>
    {preview}
</main>
</body>
</html>"##,
        refresh = refresh,
        title = escape(&page.title),
        hide_after = page.status_auto_hide.as_secs_f64(),
        status = page.status.as_ref().map(render_status).unwrap_or_default(),
        fields = FormField::ALL
            .into_iter()
            .map(|field| render_field(page, field))
            .collect::<String>(),
        disabled = disabled,
        preview = page.preview.as_deref().map(render_preview).unwrap_or_default(),
    )
}

pub fn render_status(banner: &StatusBanner) -> String {
    let class = if banner.kind.auto_hides() {
        format!("{} auto-hide", banner.kind.css_class())
    } else {
        banner.kind.css_class().to_string()
    };
    let details = if banner.details.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", escape(&banner.details))
    };

    format!(
        r#"<div id="status" class="status {class}" role="status" data-generation="{generation}"><strong>{icon} {message}</strong>{details}</div>"#,
        class = class,
        generation = banner.generation,
        icon = banner.kind.icon(),
        message = escape(&banner.message),
        details = details,
    )
}

fn render_field(page: &PageModel, field: FormField) -> String {
    let name = field.name();
    let value = page.values.get(field);
    let error = page.field_errors.get(&field);
    let required = if field.is_required() { " required" } else { "" };

    let control = match field {
        FormField::KeyMessage => format!(
            r#"<textarea id="{name}" name="{name}" rows="3"{required}>{value}</textarea>"#,
            name = name,
            required = required,
            value = escape(value),
        ),
        FormField::FocusArea => render_focus_area_select(value),
        _ => format!(
            r#"<input type="text" id="{name}" name="{name}" value="{value}"{required}>"#,
            name = name,
            required = required,
            value = escape(value),
        ),
    };

    let message = match error {
        Some(message) => format!(r#"<span class="error-message">{}</span>"#, escape(message)),
        None => String::new(),
    };

    format!(
        r#"<div class="field{error_class}"><label for="{name}">{label}{control}{message}</label></div>"#,
        error_class = if error.is_some() { " error" } else { "" },
        name = name,
        label = field.label(),
        control = control,
        message = message,
    )
}

fn render_focus_area_select(current: &str) -> String {
    let mut options = String::from(r#"<option value="">Select a focus area</option>"#);
    for area in FocusArea::ALL {
        let selected = if area.as_str() == current.trim() { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{value}"{selected}>{value}</option>"#,
            value = area.as_str(),
            selected = selected,
        ));
    }

    format!(
        r#"<select id="{name}" name="{name}">{options}</select>"#,
        name = FormField::FocusArea.name(),
        options = options,
    )
}

fn render_preview(json: &str) -> String {
    format!(
        r#"<dialog id="preview" open><h2>Payload Preview</h2><pre>{}</pre><form method="dialog"><button type="submit" class="secondary">Close</button></form></dialog>"#,
        escape(json)
    )
}
