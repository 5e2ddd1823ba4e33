//! Search page rendering using embedded Tera templates

use rust_embed::Embed;
use serde::Serialize;
use tera::Tera;
use thiserror::Error;

use crate::core::lookup::{case_type_name, KNOWN_CASE_TYPES};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const INDEX_TEMPLATE: &str = "index.html.tera";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

#[derive(Debug, Serialize)]
struct CaseTypeOption {
    code: &'static str,
    name: &'static str,
}

/// Renders the HTML pages served by the search service
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Create a renderer with the embedded templates loaded
    pub fn new() -> Result<Self, PageError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                let template_str = std::str::from_utf8(&content.data)
                    .map_err(|e| PageError::RenderError(format!("{}: {}", filename, e)))?;
                tera.add_raw_template(filename, template_str)
                    .map_err(|e| PageError::RenderError(e.to_string()))?;
            }
        }

        if !tera.get_template_names().any(|n| n == INDEX_TEMPLATE) {
            return Err(PageError::NotFound(INDEX_TEMPLATE.to_string()));
        }

        Ok(Self { tera })
    }

    /// Render the case search page
    pub fn render_index(&self) -> Result<String, PageError> {
        let case_types: Vec<CaseTypeOption> = KNOWN_CASE_TYPES
            .iter()
            .copied()
            .map(|code| CaseTypeOption {
                code,
                name: case_type_name(code),
            })
            .collect();

        let mut context = tera::Context::new();
        context.insert("title", "Delhi High Court Case Status");
        context.insert("case_types", &case_types);
        context.insert("min_year", &2000);
        context.insert("max_year", &2030);

        self.tera
            .render(INDEX_TEMPLATE, &context)
            .map_err(|e| PageError::RenderError(e.to_string()))
    }
}
