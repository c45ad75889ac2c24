//! Server-side HTML rendering with tera.
//!
//! Templates are compiled into the binary and registered once at startup.

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::view::{IndexTableView, PlainTableView};

const TEMPLATES: [(&str, &str); 4] = [
    ("layout.html", include_str!("../templates/layout.html")),
    ("index_table.html", include_str!("../templates/index_table.html")),
    ("plain_table.html", include_str!("../templates/plain_table.html")),
    ("error.html", include_str!("../templates/error.html")),
];

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to load templates: {0}")]
    Load(tera::Error),
    #[error("failed to build context for {template}: {source}")]
    Context {
        template: &'static str,
        source: tera::Error,
    },
    #[error("failed to render {template}: {source}")]
    Render {
        template: &'static str,
        source: tera::Error,
    },
}

#[derive(Debug, Serialize)]
struct ErrorPage<'a> {
    status: u16,
    message: &'a str,
}

#[derive(Debug)]
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES).map_err(RenderError::Load)?;
        debug!(templates = TEMPLATES.len(), "page templates loaded");
        Ok(Self { tera })
    }

    pub fn index_table(&self, view: &IndexTableView) -> Result<String, RenderError> {
        self.render("index_table.html", view)
    }

    pub fn plain_table(&self, view: &PlainTableView) -> Result<String, RenderError> {
        self.render("plain_table.html", view)
    }

    pub fn error_page(&self, status: u16, message: &str) -> Result<String, RenderError> {
        self.render("error.html", &ErrorPage { status, message })
    }

    fn render(&self, template: &'static str, value: &impl Serialize) -> Result<String, RenderError> {
        let context = Context::from_serialize(value)
            .map_err(|source| RenderError::Context { template, source })?;
        self.tera
            .render(template, &context)
            .map_err(|source| RenderError::Render { template, source })
    }
}
