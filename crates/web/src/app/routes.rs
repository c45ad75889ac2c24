use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use poview_core::DomainResult;
use poview_purchasing::{
    PurchaseOrderSummary, Selection, SortDirection, SortKey, SortSpec, sort_rows, summarize,
};

use super::WebState;
use super::errors::page_error;
use crate::fetch::FetchOutcome;
use crate::render::RenderError;
use crate::view::{INDEX_PATH, IndexTableView, PlainTableView, fetch_notice};

/// Raw query string of the index table.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub selected: Option<String>,
}

impl IndexQuery {
    /// Parse into a sort (none unless `sort` is present) and a selection.
    ///
    /// `direction` only takes effect together with `sort`; a missing direction
    /// means the default.
    pub fn parse(&self) -> DomainResult<(Option<SortSpec>, Selection)> {
        let direction = match self.direction.as_deref() {
            Some(raw) => raw.parse::<SortDirection>()?,
            None => SortDirection::default(),
        };
        let sort = match self.sort.as_deref() {
            Some(raw) => Some(SortSpec::new(raw.parse::<SortKey>()?, direction)),
            None => None,
        };
        let selection = match self.selected.as_deref() {
            Some(raw) => raw.parse::<Selection>()?,
            None => Selection::new(),
        };
        Ok((sort, selection))
    }
}

fn into_rows(outcome: FetchOutcome) -> (Vec<PurchaseOrderSummary>, Option<String>) {
    let notice = outcome.error.as_ref().map(fetch_notice);
    (summarize(outcome.orders), notice)
}

fn html_or_500(state: &WebState, rendered: Result<String, RenderError>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render page");
            page_error(&state.renderer, StatusCode::INTERNAL_SERVER_ERROR, "failed to render page")
        }
    }
}

/// `GET /`
pub async fn index() -> Redirect {
    Redirect::to(INDEX_PATH)
}

/// `GET /purchase-orders`: the sortable, selectable index table.
pub async fn index_table(
    Extension(state): Extension<Arc<WebState>>,
    Query(query): Query<IndexQuery>,
) -> Response {
    let (sort, mut selection) = match query.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            return page_error(
                &state.renderer,
                StatusCode::BAD_REQUEST,
                format!("{} ({})", e, e.code()),
            );
        }
    };

    let (mut rows, notice) = into_rows(state.client.get_data().await);
    if let Some(spec) = sort {
        sort_rows(&mut rows, spec);
    }
    selection.retain_visible(&rows);

    let view = IndexTableView::build(&rows, sort, &selection, notice);
    html_or_500(&state, state.renderer.index_table(&view))
}

/// `GET /purchase-orders/plain`: the plain table, in API order.
pub async fn plain_table(Extension(state): Extension<Arc<WebState>>) -> Response {
    let (rows, notice) = into_rows(state.client.get_data().await);

    let view = PlainTableView::build(&rows, notice);
    html_or_500(&state, state.renderer.plain_table(&view))
}
