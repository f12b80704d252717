//! Page routing for the channel browser.
//!
//! Two page states exist: the channel list (`channel`) and a single channel
//! (`channel_page`). The root path redirects to the channel list.

mod view;

pub use view::*;

use axum::{extract::State, http::Uri, response::Redirect};

use crate::api::{success, ApiResult};
use crate::errors::AppError;
use crate::AppState;

/// Path of the channel list page; `/` redirects here.
pub const CHANNEL_ROUTE: &str = "/channel";

/// A resolved page and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Channel list, nothing selected
    Channel,
    /// A specific channel
    ChannelPage { channel: String },
}

impl Page {
    /// Route name of the page.
    pub fn name(&self) -> &'static str {
        match self {
            Page::Channel => "channel",
            Page::ChannelPage { .. } => "channel_page",
        }
    }

    /// Resolve a URL path to a page, following the root redirect.
    ///
    /// The channel parameter is percent-decoded; invalid UTF-8 resolves to nothing.
    pub fn resolve(path: &str) -> Option<Page> {
        if path == "/" {
            return Page::resolve(CHANNEL_ROUTE);
        }

        let rest = path.strip_prefix(CHANNEL_ROUTE)?;
        match rest {
            "" | "/" => Some(Page::Channel),
            _ => {
                let channel = rest.strip_prefix('/')?;
                if channel.contains('/') {
                    return None;
                }
                let channel = urlencoding::decode(channel).ok()?;
                Some(Page::ChannelPage {
                    channel: channel.into_owned(),
                })
            }
        }
    }
}

/// GET / - Redirect to the channel list.
pub async fn root_redirect() -> Redirect {
    Redirect::temporary(CHANNEL_ROUTE)
}

/// GET /channel and /channel/:channel - Resolve the path to a page and render it.
pub async fn show(State(state): State<AppState>, uri: Uri) -> ApiResult<ChannelView> {
    let page = Page::resolve(uri.path())
        .ok_or_else(|| AppError::NotFound(format!("No page at {}", uri.path())))?;
    render(&state, page).await
}

/// Fallback for paths no page resolves to.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No page at {}", uri.path()))
}

async fn render(state: &AppState, page: Page) -> ApiResult<ChannelView> {
    let (store, warnings) = state.viewable_store().await?;
    tracing::debug!("Rendering page {}", page.name());
    success(ChannelView::build(&store, &page, warnings)?)
}
