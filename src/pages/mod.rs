use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::contact::MailRelay;
use crate::gateway::{CricketDataSource, GatewayError};
use crate::mapper;
use crate::model::display::{MatchCard, PlayerCard, SeriesCard};
use crate::store::models::{ContactMessage, Page};
use crate::store::Database;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CricketDataSource>,
    pub db: Database,
    pub mail: Option<MailRelay>,
}

/// Build the Axum router for the site.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/p/:slug", get(render_page_handler))
        .route("/api/overview", get(overview_handler))
        .route("/api/matches", get(matches_handler))
        .route("/api/matches/:id", get(match_detail_handler))
        .route("/api/series", get(series_handler))
        .route("/api/series/:id", get(series_detail_handler))
        .route("/api/players", get(players_handler))
        .route("/api/players/:id", get(player_detail_handler))
        .route(
            "/api/pages",
            get(list_pages_handler).post(create_page_handler),
        )
        .route(
            "/api/pages/:slug",
            get(get_page_handler)
                .put(update_page_handler)
                .delete(delete_page_handler),
        )
        .route(
            "/api/contact",
            axum::routing::post(contact_handler).get(list_contacts_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// JSON render state for gateway-backed endpoints. A gateway failure and a
/// successful-but-empty payload are distinct states; the front-end renders
/// a different panel for each.
#[derive(Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchView<T> {
    Ok { data: T },
    Failed { message: String },
}

fn failed<T>(context: &str, err: &GatewayError) -> FetchView<T> {
    warn!("{context} failed to load: {err}");
    FetchView::Failed {
        message: format!("failed to load {context}: {err}"),
    }
}

// ── Gateway-backed controllers ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchesQuery {
    pub status: Option<String>,
}

/// GET /api/matches?status=all|live|upcoming|finished
async fn matches_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MatchesQuery>,
) -> Json<FetchView<Vec<MatchCard>>> {
    let raw_filter = query.status.as_deref().unwrap_or("all");
    match state.source.current_matches().await {
        Ok(records) => {
            let cards = records.iter().map(mapper::match_card).collect();
            Json(FetchView::Ok {
                data: mapper::filter_by_status(cards, raw_filter),
            })
        }
        Err(err) => Json(failed("matches", &err)),
    }
}

/// GET /api/matches/{id}
async fn match_detail_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<FetchView<MatchCard>> {
    match state.source.match_info(&id).await {
        Ok(record) => Json(FetchView::Ok {
            data: mapper::match_card(&record),
        }),
        Err(err) => Json(failed("match", &err)),
    }
}

/// GET /api/series
async fn series_handler(State(state): State<Arc<AppState>>) -> Json<FetchView<Vec<SeriesCard>>> {
    match state.source.series_list().await {
        Ok(records) => {
            let today = Utc::now().date_naive();
            Json(FetchView::Ok {
                data: records.iter().map(|s| mapper::series_card(s, today)).collect(),
            })
        }
        Err(err) => Json(failed("series", &err)),
    }
}

#[derive(Serialize)]
pub struct SeriesDetail {
    pub series: SeriesCard,
    pub matches: Vec<MatchCard>,
}

/// GET /api/series/{id}
async fn series_detail_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<FetchView<SeriesDetail>> {
    match state.source.series_info(&id).await {
        Ok(bundle) => {
            let today = Utc::now().date_naive();
            Json(FetchView::Ok {
                data: SeriesDetail {
                    series: mapper::series_card(&bundle.info, today),
                    matches: bundle.match_list.iter().map(mapper::match_card).collect(),
                },
            })
        }
        Err(err) => Json(failed("series", &err)),
    }
}

#[derive(Debug, Deserialize)]
pub struct PlayersQuery {
    pub offset: Option<u32>,
}

/// GET /api/players?offset=0
async fn players_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlayersQuery>,
) -> Json<FetchView<Vec<PlayerCard>>> {
    match state.source.player_list(query.offset.unwrap_or(0)).await {
        Ok(records) => Json(FetchView::Ok {
            data: records.iter().map(mapper::player_card).collect(),
        }),
        Err(err) => Json(failed("players", &err)),
    }
}

/// GET /api/players/{id}
async fn player_detail_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<FetchView<PlayerCard>> {
    match state.source.player_info(&id).await {
        Ok(record) => Json(FetchView::Ok {
            data: mapper::player_card(&record),
        }),
        Err(err) => Json(failed("player", &err)),
    }
}

#[derive(Serialize)]
pub struct OverviewView {
    pub matches: FetchView<Vec<MatchCard>>,
    pub series: FetchView<Vec<SeriesCard>>,
}

/// GET /api/overview: landing-page fan-out, both sections fetched
/// concurrently and degraded independently.
async fn overview_handler(State(state): State<Arc<AppState>>) -> Json<OverviewView> {
    let (matches, series) = futures_util::future::join(
        state.source.current_matches(),
        state.source.series_list(),
    )
    .await;

    let today = Utc::now().date_naive();
    let matches = match matches {
        Ok(records) => FetchView::Ok {
            data: records.iter().map(mapper::match_card).collect(),
        },
        Err(err) => failed("matches", &err),
    };
    let series = match series {
        Ok(records) => FetchView::Ok {
            data: records.iter().map(|s| mapper::series_card(s, today)).collect(),
        },
        Err(err) => failed("series", &err),
    };

    Json(OverviewView { matches, series })
}

// ── Admin content controllers ─────────────────────────────────────────────────

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn validate_slug(slug: &str) -> Result<(), (StatusCode, String)> {
    let ok = !slug.is_empty()
        && slug.len() <= 120
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if ok {
        Ok(())
    } else {
        Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "slug must be lowercase letters, digits and dashes".to_string(),
        ))
    }
}

fn default_template() -> String {
    "page".to_string()
}

#[derive(Debug, Deserialize)]
pub struct PageInput {
    pub slug: String,
    pub title: String,
    pub body: String,
    #[serde(default = "default_template")]
    pub template: String,
}

#[derive(Debug, Deserialize)]
pub struct PageUpdate {
    pub title: String,
    pub body: String,
    #[serde(default = "default_template")]
    pub template: String,
}

/// GET /api/pages
async fn list_pages_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.db.list_pages().map(Json).map_err(internal)
}

/// GET /api/pages/{slug}
async fn get_page_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    match state.db.get_page(&slug).map_err(internal)? {
        Some(page) => Ok(Json(page)),
        None => Err((StatusCode::NOT_FOUND, format!("no page '{slug}'"))),
    }
}

/// POST /api/pages. Duplicate slugs are rejected, never overwritten.
async fn create_page_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PageInput>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    validate_slug(&input.slug)?;
    if state.db.get_page(&input.slug).map_err(internal)?.is_some() {
        return Err((
            StatusCode::CONFLICT,
            format!("slug '{}' is already taken", input.slug),
        ));
    }
    let mut page = Page {
        id: None,
        slug: input.slug,
        title: input.title,
        body: input.body,
        template: input.template,
        updated_at: Utc::now(),
    };
    // The schema's UNIQUE constraint backstops the pre-check.
    let id = state.db.create_page(&page).map_err(internal)?;
    page.id = Some(id);
    Ok((StatusCode::CREATED, Json(page)))
}

/// PUT /api/pages/{slug}
async fn update_page_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(input): Json<PageUpdate>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let changed = state
        .db
        .update_page(&slug, &input.title, &input.body, &input.template)
        .map_err(internal)?;
    if !changed {
        return Err((StatusCode::NOT_FOUND, format!("no page '{slug}'")));
    }
    match state.db.get_page(&slug).map_err(internal)? {
        Some(page) => Ok(Json(page)),
        None => Err((StatusCode::NOT_FOUND, format!("no page '{slug}'"))),
    }
}

/// DELETE /api/pages/{slug}
async fn delete_page_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if state.db.delete_page(&slug).map_err(internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, format!("no page '{slug}'")))
    }
}

// ── Contact form ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ContactAck {
    pub status: &'static str,
}

/// POST /api/contact: store the submission, then relay it when a mail
/// relay is configured. Relay failure is a generic error, never a crash.
async fn contact_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if form.name.trim().is_empty() || form.email.trim().is_empty() || form.message.trim().is_empty()
    {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "name, email and message are required".to_string(),
        ));
    }

    let msg = ContactMessage {
        id: None,
        name: form.name,
        email: form.email,
        message: form.message,
        submitted_at: Utc::now(),
    };
    state.db.record_contact(&msg).map_err(internal)?;

    match &state.mail {
        Some(relay) => {
            if let Err(err) = relay.send(&msg).await {
                warn!("Contact relay failed: {err}");
                return Err((
                    StatusCode::BAD_GATEWAY,
                    "message could not be sent".to_string(),
                ));
            }
        }
        None => info!("Mail relay not configured; contact message stored only"),
    }

    Ok(Json(ContactAck { status: "ok" }))
}

/// GET /api/contact: recent submissions, for the admin view.
async fn list_contacts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.db.list_recent_contacts(50).map(Json).map_err(internal)
}

// ── Server-rendered pages ─────────────────────────────────────────────────────

/// Serve the site shell, tagging the body with the active data source.
async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let html = SITE_HTML.replace(
        r#"<body>"#,
        &format!(r#"<body data-source="{}">"#, state.source.name()),
    );
    Html(html)
}

/// GET /p/{slug}: dynamic-slug lookup into the content store.
async fn render_page_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    match state.db.get_page(&slug) {
        Ok(Some(page)) => Ok(Html(render_page_html(&page))),
        Ok(None) => Err((StatusCode::NOT_FOUND, Html(render_missing_html(&slug)))),
        Err(err) => {
            warn!("Page lookup failed for '{slug}': {err}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_missing_html(&slug)),
            ))
        }
    }
}

fn render_page_html(page: &Page) -> String {
    PAGE_HTML
        .replace("{{title}}", &escape_html(&page.title))
        .replace("{{template}}", &escape_html(&page.template))
        .replace(
            "{{updated}}",
            &page.updated_at.format("%-d %b %Y").to_string(),
        )
        // Body is admin-authored markup and renders as-is.
        .replace("{{body}}", &page.body)
}

fn render_missing_html(slug: &str) -> String {
    PAGE_HTML
        .replace("{{title}}", "Page not found")
        .replace("{{template}}", "page")
        .replace("{{updated}}", "")
        .replace(
            "{{body}}",
            &format!(
                "<p>There is no page at <code>/p/{}</code>.</p>",
                escape_html(slug)
            ),
        )
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Embedded single-file site shell (HTML + CSS + JS)
const SITE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Cricdar — Live Cricket</title>
<style>
  :root {
    --bg: #0e1310;
    --card: #16201a;
    --border: #263329;
    --accent: #2fbf71;
    --amber: #ffb347;
    --red: #ff5c5c;
    --text: #e4ece6;
    --muted: #88a08f;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  header .sub { color: var(--muted); font-size: .8rem; margin-left: auto; }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; display: flex; justify-content: space-between; align-items: center; }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .7rem 1rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .65rem 1rem; font-size: .88rem; border-bottom: 1px solid #1c2620; }
  tr:last-child td { border-bottom: none; }
  .pill { display: inline-block; padding: .15rem .55rem; border-radius: 20px; font-size: .75rem; font-weight: 600; }
  .pill.Live { background: rgba(255,92,92,.15); color: var(--red); }
  .pill.Upcoming { background: rgba(255,179,71,.15); color: var(--amber); }
  .pill.Finished { background: rgba(47,191,113,.15); color: var(--accent); }
  .pill.Ongoing { background: rgba(47,191,113,.15); color: var(--accent); }
  .pill.Completed { background: rgba(136,160,143,.2); color: var(--muted); }
  .score { font-variant-numeric: tabular-nums; white-space: nowrap; }
  .empty { color: var(--muted); text-align: center; padding: 2rem; font-size: .9rem; }
  .error { color: var(--red); text-align: center; padding: 2rem; font-size: .9rem; }
  .filters button { background: none; border: 1px solid var(--border); color: var(--muted); padding: .3rem .8rem; border-radius: 6px; cursor: pointer; font-size: .8rem; margin-left: .4rem; }
  .filters button.active, .filters button:hover { border-color: var(--accent); color: var(--accent); }
  .two-col { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
  @media (max-width: 768px) { .two-col { grid-template-columns: 1fr; } }
  a { color: var(--accent); text-decoration: none; }
</style>
</head>
<body>
<header>
  <h1>🏏 Cricdar</h1>
  <span class="sub" id="last-updated"></span>
</header>

<main>
  <!-- Matches -->
  <div class="panel">
    <div class="panel-header">
      Matches
      <span class="filters" id="filters">
        <button data-status="all" class="active">All</button>
        <button data-status="live">Live</button>
        <button data-status="upcoming">Upcoming</button>
        <button data-status="finished">Finished</button>
      </span>
    </div>
    <table>
      <thead><tr><th>Match</th><th>Scores</th><th>Status</th><th>Result</th></tr></thead>
      <tbody id="matches-tbody"><tr><td colspan="4" class="empty">Loading…</td></tr></tbody>
    </table>
  </div>

  <div class="two-col">
    <!-- Series -->
    <div class="panel">
      <div class="panel-header">Series</div>
      <table>
        <thead><tr><th>Series</th><th>Formats</th><th>Matches</th><th>Status</th></tr></thead>
        <tbody id="series-tbody"><tr><td colspan="4" class="empty">Loading…</td></tr></tbody>
      </table>
    </div>

    <!-- News & pages -->
    <div class="panel">
      <div class="panel-header">News &amp; Pages</div>
      <table>
        <thead><tr><th>Title</th><th>Type</th><th>Updated</th></tr></thead>
        <tbody id="pages-tbody"><tr><td colspan="3" class="empty">Loading…</td></tr></tbody>
      </table>
    </div>
  </div>
</main>

<script>
const esc = s => String(s ?? '').replace(/[&<>"]/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;'}[c]));

function teamLine(t) {
  const score = t.score ? ` <span class="score">${esc(t.score)}${t.overs ? ' (' + esc(t.overs) + ' ov)' : ''}</span>` : '';
  return esc(t.short_name || t.name) + score;
}

// A failed gateway call and an empty result render different panels.
function renderFailed(tbody, cols, message) {
  tbody.innerHTML = `<tr><td colspan="${cols}" class="error">⚠ ${esc(message)}</td></tr>`;
}
function renderEmpty(tbody, cols, message) {
  tbody.innerHTML = `<tr><td colspan="${cols}" class="empty">${esc(message)}</td></tr>`;
}

async function fetchView(url) {
  try {
    const r = await fetch(url);
    return await r.json();
  } catch (e) {
    return { state: 'failed', message: 'network error contacting Cricdar' };
  }
}

async function loadMatches(status) {
  const tbody = document.getElementById('matches-tbody');
  const view = await fetchView('/api/matches?status=' + encodeURIComponent(status));
  if (view.state === 'failed') { renderFailed(tbody, 4, view.message); return; }
  if (!view.data.length) { renderEmpty(tbody, 4, 'No matches for this filter'); return; }
  tbody.innerHTML = view.data.map(m => `<tr>
    <td>${esc(m.title)}</td>
    <td>${m.teams.map(teamLine).join('<br>')}</td>
    <td><span class="pill ${m.status}">${m.status}</span></td>
    <td>${esc(m.result || '–')}</td>
  </tr>`).join('');
}

async function loadSeries() {
  const tbody = document.getElementById('series-tbody');
  const view = await fetchView('/api/series');
  if (view.state === 'failed') { renderFailed(tbody, 4, view.message); return; }
  if (!view.data.length) { renderEmpty(tbody, 4, 'No series right now'); return; }
  tbody.innerHTML = view.data.map(s => `<tr>
    <td>${esc(s.name)}${s.year ? ' <span style="color:var(--muted)">' + s.year + '</span>' : ''}</td>
    <td>${esc(s.formats.join(' · ') || '–')}</td>
    <td>${s.match_count}</td>
    <td><span class="pill ${s.status}">${s.status}</span></td>
  </tr>`).join('');
}

async function loadPages() {
  const tbody = document.getElementById('pages-tbody');
  let pages;
  try {
    const r = await fetch('/api/pages');
    if (!r.ok) throw new Error(r.status);
    pages = await r.json();
  } catch (e) {
    renderFailed(tbody, 3, 'failed to load pages');
    return;
  }
  if (!pages.length) { renderEmpty(tbody, 3, 'Nothing published yet'); return; }
  tbody.innerHTML = pages.map(p => `<tr>
    <td><a href="/p/${encodeURIComponent(p.slug)}">${esc(p.title)}</a></td>
    <td>${esc(p.template)}</td>
    <td>${new Date(p.updated_at).toLocaleDateString()}</td>
  </tr>`).join('');
}

let currentStatus = 'all';
document.getElementById('filters').addEventListener('click', e => {
  const btn = e.target.closest('button');
  if (!btn) return;
  currentStatus = btn.dataset.status;
  document.querySelectorAll('#filters button').forEach(b => b.classList.toggle('active', b === btn));
  loadMatches(currentStatus);
});

async function loadAll() {
  await Promise.all([loadMatches(currentStatus), loadSeries(), loadPages()]);
  document.getElementById('last-updated').textContent = 'Updated ' + new Date().toLocaleTimeString();
}

loadAll();
setInterval(loadAll, 30000);
</script>
</body>
</html>"#;

/// Shell for store-backed pages; filled in by string substitution.
const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{title}} — Cricdar</title>
<style>
  body { background: #0e1310; color: #e4ece6; font-family: 'Segoe UI', system-ui, sans-serif; margin: 0; }
  header { padding: 1rem 2rem; border-bottom: 1px solid #263329; }
  header a { color: #2fbf71; text-decoration: none; font-weight: 700; }
  article { max-width: 46rem; margin: 2rem auto; padding: 0 1.5rem; line-height: 1.6; }
  article h1 { margin-bottom: .3rem; }
  .meta { color: #88a08f; font-size: .8rem; margin-bottom: 1.5rem; }
  code { background: #16201a; padding: .1rem .3rem; border-radius: 4px; }
</style>
</head>
<body>
<header><a href="/">🏏 Cricdar</a></header>
<article>
  <h1>{{title}}</h1>
  <div class="meta">{{template}} · {{updated}}</div>
  {{body}}
</article>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::response::IntoResponse;

    use crate::gateway::Result as GatewayResult;
    use crate::model::provider::{
        ProviderInnings, ProviderMatch, ProviderPlayer, ProviderSeries, SeriesBundle,
    };

    struct StubSource {
        fail: bool,
    }

    fn config_error(endpoint: &str) -> GatewayError {
        GatewayError::Config {
            endpoint: endpoint.to_string(),
            reason: "no api key set".to_string(),
        }
    }

    fn provider_matches() -> Vec<ProviderMatch> {
        vec![
            ProviderMatch {
                id: "m1".into(),
                name: "India vs Australia, 1st ODI".into(),
                match_type: Some("odi".into()),
                status: Some("India opt to bat".into()),
                venue: None,
                date: None,
                teams: vec!["India".into(), "Australia".into()],
                team_info: vec![],
                score: vec![ProviderInnings {
                    runs: Some(245),
                    wickets: Some(6),
                    overs: Some(48.3),
                    inning: Some("India Inning 1".into()),
                }],
                series: None,
                series_id: None,
                match_started: Some(true),
                match_ended: Some(false),
            },
            ProviderMatch {
                id: "m2".into(),
                name: "India vs Australia, 2nd ODI".into(),
                match_type: Some("odi".into()),
                status: Some("Match not started".into()),
                venue: None,
                date: None,
                teams: vec!["India".into(), "Australia".into()],
                team_info: vec![],
                score: vec![],
                series: None,
                series_id: None,
                match_started: Some(false),
                match_ended: Some(false),
            },
        ]
    }

    #[async_trait]
    impl CricketDataSource for StubSource {
        async fn current_matches(&self) -> GatewayResult<Vec<ProviderMatch>> {
            if self.fail {
                return Err(config_error("currentMatches"));
            }
            Ok(provider_matches())
        }

        async fn match_info(&self, _id: &str) -> GatewayResult<ProviderMatch> {
            if self.fail {
                return Err(config_error("match_info"));
            }
            Ok(provider_matches().remove(0))
        }

        async fn series_list(&self) -> GatewayResult<Vec<ProviderSeries>> {
            if self.fail {
                return Err(config_error("series"));
            }
            Ok(vec![])
        }

        async fn series_info(&self, _id: &str) -> GatewayResult<SeriesBundle> {
            Err(config_error("series_info"))
        }

        async fn player_list(&self, _offset: u32) -> GatewayResult<Vec<ProviderPlayer>> {
            Err(config_error("players"))
        }

        async fn player_info(&self, _id: &str) -> GatewayResult<ProviderPlayer> {
            Err(config_error("players_info"))
        }

        fn name(&self) -> &str {
            "Stub"
        }
    }

    fn state(fail: bool) -> State<Arc<AppState>> {
        State(Arc::new(AppState {
            source: Arc::new(StubSource { fail }),
            db: Database::open(":memory:").unwrap(),
            mail: None,
        }))
    }

    fn query(status: Option<&str>) -> Query<MatchesQuery> {
        Query(MatchesQuery {
            status: status.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_upcoming_filter_yields_single_unscored_card() {
        let Json(view) = matches_handler(state(false), query(Some("UpComing"))).await;
        match view {
            FetchView::Ok { data } => {
                assert_eq!(data.len(), 1);
                assert_eq!(data[0].id, "m2");
                assert!(data[0].teams.iter().all(|t| t.score.is_none()));
            }
            FetchView::Failed { message } => panic!("expected ok state, got: {message}"),
        }
    }

    #[tokio::test]
    async fn test_missing_filter_defaults_to_all() {
        let Json(view) = matches_handler(state(false), query(None)).await;
        match view {
            FetchView::Ok { data } => assert_eq!(data.len(), 2),
            FetchView::Failed { message } => panic!("expected ok state, got: {message}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_filter_is_empty_ok_not_failed() {
        let Json(view) = matches_handler(state(false), query(Some("abandoned"))).await;
        match view {
            FetchView::Ok { data } => assert!(data.is_empty()),
            FetchView::Failed { message } => panic!("expected ok state, got: {message}"),
        }
    }

    #[tokio::test]
    async fn test_gateway_failure_is_failed_state_not_empty_list() {
        let Json(view) = matches_handler(state(true), query(Some("all"))).await;
        match view {
            FetchView::Failed { message } => {
                assert!(message.contains("failed to load matches"));
                assert!(message.contains("no api key set"));
            }
            FetchView::Ok { .. } => panic!("expected failed state"),
        }
    }

    #[tokio::test]
    async fn test_overview_sections_degrade_independently() {
        let Json(view) = overview_handler(state(true)).await;
        assert!(matches!(view.matches, FetchView::Failed { .. }));
        assert!(matches!(view.series, FetchView::Failed { .. }));

        let Json(view) = overview_handler(state(false)).await;
        assert!(matches!(view.matches, FetchView::Ok { .. }));
        assert!(matches!(view.series, FetchView::Ok { .. }));
    }

    fn page_input(slug: &str) -> Json<PageInput> {
        Json(PageInput {
            slug: slug.into(),
            title: "Tour preview".into(),
            body: "<p>Five matches.</p>".into(),
            template: "news".into(),
        })
    }

    #[tokio::test]
    async fn test_create_page_then_duplicate_conflicts() {
        let st = state(false);
        let created = create_page_handler(st.clone(), page_input("tour-preview"))
            .await
            .into_response();
        assert_eq!(created.status(), StatusCode::CREATED);

        let duplicate = create_page_handler(st, page_input("tour-preview"))
            .await
            .into_response();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_page_rejects_bad_slug() {
        let resp = create_page_handler(state(false), page_input("Tour Preview!"))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_render_missing_page_is_not_found() {
        let resp = render_page_handler(state(false), Path("ghost".into()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_render_stored_page_substitutes_title() {
        let st = state(false);
        create_page_handler(st.clone(), page_input("tour-preview"))
            .await
            .into_response();
        let page = render_page_handler(st, Path("tour-preview".into())).await;
        let html = page.expect("page should render").0;
        assert!(html.contains("Tour preview"));
        assert!(html.contains("<p>Five matches.</p>"));
    }

    #[tokio::test]
    async fn test_contact_without_relay_stores_and_acks() {
        let st = state(false);
        let resp = contact_handler(
            st.clone(),
            Json(ContactForm {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                message: "Great site".into(),
            }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(st.0.db.list_recent_contacts(10).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_contact_rejects_blank_fields() {
        let resp = contact_handler(
            state(false),
            Json(ContactForm {
                name: " ".into(),
                email: "asha@example.com".into(),
                message: "hello".into(),
            }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
