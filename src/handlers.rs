use crate::{
    calendar::{self, ListRow, MonthGrid, WeekGrid},
    error::{AppError, AppResult},
    filter::EventQuery,
    gallery::{self, AlbumCount, PhotoQuery, SortOrder},
    ics,
    models::{Event, Photo, UnknownVariant},
    state::AppState,
    timeline,
};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

const DEFAULT_UPCOMING_LIMIT: usize = 3;

fn parse_set<T>(raw: Option<&str>, what: &str) -> AppResult<BTreeSet<T>>
where
    T: FromStr<Err = UnknownVariant> + Ord,
{
    raw.unwrap_or_default()
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.parse()
                .map_err(|e: UnknownVariant| AppError::BadRequest(format!("{what}: {e}")))
        })
        .collect()
}

fn event_query(category: Option<&str>, q: Option<&str>) -> AppResult<EventQuery> {
    Ok(EventQuery {
        categories: parse_set(category, "category")?,
        search: q.unwrap_or_default().to_string(),
    })
}

/// `at` pins the evaluation instant; otherwise the wall clock is used.
///
/// An unencoded `+hh:mm` offset arrives as a space after form decoding, so a
/// space inside the value is read back as `+`.
fn evaluation_instant(at: Option<&str>) -> AppResult<DateTime<Utc>> {
    let Some(raw) = at else {
        return Ok(Utc::now());
    };
    let restored = raw.trim().replace(' ', "+");
    DateTime::parse_from_rfc3339(&restored)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| {
            AppError::BadRequest(format!("at: '{raw}' is not an RFC 3339 timestamp"))
        })
}

fn calendar_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

pub async fn root_handler(State(app_state): State<AppState>) -> Html<String> {
    let index = app_state.config.templates_dir.join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(page) => Html(page),
        Err(e) => {
            tracing::warn!(path = %index.display(), error = %e, "front page template missing");
            Html("<h1>Error: could not load index.html</h1>".to_string())
        }
    }
}

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    events: usize,
    photos: usize,
}

pub async fn health(State(app_state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        events: app_state.data.events.len(),
        photos: app_state.data.photos.len(),
    })
}

#[derive(Deserialize)]
pub struct EventListParams {
    category: Option<String>,
    q: Option<String>,
    at: Option<String>,
}

#[derive(Serialize)]
pub struct EventListResponse {
    upcoming: Vec<ListRow>,
    past: Vec<ListRow>,
}

pub async fn list_events(
    State(app_state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> Result<Json<EventListResponse>, AppError> {
    let query = event_query(params.category.as_deref(), params.q.as_deref())?;
    let now = evaluation_instant(params.at.as_deref())?;
    let config = &app_state.config;

    let split = timeline::partition(query.apply(&app_state.data.events), now);
    tracing::debug!(
        upcoming = split.upcoming.len(),
        past = split.past.len(),
        %now,
        "event list"
    );
    Ok(Json(EventListResponse {
        upcoming: calendar::list_rows(split.upcoming, config.display_offset, &config.ics_domain),
        past: calendar::list_rows(split.past, config.display_offset, &config.ics_domain),
    }))
}

#[derive(Deserialize)]
pub struct UpcomingParams {
    limit: Option<usize>,
    at: Option<String>,
}

pub async fn upcoming_events(
    State(app_state): State<AppState>,
    Query(params): Query<UpcomingParams>,
) -> Result<Json<Vec<Event>>, AppError> {
    let now = evaluation_instant(params.at.as_deref())?;
    let limit = params.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);
    let next = timeline::upcoming(&app_state.data.events, now, limit);
    Ok(Json(next.into_iter().cloned().collect()))
}

#[derive(Deserialize)]
pub struct MonthParams {
    year: Option<i32>,
    month: Option<u32>,
    category: Option<String>,
    q: Option<String>,
}

pub async fn month_calendar(
    State(app_state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Json<MonthGrid>, AppError> {
    let query = event_query(params.category.as_deref(), params.q.as_deref())?;
    let offset = app_state.config.display_offset;
    let today = Utc::now().with_timezone(&offset).date_naive();
    let year = params.year.unwrap_or(today.year());
    let month = params.month.unwrap_or(today.month());

    calendar::month_grid(query.apply(&app_state.data.events), year, month, offset)
        .map(Json)
        .ok_or_else(|| AppError::BadRequest(format!("no such month: {year}-{month}")))
}

#[derive(Deserialize)]
pub struct WeekParams {
    start: Option<NaiveDate>,
    category: Option<String>,
    q: Option<String>,
}

pub async fn week_calendar(
    State(app_state): State<AppState>,
    Query(params): Query<WeekParams>,
) -> Result<Json<WeekGrid>, AppError> {
    let query = event_query(params.category.as_deref(), params.q.as_deref())?;
    let offset = app_state.config.display_offset;
    let start = match params.start {
        Some(start) => start,
        None => calendar::sunday_on_or_before(Utc::now().with_timezone(&offset).date_naive())
            .ok_or_else(|| AppError::BadRequest("no week contains today".to_string()))?,
    };

    calendar::week_grid(query.apply(&app_state.data.events), start, offset)
        .map(Json)
        .ok_or_else(|| AppError::BadRequest(format!("no such week: {start}")))
}

fn find_event<'a>(app_state: &'a AppState, id: &str) -> AppResult<&'a Event> {
    app_state
        .data
        .event(id)
        .ok_or_else(|| AppError::NotFound(format!("no event with id '{id}'")))
}

pub async fn get_event(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    find_event(&app_state, &id).cloned().map(Json)
}

pub async fn event_ics(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = find_event(&app_state, &id)?;
    let body = ics::event_to_ics(event, &app_state.config.ics_domain);
    Ok(calendar_response(&format!("{}.ics", event.id), body))
}

#[derive(Deserialize)]
pub struct FeedParams {
    category: Option<String>,
    q: Option<String>,
}

pub async fn calendar_feed(
    State(app_state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Response, AppError> {
    let query = event_query(params.category.as_deref(), params.q.as_deref())?;
    let events = query.apply(&app_state.data.events);
    let body = ics::calendar_feed(events, &app_state.config.ics_domain);
    Ok(calendar_response("ayc-events.ics", body))
}

#[derive(Deserialize)]
pub struct PhotoParams {
    album: Option<String>,
    q: Option<String>,
    order: Option<String>,
}

pub async fn list_photos(
    State(app_state): State<AppState>,
    Query(params): Query<PhotoParams>,
) -> Result<Json<Vec<Photo>>, AppError> {
    let order = match params.order.as_deref() {
        Some(raw) => raw.parse::<SortOrder>().map_err(AppError::BadRequest)?,
        None => SortOrder::default(),
    };
    let query = PhotoQuery {
        albums: parse_set(params.album.as_deref(), "album")?,
        search: params.q.unwrap_or_default(),
        order,
    };
    let photos = query.apply(&app_state.data.photos);
    Ok(Json(photos.into_iter().cloned().collect()))
}

pub async fn photo_albums(State(app_state): State<AppState>) -> Json<Vec<AlbumCount>> {
    Json(gallery::albums_with_counts(&app_state.data.photos))
}

pub async fn get_photo(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Photo>, AppError> {
    app_state
        .data
        .photo(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no photo with id '{id}'")))
}
