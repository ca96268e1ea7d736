use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::domain::{Contact, ContactId, DateRange, PrisonerId, RelationshipCategory};
use super::filter::{ContactListFilter, SocialContactFilter};
use super::repository::ContactSource;
use super::service::RegistryService;

/// Router builder exposing the registry endpoints.
pub fn registry_router<S: ContactSource + 'static>(
    service: Arc<RegistryService<S>>,
) -> Router {
    Router::new()
        .route(
            "/v2/prisoners/:prisoner_id/contacts",
            get(contact_list_handler::<S>),
        )
        .route(
            "/v2/prisoners/:prisoner_id/contacts/social/approved",
            get(approved_social_handler::<S>),
        )
        .route(
            "/v2/prisoners/:prisoner_id/contacts/social/approved/restrictions/banned/dateRange",
            get(banned_window_handler::<S>),
        )
        .route(
            "/v2/prisoners/:prisoner_id/contacts/social/approved/restrictions/closed",
            get(closed_status_handler::<S>),
        )
        .route(
            "/v2/prisoners/:prisoner_id/contacts/social/approved/restrictions/visit-request/date-ranges",
            get(visit_request_windows_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContactListQuery {
    #[serde(rename = "type")]
    pub(crate) contact_type: Option<String>,
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) approved_visitors_only: bool,
    #[serde(default)]
    pub(crate) with_address: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SocialContactQuery {
    pub(crate) has_date_of_birth: Option<bool>,
    pub(crate) not_banned_before_date: Option<String>,
    #[serde(default)]
    pub(crate) with_address: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BannedWindowQuery {
    pub(crate) visitors: String,
    pub(crate) from_date: String,
    pub(crate) to_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClosedStatusQuery {
    pub(crate) visitors: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VisitRequestWindowQuery {
    pub(crate) visitors: String,
    pub(crate) supported_restrictions: String,
    pub(crate) from_date: String,
    pub(crate) to_date: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClosedStatusView {
    pub(crate) closed: bool,
}

pub(crate) async fn contact_list_handler<S: ContactSource + 'static>(
    State(service): State<Arc<RegistryService<S>>>,
    Path(prisoner_id): Path<String>,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let category = query
        .contact_type
        .as_deref()
        .map(|raw| {
            RelationshipCategory::parse(raw)
                .ok_or_else(|| AppError::InvalidQuery(format!("unknown contact type '{raw}'")))
        })
        .transpose()?;

    let filter = ContactListFilter {
        category,
        contact_id: query.id.map(ContactId),
        approved_only: query.approved_visitors_only,
        with_address: query.with_address,
    };

    let contacts = service.contact_list(&PrisonerId(prisoner_id), &filter)?;
    Ok(Json(contacts))
}

pub(crate) async fn approved_social_handler<S: ContactSource + 'static>(
    State(service): State<Arc<RegistryService<S>>>,
    Path(prisoner_id): Path<String>,
    Query(query): Query<SocialContactQuery>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let filter = SocialContactFilter {
        has_date_of_birth: query.has_date_of_birth,
        not_banned_before: query
            .not_banned_before_date
            .as_deref()
            .map(parse_date)
            .transpose()?,
        with_address: query.with_address,
    };

    let contacts = service.approved_social_contacts(&PrisonerId(prisoner_id), &filter)?;
    Ok(Json(contacts))
}

pub(crate) async fn banned_window_handler<S: ContactSource + 'static>(
    State(service): State<Arc<RegistryService<S>>>,
    Path(prisoner_id): Path<String>,
    Query(query): Query<BannedWindowQuery>,
) -> Result<Json<DateRange>, AppError> {
    let visitors = parse_visitor_ids(&query.visitors)?;
    let window = parse_window(&query.from_date, &query.to_date)?;

    let resolved = service.banned_window(&PrisonerId(prisoner_id), &visitors, window)?;
    Ok(Json(resolved))
}

pub(crate) async fn closed_status_handler<S: ContactSource + 'static>(
    State(service): State<Arc<RegistryService<S>>>,
    Path(prisoner_id): Path<String>,
    Query(query): Query<ClosedStatusQuery>,
) -> Result<Json<ClosedStatusView>, AppError> {
    let visitors = parse_visitor_ids(&query.visitors)?;
    let closed = service.closed_restriction_status(&PrisonerId(prisoner_id), &visitors)?;
    Ok(Json(ClosedStatusView { closed }))
}

pub(crate) async fn visit_request_windows_handler<S: ContactSource + 'static>(
    State(service): State<Arc<RegistryService<S>>>,
    Path(prisoner_id): Path<String>,
    Query(query): Query<VisitRequestWindowQuery>,
) -> Result<Json<Vec<DateRange>>, AppError> {
    let visitors = parse_visitor_ids(&query.visitors)?;
    let supported: BTreeSet<String> = query
        .supported_restrictions
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect();
    let window = parse_window(&query.from_date, &query.to_date)?;

    let ranges =
        service.request_visit_windows(&PrisonerId(prisoner_id), &visitors, &supported, window)?;
    Ok(Json(ranges))
}

fn parse_visitor_ids(raw: &str) -> Result<Vec<ContactId>, AppError> {
    let visitors: Vec<ContactId> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| ContactId(id.to_string()))
        .collect();

    if visitors.is_empty() {
        return Err(AppError::InvalidQuery(
            "at least one visitor identifier is required".to_string(),
        ));
    }
    Ok(visitors)
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| AppError::InvalidQuery(format!("failed to parse '{raw}' as YYYY-MM-DD ({err})")))
}

fn parse_window(from: &str, to: &str) -> Result<DateRange, AppError> {
    let from_date = parse_date(from)?;
    let to_date = parse_date(to)?;
    DateRange::new(from_date, to_date)
        .map_err(|err| AppError::InvalidQuery(err.to_string()))
}
