use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use std::collections::BTreeSet;
use std::sync::Arc;

use contact_registry::error::AppError;
use contact_registry::registry::{
    ContactId, ContactListFilter, DateRange, PrisonerId, RegistryService, ServiceError,
};

use crate::infra::sample_source;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Booking window start (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) from_date: Option<NaiveDate>,
    /// Booking window end (YYYY-MM-DD). Defaults to from_date + 28 days.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) to_date: Option<NaiveDate>,
    /// Comma-separated visitor identifiers to evaluate.
    #[arg(long, default_value = "9147510,9147511")]
    pub(crate) visitors: String,
    /// Restriction type codes for the visit-request resolution step.
    #[arg(long, default_value = "BAN,CLOSED")]
    pub(crate) supported_restrictions: String,
}

/// Walk the registry operations against the fixture prisoner and print what a
/// booking flow would see.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let prisoner = PrisonerId("A1234BC".to_string());
    let service = RegistryService::new(Arc::new(sample_source()));

    let from_date = args.from_date.unwrap_or_else(|| Local::now().date_naive());
    let to_date = args.to_date.unwrap_or(from_date + Duration::days(28));
    let window = DateRange::new(from_date, to_date)
        .map_err(|err| AppError::InvalidQuery(err.to_string()))?;

    let visitors: Vec<ContactId> = args
        .visitors
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| ContactId(id.to_string()))
        .collect();
    let supported: BTreeSet<String> = args
        .supported_restrictions
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect();

    println!("Prisoner {prisoner}");
    println!();

    let contacts = service.contact_list(&prisoner, &ContactListFilter::default())?;
    println!("Contacts ({}):", contacts.len());
    for contact in &contacts {
        println!(
            "  {} {} {} ({} restriction(s))",
            contact.contact_id,
            contact.first_name.as_deref().unwrap_or("-"),
            contact.last_name.as_deref().unwrap_or("-"),
            contact.restrictions.len()
        );
    }
    println!();

    let visitor_list = visitors
        .iter()
        .map(|id| id.0.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    println!("Evaluating visitors [{visitor_list}] over {from_date}..{to_date}");

    match service.banned_window(&prisoner, &visitors, window) {
        Ok(resolved) => println!(
            "  bookable window: {} .. {}",
            resolved.from_date(),
            resolved.to_date()
        ),
        Err(ServiceError::DateRangeNotFound(reason)) => {
            println!("  no bookable window: {reason}")
        }
        Err(other) => return Err(other.into()),
    }

    let closed = service.closed_restriction_status(&prisoner, &visitors)?;
    println!("  closed restriction active: {closed}");

    let ranges = service.request_visit_windows(&prisoner, &visitors, &supported, window)?;
    if ranges.is_empty() {
        println!("  no supported restrictions in force during the window");
    } else {
        println!("  restriction windows in force:");
        for range in ranges {
            println!("    {} .. {}", range.from_date(), range.to_date());
        }
    }

    Ok(())
}
