use std::time::{Duration, Instant};

use log::{debug, o};
use url::Url;
use warp::{
    http::StatusCode,
    reject,
    reply::{html, json, with_header, with_status, Reply},
};

use crate::availability::Availability;
use crate::environment::Environment;
use crate::errors::PlannerError;
use crate::member::Roster;
use crate::pages;
use crate::routes::{
    forms::{AvailabilityForm, NameForm},
    rejection::{Context, Rejection},
    response::SuccessResponse,
    MEMBER_COOKIE,
};
use crate::session::{Event, Session};
use crate::slug::Slug;

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($body:tt)+) => {{
        let start = Instant::now();

        let result = { $($body)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    }};
}

/// A group as seen by one request.
struct Group {
    slug: Slug,
    roster: Roster,
    session: Session,

    /// The join page, which every form posts back to.
    path: String,
}

pub async fn home(_environment: Environment) -> RouteResult {
    timed! {
        html(pages::home())
    }
}

pub async fn create_group(environment: Environment, form: NameForm) -> RouteResult {
    timed! {
        let NameForm { name } = form;
        let error_handler = |e: PlannerError| Rejection::new(Context::create_group(name.clone()), e);

        let (_, link) = register_group(&environment, &name)
            .await
            .map_err(error_handler)?;

        html(pages::created(&name, &link))
    }
}

pub async fn join_page(
    environment: Environment,
    segment: String,
    member: Option<String>,
) -> RouteResult {
    timed! {
        let error_handler = |e: PlannerError| Rejection::new(Context::group(segment.clone()), e);

        let group = open_group(&environment, &segment, member.as_deref())
            .await
            .map_err(error_handler)?;
        let name = environment
            .groups
            .display_name(&group.slug)
            .await
            .map_err(PlannerError::from)
            .map_err(error_handler)?;

        html(pages::join(&name, &group.path, &group.roster, group.session))
    }
}

pub async fn join(environment: Environment, segment: String, form: NameForm) -> RouteResult {
    timed! {
        let error_handler = |e: PlannerError| Rejection::new(Context::join(segment.clone()), e);

        // joining always adds a new member, so any previous session
        // doesn't matter
        let mut group = open_group(&environment, &segment, None)
            .await
            .map_err(error_handler)?;
        let session = update_group(&environment, &mut group, Event::JoinSubmitted { name: form.name })
            .await
            .map_err(error_handler)?;

        let cookie = match session {
            Session::Joined { member } => format!(
                "{}={}; Path={}; HttpOnly; SameSite=Lax",
                MEMBER_COOKIE, member, group.path
            ),
            Session::NotJoined => format!("{}=; Path={}; Max-Age=0", MEMBER_COOKIE, group.path),
        };

        with_header(see_other(&group.path), "set-cookie", cookie)
    }
}

pub async fn add_availability(
    environment: Environment,
    segment: String,
    member: Option<String>,
    form: AvailabilityForm,
) -> RouteResult {
    timed! {
        let error_handler =
            |e: PlannerError| Rejection::new(Context::add_availability(segment.clone()), e);

        let entry = Availability::parse(&form.date, form.slot.as_deref()).map_err(error_handler)?;
        let mut group = open_group(&environment, &segment, member.as_deref())
            .await
            .map_err(error_handler)?;
        update_group(&environment, &mut group, Event::AvailabilityAdded(entry))
            .await
            .map_err(error_handler)?;

        see_other(&group.path)
    }
}

pub async fn remove_availability(
    environment: Environment,
    segment: String,
    member: Option<String>,
    form: AvailabilityForm,
) -> RouteResult {
    timed! {
        let error_handler =
            |e: PlannerError| Rejection::new(Context::remove_availability(segment.clone()), e);

        let entry = Availability::parse(&form.date, form.slot.as_deref()).map_err(error_handler)?;
        let mut group = open_group(&environment, &segment, member.as_deref())
            .await
            .map_err(error_handler)?;
        update_group(&environment, &mut group, Event::AvailabilityRemoved(entry))
            .await
            .map_err(error_handler)?;

        see_other(&group.path)
    }
}

pub async fn api_create_group(environment: Environment, request: NameForm) -> RouteResult {
    timed! {
        let NameForm { name } = request;
        let error_handler =
            |e: PlannerError| Rejection::new(Context::api_create_group(name.clone()), e);

        let (slug, link) = register_group(&environment, &name)
            .await
            .map_err(error_handler)?;
        let response = SuccessResponse::Created {
            slug: &slug,
            name: &name,
            link: link.as_str(),
        };

        with_status(json(&response), StatusCode::CREATED)
    }
}

pub async fn api_group(environment: Environment, segment: String) -> RouteResult {
    timed! {
        let error_handler = |e: PlannerError| Rejection::new(Context::api_group(segment.clone()), e);

        let group = open_group(&environment, &segment, None)
            .await
            .map_err(error_handler)?;
        let name = environment
            .groups
            .display_name(&group.slug)
            .await
            .map_err(PlannerError::from)
            .map_err(error_handler)?;
        let response = SuccessResponse::Group {
            slug: &group.slug,
            name: &name,
            members: &group.roster,
        };

        json(&response)
    }
}

/// Works out the slug and link for a new group and records its name.
/// The group itself only comes into being once somebody joins.
async fn register_group(environment: &Environment, name: &str) -> Result<(Slug, Url), PlannerError> {
    if name.is_empty() {
        return Err(PlannerError::BlankGroupName);
    }

    let slug = Slug::from_name(name);
    let link = environment
        .urls
        .join_link(&slug)
        .map_err(|source| PlannerError::FailedToGenerateUrl { source })?;

    debug!(environment.logger, "Creating group..."; "slug" => %slug, "link" => %link);
    environment.groups.remember_display_name(&slug, name).await?;

    Ok((slug, link))
}

async fn open_group(
    environment: &Environment,
    segment: &str,
    member: Option<&str>,
) -> Result<Group, PlannerError> {
    let slug = Slug::from_segment(segment)?;
    let path = environment
        .urls
        .join_path(&slug)
        .map_err(|source| PlannerError::FailedToGenerateUrl { source })?;

    debug!(environment.logger, "Loading group..."; "slug" => %slug);
    let roster = environment.groups.load_or_default(&slug).await?;
    let session = Session::resume(member, &roster);

    Ok(Group {
        slug,
        roster,
        session,
        path,
    })
}

/// Applies `event` and saves the whole roster if it changed. Whatever
/// was saved in the meantime is overwritten.
async fn update_group(
    environment: &Environment,
    group: &mut Group,
    event: Event,
) -> Result<Session, PlannerError> {
    let logger = environment
        .logger
        .new(o!("slug" => group.slug.to_string()));

    let (session, outcome) = group.session.apply(&mut group.roster, event)?;
    debug!(logger, "Applied event"; "outcome" => ?outcome, "session" => ?session);

    if outcome.changed() {
        debug!(logger, "Saving group..."; "members" => group.roster.len());
        environment.groups.save(&group.slug, &group.roster).await?;
    }

    group.session = session;

    Ok(session)
}

fn see_other(location: &str) -> impl Reply {
    with_header(StatusCode::SEE_OTHER, "location", location.to_owned())
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
