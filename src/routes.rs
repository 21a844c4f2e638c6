use std::sync::Arc;

use log::{error, warn, Logger};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{html, json, with_status, Reply};
use warp::Filter;

use crate::environment::Environment;
use crate::errors::PlannerError;
use crate::pages;

pub mod admin;
mod forms;
mod handlers;
mod rejection;
mod response;

pub use internal::*;

/// The largest form or JSON body to accept. Names and dates are short.
const MAX_CONTENT_LENGTH: u64 = 16 * 1024;

/// The cookie remembering which member a browser joined a group as.
pub const MEMBER_COOKIE: &str = "member";

/// Every route of the main server, with failures turned into responses.
pub fn make_routes(
    environment: Environment,
) -> impl Filter<Extract = (impl Reply,), Error = reject::Rejection> + Clone {
    let logger = environment.logger.clone();

    make_home_route(environment.clone())
        .or(make_create_group_route(environment.clone()))
        .or(make_join_page_route(environment.clone()))
        .or(make_join_route(environment.clone()))
        .or(make_add_availability_route(environment.clone()))
        .or(make_remove_availability_route(environment.clone()))
        .or(make_api_create_group_route(environment.clone()))
        .or(make_api_group_route(environment))
        .recover(move |r| format_rejection(logger.clone(), r))
}

pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<Box<dyn Reply>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let e = &r.error;
        let status = status_code_for(e);

        if status.is_server_error() {
            error!(logger, "Planner error"; "context" => ?r.context, "error" => ?r.error, "status" => %status, "message" => %r.error);
        } else {
            warn!(logger, "Rejected request"; "context" => ?r.context, "status" => %status, "message" => %r.error);
        }

        let reply: Box<dyn Reply> = if r.context.is_api() {
            Box::new(with_status(json(&r.flatten()), status))
        } else {
            Box::new(with_status(html(pages::error(&r.error.to_string())), status))
        };

        return Ok(reply);
    }

    Err(rej)
}

fn status_code_for(e: &PlannerError) -> StatusCode {
    use PlannerError::*;

    match e {
        BlankName | BlankGroupName | InvalidDate(..) | InvalidSlot(..) | InvalidSlug(..) => {
            StatusCode::BAD_REQUEST
        }
        NotJoined => StatusCode::FORBIDDEN,
        FailedToGenerateUrl { .. } | Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

mod internal {
    use warp::body::{content_length_limit, form, json};
    use warp::filters::BoxedFilter;
    use warp::cookie;
    use warp::path::end;
    use warp::Filter;
    use warp::Reply;
    use warp::{get as g, path as p, path::param as par, post};

    use super::{forms, handlers, MAX_CONTENT_LENGTH, MEMBER_COOKIE};
    use crate::environment::Environment;

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    macro_rules! route_filter {
    ($route_variable:ident; $first:expr) => (let $route_variable = $route_variable.and($first););
    ($route_variable:ident; $first:expr, $($rest:expr),+) => (
        let $route_variable = $route_variable.and($first);
        route_filter!($route_variable; $($rest),+);
    )
}

    macro_rules! route {
    ($name:ident => $handler:ident, $route_variable:ident; $($filters:expr),+) => (
        pub fn $name(environment: Environment) -> Route {
            let $route_variable = warp::any().map(move || environment.clone());

            route_filter!($route_variable; $($filters),+);

            $route_variable.and_then(handlers::$handler)
                .boxed()
        }
    );
}

    route!(make_home_route => home, rt; end(), g());
    route!(make_create_group_route => create_group, rt; p("groups"), end(), post(), content_length_limit(MAX_CONTENT_LENGTH), form::<forms::NameForm>());
    route!(make_join_page_route => join_page, rt; p("join"), par::<String>(), end(), g(), cookie::optional(MEMBER_COOKIE));
    route!(make_join_route => join, rt; p("join"), par::<String>(), end(), post(), content_length_limit(MAX_CONTENT_LENGTH), form::<forms::NameForm>());
    route!(make_add_availability_route => add_availability, rt; p("join"), par::<String>(), p("availability"), end(), post(), cookie::optional(MEMBER_COOKIE), content_length_limit(MAX_CONTENT_LENGTH), form::<forms::AvailabilityForm>());
    route!(make_remove_availability_route => remove_availability, rt; p("join"), par::<String>(), p("availability"), p("delete"), end(), post(), cookie::optional(MEMBER_COOKIE), content_length_limit(MAX_CONTENT_LENGTH), form::<forms::AvailabilityForm>());
    route!(make_api_create_group_route => api_create_group, rt; p("api"), p("groups"), end(), post(), content_length_limit(MAX_CONTENT_LENGTH), json::<forms::NameForm>());
    route!(make_api_group_route => api_group, rt; p("api"), p("groups"), par::<String>(), end(), g());
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use warp::http::StatusCode;

    use crate::environment::Environment;
    use crate::store::MemoryStore;
    use crate::urls::Urls;

    fn make_environment() -> (Arc<MemoryStore>, Environment) {
        let store = Arc::new(MemoryStore::new());
        let urls = Urls::new("http://plans.test").expect("parse base URL");
        let environment = Environment::new(
            Arc::new(log::discard_logger()),
            store.clone(),
            Arc::new(urls),
        );

        (store, environment)
    }

    fn body_of(response: &warp::http::Response<warp::hyper::body::Bytes>) -> String {
        String::from_utf8_lossy(response.body()).into_owned()
    }

    #[tokio::test]
    async fn home_page_offers_both_flows() {
        let (_, environment) = make_environment();
        let filter = super::make_routes(environment);

        let response = warp::test::request().path("/").reply(&filter).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_of(&response);
        assert!(body.contains("Social Planning for Worldwide Ballers"));
        assert!(body.contains("Create a Group"));
        assert!(body.contains("You&#39;ll need an invite, loser."));
        assert!(response.headers().contains_key("server-timing"));
    }

    #[tokio::test]
    async fn creating_a_group_shows_the_link_without_creating_members() {
        let (store, environment) = make_environment();
        let filter = super::make_routes(environment);

        let response = warp::test::request()
            .method("POST")
            .path("/groups")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("name=Friday+Night+Crew")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_of(&response).contains(r#"value="http://plans.test/join/friday-night-crew""#));
        assert_eq!(store.peek("group-members-friday-night-crew"), None);
        assert_eq!(
            store.peek("group-name-friday-night-crew").as_deref(),
            Some(r#""Friday Night Crew""#)
        );
    }

    #[tokio::test]
    async fn blank_group_names_are_rejected() {
        let (_, environment) = make_environment();
        let filter = super::make_routes(environment);

        let response = warp::test::request()
            .method("POST")
            .path("/groups")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("name=+++")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_of(&response).contains("Group name must not be blank"));
    }

    #[tokio::test]
    async fn joining_sets_the_session_cookie() {
        let (store, environment) = make_environment();
        let filter = super::make_routes(environment);

        let response = warp::test::request()
            .method("POST")
            .path("/join/friday-night-crew")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("name=Alex")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/join/friday-night-crew");
        assert_eq!(
            response.headers()["set-cookie"],
            "member=0; Path=/join/friday-night-crew; HttpOnly; SameSite=Lax"
        );
        assert_eq!(
            store.peek("group-members-friday-night-crew").as_deref(),
            Some(r#"[{"name":"Alex","availability":[]}]"#)
        );
    }

    #[tokio::test]
    async fn adding_without_joining_is_forbidden() {
        let (store, environment) = make_environment();
        let filter = super::make_routes(environment);

        let response = warp::test::request()
            .method("POST")
            .path("/join/crew/availability")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("date=2024-07-05&slot=pm")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(store.peek("group-members-crew"), None);
    }

    #[tokio::test]
    async fn bad_dates_are_rejected() {
        let store = Arc::new(MemoryStore::with_entries(vec![(
            "group-members-crew",
            r#"[{"name":"Alex","availability":[]}]"#,
        )]));
        let environment = Environment::new(
            Arc::new(log::discard_logger()),
            store.clone(),
            Arc::new(Urls::new("http://plans.test").unwrap()),
        );
        let filter = super::make_routes(environment);

        let response = warp::test::request()
            .method("POST")
            .path("/join/crew/availability")
            .header("content-type", "application/x-www-form-urlencoded")
            .header("cookie", "member=0")
            .body("date=tomorrow&slot=pm")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_of(&response).contains("Invalid date"));
    }

    #[tokio::test]
    async fn the_member_cookie_is_found_among_others() {
        let store = Arc::new(MemoryStore::with_entries(vec![(
            "group-members-crew",
            r#"[{"name":"Alex","availability":[]}]"#,
        )]));
        let environment = Environment::new(
            Arc::new(log::discard_logger()),
            store,
            Arc::new(Urls::new("http://plans.test").unwrap()),
        );
        let filter = super::make_routes(environment);

        let response = warp::test::request()
            .path("/join/crew")
            .header("cookie", "theme=dark; member=0; other=x")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_of(&response).contains("Your Availability"));
    }

    #[tokio::test]
    async fn corrupt_groups_are_reported() {
        let store = Arc::new(MemoryStore::with_entries(vec![("group-members-crew", "oops")]));
        let environment = Environment::new(
            Arc::new(log::discard_logger()),
            store,
            Arc::new(Urls::new("http://plans.test").unwrap()),
        );
        let filter = super::make_routes(environment);

        let page = warp::test::request().path("/join/crew").reply(&filter).await;
        assert_eq!(page.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_of(&page).contains("Store error"));

        let api = warp::test::request().path("/api/groups/crew").reply(&filter).await;
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_slice(api.body()).expect("parse response as JSON");
        assert_eq!(body["group"], "crew");
        assert_eq!(body["message"], "Store error");
    }

    #[tokio::test]
    async fn api_creates_groups() {
        let (_, environment) = make_environment();
        let filter = super::make_routes(environment);

        let response = warp::test::request()
            .method("POST")
            .path("/api/groups")
            .json(&serde_json::json!({ "name": " Book  Club " }))
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::CREATED);

        let body: serde_json::Value = serde_json::from_slice(response.body()).expect("parse response as JSON");
        assert_eq!(body["slug"], "book-club");
        assert_eq!(body["name"], "Book  Club");
        assert_eq!(body["link"], "http://plans.test/join/book-club");
    }

    #[tokio::test]
    async fn unknown_groups_are_empty() {
        let (_, environment) = make_environment();
        let filter = super::make_routes(environment);

        let response = warp::test::request()
            .path("/api/groups/rock-%26-roll")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_slice(response.body()).expect("parse response as JSON");
        assert_eq!(body["slug"], "rock-&-roll");
        assert_eq!(body["name"], "Rock & Roll");
        assert_eq!(body["members"], serde_json::json!([]));
    }
}
