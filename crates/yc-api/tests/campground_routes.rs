//! End-to-end route tests: real handlers, in-memory SQLite, in-memory sessions.

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{header, StatusCode};
use actix_web::middleware::from_fn;
use actix_web::{test, web, App};
use uuid::Uuid;
use yc_api::handlers::{self, AppState};
use yc_api::middleware::{method_override, security_headers};
use yc_api::session::session_middleware;
use yc_core::models::{Campground, CampgroundInput, Review, ReviewInput};
use yc_core::traits::CampgroundRepo;
use yc_db_sqlite::SqliteCampgroundRepo;
use yc_session_memory::MemorySessionStore;

const SECRET: &str = "0123456789abcdef0123456789abcdef";
const COOKIE: &str = "yelpcamp.sid";

async fn setup() -> (web::Data<AppState>, SqliteCampgroundRepo) {
    let repo = SqliteCampgroundRepo::new("sqlite::memory:").await.unwrap();
    let sessions = MemorySessionStore::new(SECRET).unwrap();
    let state = web::Data::new(AppState::new(Box::new(repo.clone()), Box::new(sessions), COOKIE));
    (state, repo)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .wrap(from_fn(session_middleware))
                .wrap(from_fn(method_override))
                .wrap(security_headers())
                .configure(yc_api::configure_routes)
                .default_service(web::to(handlers::not_found)),
        )
        .await
    };
}

fn pine_ridge() -> Vec<(&'static str, &'static str)> {
    vec![
        ("camp[title]", "Pine Ridge"),
        ("camp[price]", "20"),
        ("camp[location]", "CO"),
        ("camp[description]", "nice"),
        ("camp[image]", "http://x/y.jpg"),
    ]
}

async fn seed(repo: &SqliteCampgroundRepo, title: &str) -> Campground {
    let camp = Campground::new(CampgroundInput {
        title: title.to_string(),
        location: "Somewhere".to_string(),
        image: "http://img/1.jpg".to_string(),
        description: "seeded".to_string(),
        price: 10.0,
    });
    repo.create_campground(&camp).await.unwrap();
    camp
}

async fn seed_review(repo: &SqliteCampgroundRepo, camp: &Campground, body: &str) -> Review {
    let review = Review::new(ReviewInput { body: body.to_string(), rating: 4 });
    assert!(repo.add_review(camp.id, &review).await.unwrap());
    review
}

fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("redirect without Location")
        .to_str()
        .unwrap()
        .to_string()
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == COOKIE)
        .map(|c| c.into_owned())
}

async fn body_text<B: actix_web::body::MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[actix_web::test]
async fn create_redirects_to_detail_and_flashes_once() {
    let (state, repo) = setup().await;
    let app = app!(state);

    let req = test::TestRequest::post().uri("/campground").set_form(pine_ridge()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let cookie = session_cookie(&resp).expect("session cookie issued");
    let target = location(&resp);
    let id: Uuid = target.strip_prefix("/campground/").unwrap().parse().unwrap();

    let stored = repo.list_campgrounds().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);

    let req = test::TestRequest::get().uri(&target).cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Pine Ridge"));
    assert!(html.contains("Successfully created a new campground!"));

    let req = test::TestRequest::get().uri(&target).cookie(cookie).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(!html.contains("Successfully created a new campground!"));
}

#[actix_web::test]
async fn invalid_create_is_rejected_without_persisting() {
    let (state, repo) = setup().await;
    let app = app!(state);

    let mut form = pine_ridge();
    form[0] = ("camp[title]", "");
    form[1] = ("camp[price]", "-5");

    let req = test::TestRequest::post().uri("/campground").set_form(form).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let html = body_text(resp).await;
    assert!(html.contains("camp.title"));
    assert!(html.contains("is not allowed to be empty,"));
    assert!(html.contains("must be greater than or equal to 0"));
    assert!(repo.list_campgrounds().await.unwrap().is_empty());
}

#[actix_web::test]
async fn non_numeric_price_is_rejected() {
    let (state, repo) = setup().await;
    let app = app!(state);

    let mut form = pine_ridge();
    form[1] = ("camp[price]", "twenty");
    let req = test::TestRequest::post().uri("/campground").set_form(form).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("must be a number"));
    assert!(repo.list_campgrounds().await.unwrap().is_empty());
}

#[actix_web::test]
async fn unknown_campground_redirects_with_error_flash() {
    let (state, _repo) = setup().await;
    let app = app!(state);

    for uri in [format!("/campground/{}", Uuid::now_v7()), "/campground/not-an-id".to_string()] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/campground");

        let cookie = session_cookie(&resp).unwrap();
        let req = test::TestRequest::get().uri("/campground").cookie(cookie).to_request();
        let html = body_text(test::call_service(&app, req).await).await;
        assert!(html.contains("Campground not found"));
    }
}

#[actix_web::test]
async fn unknown_campground_edit_update_delete_are_404() {
    let (state, _repo) = setup().await;
    let app = app!(state);
    let missing = Uuid::now_v7();

    let req = test::TestRequest::get().uri(&format!("/campground/{missing}/edit")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&format!("/campground/{missing}"))
        .set_form(pine_ridge())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri(&format!("/campground/{missing}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.contains("Campground not found"));
}

#[actix_web::test]
async fn edit_form_is_prefilled() {
    let (state, repo) = setup().await;
    let camp = seed(&repo, "Cedar Hollow").await;
    let app = app!(state);

    let req = test::TestRequest::get().uri(&format!("/campground/{}/edit", camp.id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("value=\"Cedar Hollow\""));
    assert!(html.contains("_method=PUT"));
}

#[actix_web::test]
async fn update_through_form_override_replaces_fields() {
    let (state, repo) = setup().await;
    let camp = seed(&repo, "Old Name").await;
    let app = app!(state);

    let mut form = pine_ridge();
    form[1] = ("camp[price]", "35");
    let req = test::TestRequest::post()
        .uri(&format!("/campground/{}?_method=PUT", camp.id))
        .set_form(form)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/campground/{}", camp.id));

    let updated = repo.get_campground(camp.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Pine Ridge");
    assert_eq!(updated.price, 35.0);
    assert_eq!(updated.location, "CO");
}

#[actix_web::test]
async fn invalid_update_leaves_record_untouched() {
    let (state, repo) = setup().await;
    let camp = seed(&repo, "Stable").await;
    let app = app!(state);

    let mut form = pine_ridge();
    form[0] = ("camp[title]", "   ");
    let req = test::TestRequest::put()
        .uri(&format!("/campground/{}", camp.id))
        .set_form(form)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    assert_eq!(repo.get_campground(camp.id).await.unwrap().unwrap().title, "Stable");
}

#[actix_web::test]
async fn delete_removes_only_that_campground() {
    let (state, repo) = setup().await;
    let doomed = seed(&repo, "Doomed Meadow").await;
    seed(&repo, "Survivor Flats").await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/campground/{}?_method=DELETE", doomed.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/campground");
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::get().uri("/campground").cookie(cookie).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(!html.contains("Doomed Meadow"));
    assert!(html.contains("Survivor Flats"));
    assert!(html.contains("Successfully deleted the campground!"));
    assert_eq!(repo.list_campgrounds().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn review_create_appends_one_and_shows_on_detail() {
    let (state, repo) = setup().await;
    let camp = seed(&repo, "Reviewable").await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/campground/{}/review", camp.id))
        .set_form([("review[body]", "Quiet and shady"), ("review[rating]", "5")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/campground/{}", camp.id));

    let stored = repo.get_campground(camp.id).await.unwrap().unwrap();
    assert_eq!(stored.reviews.len(), 1);

    let req = test::TestRequest::get().uri(&format!("/campground/{}", camp.id)).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Quiet and shady"));
}

#[actix_web::test]
async fn invalid_or_orphan_reviews_are_rejected() {
    let (state, repo) = setup().await;
    let camp = seed(&repo, "Picky").await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/campground/{}/review", camp.id))
        .set_form([("review[body]", ""), ("review[rating]", "9")])
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/campground/{}/review", Uuid::now_v7()))
        .set_form([("review[body]", "Where am I?"), ("review[rating]", "3")])
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    assert!(repo.get_campground(camp.id).await.unwrap().unwrap().reviews.is_empty());
}

#[actix_web::test]
async fn review_delete_shrinks_list_by_one() {
    let (state, repo) = setup().await;
    let camp = seed(&repo, "Busy").await;
    let gone = seed_review(&repo, &camp, "delete me").await;
    let kept = seed_review(&repo, &camp, "keep me").await;
    let app = app!(state);

    let uri = format!("/campground/{}/review/{}?_method=DELETE", camp.id, gone.id);
    let req = test::TestRequest::post().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/campground/{}", camp.id));

    let (stored, reviews) = repo.get_campground_with_reviews(camp.id).await.unwrap().unwrap();
    assert_eq!(stored.reviews, vec![kept.id]);
    assert_eq!(reviews.len(), 1);

    let req = test::TestRequest::post().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unmatched_paths_render_404_page() {
    let (state, _repo) = setup().await;
    let app = app!(state);

    for uri in ["/nowhere", "/campground/a/b/c"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body_text(resp).await.contains("Page not found"));
    }
}

#[actix_web::test]
async fn home_page_sets_security_headers_and_session() {
    let (state, _repo) = setup().await;
    let app = app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-content-type-options").unwrap(), "nosniff");

    let cookie = session_cookie(&resp).unwrap();
    assert_eq!(cookie.http_only(), Some(true));

    // A valid cookie is reused; a forged one is replaced.
    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    assert!(session_cookie(&test::call_service(&app, req).await).is_none());

    let forged = Cookie::new(COOKIE, format!("{}.deadbeef", Uuid::new_v4()));
    let req = test::TestRequest::get().uri("/").cookie(forged).to_request();
    assert!(session_cookie(&test::call_service(&app, req).await).is_some());
}

#[actix_web::test]
async fn unsupported_verbs_render_404_page() {
    let (state, repo) = setup().await;
    let camp = seed(&repo, "Verb Check").await;
    let app = app!(state);

    let requests = [
        test::TestRequest::post().uri("/campground/new"),
        test::TestRequest::delete().uri("/campground"),
        test::TestRequest::post().uri(&format!("/campground/{}", camp.id)),
        test::TestRequest::get().uri(&format!("/campground/{}/review", camp.id)),
        test::TestRequest::put().uri("/"),
    ];
    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body_text(resp).await.contains("Page not found"));
    }

    assert_eq!(repo.list_campgrounds().await.unwrap().len(), 1);
}
