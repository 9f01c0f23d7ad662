//! Campaign upload, distribution and site assignment over HTTP.

mod common;

use axum::http::StatusCode;
use common::*;
use postertrack_core::roles::Role;
use postertrack_db::models::user::User;
use serde_json::{json, Value};
use sqlx::PgPool;

const HEADER: &str = "code,state,city,location,media_owner,brand,format\n";

fn csv(rows: &[&str]) -> Vec<u8> {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out.into_bytes()
}

struct Cast {
    admin: User,
    client: User,
    manager: User,
}

async fn cast(pool: &PgPool) -> Cast {
    Cast {
        admin: create_user(pool, "boss@example.com", Role::SuperAdmin).await,
        client: create_user(pool, "client@example.com", Role::ClientAgencyUser).await,
        manager: create_user(pool, "am@example.com", Role::AccountManager).await,
    }
}

fn upload_form(cast: &Cast, site_list: &[u8]) -> MultipartForm {
    MultipartForm::new()
        .text("client_id", &cast.client.id.to_string())
        .text("account_manager_id", &cast.manager.id.to_string())
        .text("name", "Spring Launch")
        .file("site_list", "sites.csv", "text/csv", site_list)
}

async fn upload(pool: &PgPool, cast: &Cast, form: MultipartForm) -> (StatusCode, Value) {
    let response = post_multipart_auth(
        build_test_app(pool.clone()),
        "/api/v1/campaigns",
        form,
        &token_for(&cast.admin),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

fn assigned(result: &Value) -> Vec<(String, i64)> {
    result["assignments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| {
            (
                a["site_code"].as_str().unwrap().to_string(),
                a["field_auditor_id"].as_i64().unwrap(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Upload and distribution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_distributes_sites_by_state(pool: PgPool) {
    let cast = cast(&pool).await;
    let a = create_auditor(&pool, "a@example.com", &["TX"]).await;
    let b = create_auditor(&pool, "b@example.com", &["tx"]).await;
    let c = create_auditor(&pool, "c@example.com", &["CA"]).await;

    let site_list = csv(&[
        ",TX,Austin,1 Congress Ave,Outdoor Co,Acme Cola,48 Sheet",
        ",TX,Dallas,2 Elm St,Outdoor Co,Acme Cola,48 Sheet",
        ",CA,Fresno,3 Main St,Outdoor Co,Acme Cola,Unipole",
    ]);
    let (status, json) = upload(&pool, &cast, upload_form(&cast, &site_list)).await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    let result = &json["data"];
    assert_eq!(result["campaign"]["total_sites"], 3);
    assert_eq!(result["campaign"]["name"], "Spring Launch");
    assert_eq!(
        assigned(result),
        vec![
            ("SITE-0002".to_string(), a.id),
            ("SITE-0003".to_string(), b.id),
            ("SITE-0004".to_string(), c.id),
        ]
    );
    assert!(result["gaps"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn uncovered_state_is_reported_as_a_gap(pool: PgPool) {
    let cast = cast(&pool).await;
    create_auditor(&pool, "a@example.com", &["TX"]).await;

    let site_list = csv(&[
        ",TX,Austin,1 Congress Ave,Outdoor Co,Acme Cola,48 Sheet",
        ",NV,Reno,9 Virginia St,Outdoor Co,Acme Cola,48 Sheet",
    ]);
    let (status, json) = upload(&pool, &cast, upload_form(&cast, &site_list)).await;

    assert_eq!(status, StatusCode::CREATED);
    let gaps = json["data"]["gaps"].as_array().unwrap();
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0]["site_code"], "SITE-0003");
    assert_eq!(gaps[0]["state"], "NV");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_locations_prompt_until_confirmed(pool: PgPool) {
    let cast = cast(&pool).await;
    create_auditor(&pool, "a@example.com", &["TX"]).await;

    let site_list = csv(&[
        ",TX,Austin,1 Congress Ave,Outdoor Co,Acme Cola,48 Sheet",
        ",TX,Austin,1 Congress Ave,Other Co,Acme Cola,48 Sheet",
    ]);

    let (status, json) = upload(&pool, &cast, upload_form(&cast, &site_list)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let duplicates = json["duplicates"].as_array().unwrap();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0]["row"], 3);
    assert_eq!(duplicates[0]["first_row"], 2);
    assert!(json["prompt"].is_string());

    let confirmed = upload_form(&cast, &site_list).text("proceed_with_duplicates", "true");
    let (status, json) = upload(&pool, &cast, confirmed).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["campaign"]["total_sites"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_code_on_new_campaign_is_rejected(pool: PgPool) {
    let cast = cast(&pool).await;
    let site_list = csv(&["TX-01,TX,Austin,1 Congress Ave,Outdoor Co,Acme Cola,48 Sheet"]);

    let (status, _) = upload(&pool, &cast, upload_form(&cast, &site_list)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_column_count_is_rejected(pool: PgPool) {
    let cast = cast(&pool).await;
    let site_list = b"code,state,city\n,TX,Austin\n".to_vec();

    let (status, _) = upload(&pool, &cast, upload_form(&cast, &site_list)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn header_only_upload_is_rejected(pool: PgPool) {
    let cast = cast(&pool).await;

    let (status, json) = upload(&pool, &cast, upload_form(&cast, HEADER.as_bytes())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "The site list contains no sites.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_id_must_name_a_client(pool: PgPool) {
    let cast = cast(&pool).await;
    let form = MultipartForm::new()
        .text("client_id", &cast.manager.id.to_string())
        .text("account_manager_id", &cast.manager.id.to_string())
        .file("site_list", "sites.csv", "text/csv", &csv(&[",TX,A,1 Rd,O,B,F"]));

    let (status, _) = upload(&pool, &cast, form).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn account_manager_cannot_upload(pool: PgPool) {
    let cast = cast(&pool).await;
    let response = post_multipart_auth(
        build_test_app(pool),
        "/api/v1/campaigns",
        upload_form(&cast, &csv(&[",TX,A,1 Rd,O,B,F"])),
        &token_for(&cast.manager),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Appending sites
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn append_continues_numbering_and_rejects_existing_codes(pool: PgPool) {
    let cast = cast(&pool).await;
    let a = create_auditor(&pool, "a@example.com", &["TX"]).await;

    let site_list = csv(&[
        ",TX,Austin,1 Congress Ave,Outdoor Co,Acme Cola,48 Sheet",
        ",TX,Austin,2 Congress Ave,Outdoor Co,Acme Cola,48 Sheet",
    ]);
    let (_, json) = upload(&pool, &cast, upload_form(&cast, &site_list)).await;
    let id = json["data"]["campaign"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/campaigns/{id}/sites");
    let token = token_for(&cast.admin);

    let conflicting = MultipartForm::new().file(
        "site_list",
        "more.csv",
        "text/csv",
        &csv(&["SITE-0002,TX,Austin,7 Lamar Blvd,Outdoor Co,Acme Cola,48 Sheet"]),
    );
    let response = post_multipart_auth(build_test_app(pool.clone()), &uri, conflicting, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let fresh = MultipartForm::new().file(
        "site_list",
        "more.csv",
        "text/csv",
        &csv(&[
            "TX-EXTRA,TX,Austin,7 Lamar Blvd,Outdoor Co,Acme Cola,48 Sheet",
            ",TX,Austin,8 Lamar Blvd,Outdoor Co,Acme Cola,48 Sheet",
        ]),
    );
    let response = post_multipart_auth(build_test_app(pool.clone()), &uri, fresh, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["campaign"]["total_sites"], 4);
    // The campaign held SITE-0002..0003; grid row 3 plus an offset of 2.
    assert_eq!(
        assigned(&json["data"]),
        vec![
            ("TX-EXTRA".to_string(), a.id),
            ("SITE-0005".to_string(), a.id),
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn append_after_skipped_row_continues_past_highest_code(pool: PgPool) {
    let cast = cast(&pool).await;
    let a = create_auditor(&pool, "a@example.com", &["TX"]).await;

    // Grid row 3 has no location, so the sites are SITE-0002 and SITE-0004.
    let site_list = csv(&[
        ",TX,Austin,1 Road,Outdoor Co,Acme Cola,48 Sheet",
        ",TX,Austin,,Outdoor Co,Acme Cola,48 Sheet",
        ",TX,Austin,2 Road,Outdoor Co,Acme Cola,48 Sheet",
    ]);
    let (_, json) = upload(&pool, &cast, upload_form(&cast, &site_list)).await;
    assert_eq!(json["data"]["campaign"]["total_sites"], 2);
    let id = json["data"]["campaign"]["id"].as_i64().unwrap();

    let more = MultipartForm::new().file(
        "site_list",
        "more.csv",
        "text/csv",
        &csv(&[",TX,Austin,3 Road,Outdoor Co,Acme Cola,48 Sheet"]),
    );
    let response = post_multipart_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/campaigns/{id}/sites"),
        more,
        &token_for(&cast.admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(assigned(&json["data"]), vec![("SITE-0005".to_string(), a.id)]);
    assert_eq!(json["data"]["campaign"]["total_sites"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn append_to_missing_campaign_is_404(pool: PgPool) {
    let cast = cast(&pool).await;
    let form = MultipartForm::new().file("site_list", "s.csv", "text/csv", &csv(&[",TX,A,1 Rd,O,B,F"]));
    let response = post_multipart_auth(
        build_test_app(pool),
        "/api/v1/campaigns/999999/sites",
        form,
        &token_for(&cast.admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Scoped reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn campaigns_are_scoped_to_their_participants(pool: PgPool) {
    let cast = cast(&pool).await;
    let auditor = create_auditor(&pool, "a@example.com", &["TX"]).await;
    let stranger = create_user(&pool, "other-client@example.com", Role::ClientAgencyUser).await;
    let other_am = create_user(&pool, "other-am@example.com", Role::AccountManager).await;

    let (_, json) = upload(
        &pool,
        &cast,
        upload_form(&cast, &csv(&[",TX,Austin,1 Congress Ave,O,B,F"])),
    )
    .await;
    let id = json["data"]["campaign"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/campaigns/{id}");

    for user in [&cast.admin, &cast.client, &cast.manager, &auditor] {
        let response = get_auth(build_test_app(pool.clone()), &uri, &token_for(user)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", user.email);
    }
    for user in [&stranger, &other_am] {
        let response = get_auth(build_test_app(pool.clone()), &uri, &token_for(user)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", user.email);
    }

    let listed = get_auth(build_test_app(pool.clone()), "/api/v1/campaigns", &token_for(&cast.manager)).await;
    let json = body_json(listed).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["page"], 1);

    let listed = get_auth(build_test_app(pool), "/api/v1/campaigns", &token_for(&other_am)).await;
    let json = body_json(listed).await;
    assert_eq!(json["total"], 0);
    assert_eq!(json["total_pages"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_and_mine_follow_status_updates(pool: PgPool) {
    let cast = cast(&pool).await;
    let auditor = create_auditor(&pool, "a@example.com", &["TX"]).await;

    let (_, json) = upload(
        &pool,
        &cast,
        upload_form(
            &cast,
            &csv(&[
                ",TX,Austin,1 Congress Ave,O,B,F",
                ",TX,Austin,2 Congress Ave,O,B,F",
            ]),
        ),
    )
    .await;
    let first_id = json["data"]["assignments"][0]["id"].as_i64().unwrap();

    let mine = get_auth(build_test_app(pool.clone()), "/api/v1/sites/mine", &token_for(&auditor)).await;
    assert_eq!(mine.status(), StatusCode::OK);
    let json = body_json(mine).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"][0]["campaign_name"], "Spring Launch");
    assert_eq!(json["data"][0]["site"]["location"], "1 Congress Ave");

    let response = patch_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/site-assignments/{first_id}/status"),
        json!({ "status": "approved" }),
        &token_for(&cast.manager),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");

    let pending = get_auth(build_test_app(pool.clone()), "/api/v1/sites/pending", &token_for(&cast.manager)).await;
    let json = body_json(pending).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let forbidden = get_auth(build_test_app(pool), "/api/v1/sites/pending", &token_for(&auditor)).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_assignment_status_is_rejected(pool: PgPool) {
    let cast = cast(&pool).await;
    let response = patch_json_auth(
        build_test_app(pool),
        "/api/v1/site-assignments/1/status",
        json!({ "status": "rejected" }),
        &token_for(&cast.manager),
    )
    .await;
    assert!(response.status().is_client_error());
}
