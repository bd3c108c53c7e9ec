//! End-to-end coverage of the `/api/issues/{project}` surface, mirroring
//! the original functional test suite.

use integration_tests::{delete, get, post, put, test_app};
use serde_json::json;

#[tokio::test]
async fn create_with_every_field() {
    let app = test_app();
    let body = post(
        &app,
        "/api/issues/apitest",
        json!({
            "issue_title": "test",
            "issue_text": "Test issue",
            "created_by": "u1",
            "assigned_to": "a",
            "status_text": "s",
        }),
    )
    .await;

    assert_eq!(body["issue_title"], "test");
    assert_eq!(body["issue_text"], "Test issue");
    assert_eq!(body["created_by"], "u1");
    assert_eq!(body["assigned_to"], "a");
    assert_eq!(body["status_text"], "s");
    assert_eq!(body["open"], true);
    assert_eq!(body["created_on"], body["updated_on"]);
    assert!(body.get("_id").is_some());
    assert!(body.get("project").is_none());
}

#[tokio::test]
async fn create_with_required_fields_only_defaults_the_rest() {
    let app = test_app();
    let body = post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t2", "issue_text": "x", "created_by": "u2" }),
    )
    .await;

    assert_eq!(body["assigned_to"], "");
    assert_eq!(body["status_text"], "");
    assert_eq!(body["open"], true);
}

#[tokio::test]
async fn create_with_missing_required_field_stores_nothing() {
    let app = test_app();
    let body = post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t", "issue_text": "x" }),
    )
    .await;
    assert_eq!(body["error"], "required field(s) missing");

    let issues = get(&app, "/api/issues/apitest").await;
    assert_eq!(issues.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn filtering_is_conjunctive_and_ignores_unknown_keys() {
    let app = test_app();
    post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "a", "issue_text": "Test issue", "created_by": "functional_test" }),
    )
    .await;
    post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "b", "issue_text": "Different text", "created_by": "different_user" }),
    )
    .await;
    post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "c", "issue_text": "Test issue", "created_by": "different_user" }),
    )
    .await;

    let all = get(&app, "/api/issues/apitest").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let one_term = get(&app, "/api/issues/apitest?created_by=different_user").await;
    assert_eq!(one_term.as_array().unwrap().len(), 2);

    // two terms return a subset of one
    let two_terms = get(
        &app,
        "/api/issues/apitest?created_by=different_user&issue_text=Different%20text",
    )
    .await;
    assert_eq!(two_terms.as_array().unwrap().len(), 1);
    assert_eq!(two_terms[0]["issue_title"], "b");

    let with_noise = get(&app, "/api/issues/apitest?bogus=whatever").await;
    assert_eq!(with_noise.as_array().unwrap().len(), 3);

    for issue in all.as_array().unwrap() {
        assert!(issue.get("project").is_none());
    }
}

#[tokio::test]
async fn projects_partition_the_collection() {
    let app = test_app();
    post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t", "issue_text": "x", "created_by": "u" }),
    )
    .await;

    let elsewhere = get(&app, "/api/issues/other-project").await;
    assert_eq!(elsewhere.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn open_query_values_are_coerced() {
    let app = test_app();
    let created = post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t", "issue_text": "x", "created_by": "u" }),
    )
    .await;
    post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t2", "issue_text": "x", "created_by": "u" }),
    )
    .await;

    let id = created["_id"].as_str().unwrap().to_string();
    put(&app, "/api/issues/apitest", json!({ "_id": id, "open": "false" })).await;

    let closed = get(&app, "/api/issues/apitest?open=false").await;
    assert_eq!(closed.as_array().unwrap().len(), 1);
    assert_eq!(closed[0]["issue_title"], "t");

    let open = get(&app, "/api/issues/apitest?open=true").await;
    assert_eq!(open.as_array().unwrap().len(), 1);
    assert_eq!(open[0]["issue_title"], "t2");
}

#[tokio::test]
async fn timestamps_filter_as_rfc3339_values() {
    let app = test_app();
    let created = post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t", "issue_text": "x", "created_by": "u" }),
    )
    .await;
    post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t2", "issue_text": "x", "created_by": "u" }),
    )
    .await;

    let stamp = created["created_on"].as_str().unwrap();
    let found = get(&app, &format!("/api/issues/apitest?created_on={stamp}")).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["issue_title"], "t");

    let body = get(&app, "/api/issues/apitest?created_on=yesterday").await;
    assert_eq!(body["error"], "Error getting issues");
}

#[tokio::test]
async fn querying_a_malformed_id_is_a_lookup_error() {
    let app = test_app();
    let body = get(&app, "/api/issues/apitest?_id=not-a-real-id").await;
    assert_eq!(body["error"], "Error getting issues");
}

#[tokio::test]
async fn update_one_field_moves_updated_on_only() {
    let app = test_app();
    let created = post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t", "issue_text": "x", "created_by": "u" }),
    )
    .await;
    let id = created["_id"].as_str().unwrap().to_string();

    let body = put(
        &app,
        "/api/issues/apitest",
        json!({ "_id": id.clone(), "open": "false" }),
    )
    .await;
    assert_eq!(body["result"], "successfully updated");
    assert_eq!(body["_id"], id.as_str());

    let found = get(&app, &format!("/api/issues/apitest?_id={id}")).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["open"], false);
    assert_ne!(found[0]["created_on"], found[0]["updated_on"]);
}

#[tokio::test]
async fn repeating_an_identical_update_still_succeeds() {
    let app = test_app();
    let created = post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t", "issue_text": "x", "created_by": "u" }),
    )
    .await;
    let id = created["_id"].as_str().unwrap().to_string();
    let update = json!({ "_id": id.clone(), "open": "false", "assigned_to": "a" });

    let first = put(&app, "/api/issues/apitest", update.clone()).await;
    assert_eq!(first["result"], "successfully updated");

    let second = put(&app, "/api/issues/apitest", update).await;
    assert_eq!(second["result"], "successfully updated");

    let found = get(&app, &format!("/api/issues/apitest?_id={id}")).await;
    assert_eq!(found[0]["open"], false);
    assert_eq!(found[0]["assigned_to"], "a");
}

#[tokio::test]
async fn update_validation_order_is_fixed() {
    let app = test_app();
    let created = post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t", "issue_text": "x", "created_by": "u" }),
    )
    .await;
    let id = created["_id"].as_str().unwrap().to_string();

    // 1. missing _id wins over everything else
    let body = put(&app, "/api/issues/apitest", json!({ "open": "false" })).await;
    assert_eq!(body["error"], "missing _id");

    // 2. then the no-fields check, echoing the id
    let body = put(&app, "/api/issues/apitest", json!({ "_id": id.clone() })).await;
    assert_eq!(body["error"], "no update field(s) sent");
    assert_eq!(body["_id"], id.as_str());

    // 3. a malformed id only surfaces once fields are present
    let body = put(
        &app,
        "/api/issues/apitest",
        json!({ "_id": "not-a-real-id", "open": "false" }),
    )
    .await;
    assert_eq!(body["error"], "could not update");
    assert_eq!(body["_id"], "not-a-real-id");
}

#[tokio::test]
async fn delete_lifecycle_is_terminal() {
    let app = test_app();
    let created = post(
        &app,
        "/api/issues/apitest",
        json!({ "issue_title": "t", "issue_text": "x", "created_by": "u" }),
    )
    .await;
    let id = created["_id"].as_str().unwrap().to_string();

    let body = delete(
        &app,
        "/api/issues/apitest",
        Some(json!({ "_id": id.clone() })),
    )
    .await;
    assert_eq!(body["result"], "successfully deleted");
    assert_eq!(body["_id"], id.as_str());

    let found = get(&app, &format!("/api/issues/apitest?_id={id}")).await;
    assert_eq!(found.as_array().unwrap().len(), 0);

    let again = delete(
        &app,
        "/api/issues/apitest",
        Some(json!({ "_id": id.clone() })),
    )
    .await;
    assert_eq!(again["error"], "could not delete");
    assert_eq!(again["_id"], id.as_str());
}

#[tokio::test]
async fn delete_without_an_id_or_with_a_bad_one() {
    let app = test_app();

    let body = delete(&app, "/api/issues/apitest", None).await;
    assert_eq!(body["error"], "missing _id");

    let body = delete(
        &app,
        "/api/issues/apitest",
        Some(json!({ "_id": "not-a-real-id" })),
    )
    .await;
    assert_eq!(body["error"], "could not delete");
    assert_eq!(body["_id"], "not-a-real-id");
}
