use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::tests::support;

#[tokio::test]
async fn test_list_empty_collection() {
    let app = support::create_test_app().await;

    let response = app.server.get("/beers").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["beers"], json!([]));
    assert_eq!(body["pageNumber"], 1);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["pageSize"], 10);
    assert_eq!(body["totalCount"], 0);
    assert_eq!(body["links"], json!({}));
}

#[tokio::test]
async fn test_list_middle_page_has_links_both_ways() {
    let app = support::create_test_app().await;
    support::seed_beers(&app.context, 25).await;

    let response = app.server.get("/beers").add_query_param("page", 2).await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    let beers = body["beers"].as_array().unwrap();
    assert_eq!(beers.len(), 10);
    assert_eq!(beers[0]["id"], 11);
    assert_eq!(beers[9]["id"], 20);
    assert_eq!(body["totalCount"], 25);
    assert_eq!(
        body["links"],
        json!({
            "nextPage": "/beers?page=3",
            "lastPage": "/beers?page=3",
            "prevPage": "/beers?page=1",
            "firstPage": "/beers?page=1",
        })
    );
}

#[tokio::test]
async fn test_list_clamps_out_of_range_pages() {
    let app = support::create_test_app().await;
    support::seed_beers(&app.context, 25).await;

    let high: Value = app.server.get("/beers?page=99").await.json();
    assert_eq!(high["pageNumber"], 3);
    assert_eq!(high["beers"].as_array().unwrap().len(), 5);
    assert!(high["links"].get("nextPage").is_none());

    for raw in ["0", "-4", "two"] {
        let low: Value = app.server.get(&format!("/beers?page={raw}")).await.json();
        assert_eq!(low["pageNumber"], 1, "page={raw}");
        assert_eq!(low["beers"][0]["id"], 1, "page={raw}");
    }
}

#[tokio::test]
async fn test_create_then_read_composite() {
    let app = support::create_test_app().await;
    let manufacturer_id = support::seed_manufacturer(&app.context, "Deschutes").await;

    let response = app
        .server
        .post("/beers")
        .json(&support::beer_body(manufacturer_id, "Black Butte"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["links"], json!({ "beer": format!("/beers/{id}") }));

    let response = app.server.get(&format!("/beers/{id}")).await;
    response.assert_status(StatusCode::OK);
    let beer: Value = response.json();
    assert_eq!(beer["id"], id);
    assert_eq!(beer["name"], "Black Butte");
    assert_eq!(beer["type"], "IPA");
    assert_eq!(beer["reviews"], json!([]));
    assert_eq!(beer["photos"], json!([]));
    assert_eq!(beer["manufacturer"]["name"], "Deschutes");
}

#[tokio::test]
async fn test_read_composite_collects_reviews_and_photos() {
    let app = support::create_test_app().await;
    support::seed_beers(&app.context, 2).await;
    support::seed_review(&app.context, 2, 5).await;
    support::seed_review(&app.context, 2, 6).await;
    support::seed_review(&app.context, 1, 7).await;
    support::seed_photo(&app.context, 2, 5).await;

    let beer: Value = app.server.get("/beers/2").await.json();

    let reviews = beer["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().all(|review| review["beerid"] == 2));
    assert_eq!(beer["photos"].as_array().unwrap().len(), 1);
    assert_eq!(beer["photos"][0]["caption"], "On tap");
}

#[tokio::test]
async fn test_create_drops_undeclared_fields() {
    let app = support::create_test_app().await;
    let manufacturer_id = support::seed_manufacturer(&app.context, "Rogue").await;
    let mut body = support::beer_body(manufacturer_id, "Dead Guy");
    body["rating"] = json!(10);
    body["id"] = json!(500);

    let created: Value = app.server.post("/beers").json(&body).await.json();

    assert_eq!(created["id"], 1);
    let beer: Value = app.server.get("/beers/1").await.json();
    assert!(beer.get("rating").is_none());
}

#[tokio::test]
async fn test_create_missing_field_is_rejected() {
    let app = support::create_test_app().await;
    let manufacturer_id = support::seed_manufacturer(&app.context, "Rogue").await;
    let mut body = support::beer_body(manufacturer_id, "Dead Guy");
    body.as_object_mut().unwrap().remove("abv");

    let response = app.server.post("/beers").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Request body is not a valid beer object.");

    let listed: Value = app.server.get("/beers").await.json();
    assert_eq!(listed["totalCount"], 0);
}

#[tokio::test]
async fn test_create_null_required_field_is_rejected() {
    let app = support::create_test_app().await;
    let mut body = support::beer_body(1, "Nothing");
    body["name"] = Value::Null;

    app.server
        .post("/beers")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_non_json_body_is_rejected() {
    let app = support::create_test_app().await;

    app.server
        .post("/beers")
        .text("name=Dead Guy")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .post("/beers")
        .json(&json!(["not", "an", "object"]))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_read_missing_and_malformed_ids() {
    let app = support::create_test_app().await;

    let response = app.server.get("/beers/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Requested resource /beers/9999 does not exist");

    app.server.get("/beers/abc").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_overwrites_fields() {
    let app = support::create_test_app().await;
    let manufacturer_id = support::seed_beers(&app.context, 1).await;

    let mut body = support::beer_body(manufacturer_id, "Renamed");
    body["abv"] = json!(7.2);
    let response = app.server.put("/beers/1").json(&body).await;

    response.assert_status(StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["links"], json!({ "beer": "/beers/1" }));

    let beer: Value = app.server.get("/beers/1").await.json();
    assert_eq!(beer["name"], "Renamed");
    assert_eq!(beer["abv"], 7.2);
}

#[tokio::test]
async fn test_update_missing_beer() {
    let app = support::create_test_app().await;
    let manufacturer_id = support::seed_manufacturer(&app.context, "Rogue").await;

    app.server
        .put("/beers/42")
        .json(&support::beer_body(manufacturer_id, "Ghost"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_cascades_to_reviews() {
    let app = support::create_test_app().await;
    support::seed_beers(&app.context, 1).await;
    support::seed_review(&app.context, 1, 5).await;

    app.server.delete("/beers/1").await.assert_status(StatusCode::NO_CONTENT);

    app.server.get("/beers/1").await.assert_status(StatusCode::NOT_FOUND);
    app.server.get("/reviews/1").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_beer_leaves_store_unchanged() {
    let app = support::create_test_app().await;
    support::seed_beers(&app.context, 3).await;

    app.server.delete("/beers/9999").await.assert_status(StatusCode::NOT_FOUND);

    let listed: Value = app.server.get("/beers").await.json();
    assert_eq!(listed["totalCount"], 3);
}

#[tokio::test]
async fn test_list_with_unreadable_query_falls_back_to_first_page() {
    let app = support::create_test_app().await;
    support::seed_beers(&app.context, 15).await;

    let response = app.server.get("/beers?page=1&page=2").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["pageNumber"], 1);
    assert_eq!(body["beers"][0]["id"], 1);
    assert_eq!(body["links"]["nextPage"], "/beers?page=2");
}
