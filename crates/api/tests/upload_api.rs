//! Integration tests for image uploads on categories and products.
//!
//! Files are written to a temporary upload root; responses carry the image
//! as inline base64.

mod common;

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::{
    body_bytes, body_json, get, post_json, post_multipart, put_multipart, stored_file_count,
    FilePart,
};
use serde_json::json;
use sqlx::PgPool;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

async fn stored_reference(pool: &PgPool, table: &str, id: i64) -> Option<String> {
    let row: (Option<String>,) =
        sqlx::query_as(&format!("SELECT image_url FROM {table} WHERE id = $1"))
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap();
    row.0
}

async fn category_count(pool: &PgPool) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_category_with_image(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Toys"), ("descricao", "Things to chew")],
        Some(FilePart::png(PNG)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["nome"], "Toys");
    assert_eq!(json["data"]["imagem_url"], STANDARD.encode(PNG));

    let id = json["data"]["id"].as_i64().unwrap();
    let reference = stored_reference(&pool, "categories", id).await.unwrap();
    assert!(reference.starts_with("/uploads/categories/imagem-"));
    assert!(reference.ends_with(".png"));
    assert_eq!(stored_file_count(uploads.path(), "categories"), 1);
    assert_eq!(stored_file_count(uploads.path(), "products"), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_stored_image_is_served_statically(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Toys")],
        Some(FilePart::png(PNG)),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let reference = stored_reference(&pool, "categories", id).await.unwrap();

    let app = common::build_test_app(pool, uploads.path());
    let response = get(app, &reference).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, PNG);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_multipart_without_file_creates_category(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool, uploads.path());
    let response = post_multipart(app, "/api/categories", &[("nome", "Plain")], None).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["imagem_url"].is_null());
    assert_eq!(stored_file_count(uploads.path(), "categories"), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_oversized_image_is_rejected(pool: PgPool) {
    let uploads = common::upload_root().await;
    let big = vec![0u8; 5 * 1024 * 1024 + 1];

    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Huge")],
        Some(FilePart::png(&big)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "File too large. Maximum size: 5MB");

    assert_eq!(category_count(&pool).await, 0);
    assert_eq!(stored_file_count(uploads.path(), "categories"), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_image_at_size_limit_is_accepted(pool: PgPool) {
    let uploads = common::upload_root().await;
    let exact = vec![7u8; 5 * 1024 * 1024];

    let app = common::build_test_app(pool, uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Exact")],
        Some(FilePart::png(&exact)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_text_file_is_rejected(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Notes")],
        Some(FilePart {
            field: "imagem",
            file_name: "notes.txt",
            content_type: "text/plain",
            data: b"hello",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);

    assert_eq!(category_count(&pool).await, 0);
    assert_eq!(stored_file_count(uploads.path(), "categories"), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_image_extension_check_is_case_insensitive(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool, uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Shouting")],
        Some(FilePart {
            field: "imagem",
            file_name: "PHOTO.JPG",
            content_type: "image/jpeg",
            data: b"\xff\xd8\xff",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_multibyte_file_name_with_trailing_slashes_gets_json_error(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Odd name")],
        Some(FilePart {
            field: "imagem",
            file_name: "a.€//",
            content_type: "image/png",
            data: PNG,
        }),
    )
    .await;

    assert_ne!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(category_count(&pool).await, 0);
    assert_eq!(stored_file_count(uploads.path(), "categories"), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_file_under_other_field_is_rejected(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Avatar")],
        Some(FilePart {
            field: "avatar",
            file_name: "me.png",
            content_type: "image/png",
            data: PNG,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(category_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_name_discards_uploaded_file(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_json(app, "/api/categories", json!({"nome": "Toys"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool, uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Toys")],
        Some(FilePart::png(PNG)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stored_file_count(uploads.path(), "categories"), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_without_file_keeps_image(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Toys")],
        Some(FilePart::png(PNG)),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let before = stored_reference(&pool, "categories", id).await;

    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = put_multipart(
        app,
        &format!("/api/categories/{id}"),
        &[("descricao", "Updated")],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["descricao"], "Updated");
    assert_eq!(json["data"]["imagem_url"], STANDARD.encode(PNG));
    assert_eq!(stored_reference(&pool, "categories", id).await, before);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_with_file_replaces_image(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_json(app, "/api/categories", json!({"nome": "Toys"})).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let replacement = b"GIF89a-replacement";
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = put_multipart(
        app,
        &format!("/api/categories/{id}"),
        &[],
        Some(FilePart {
            field: "imagem",
            file_name: "new.gif",
            content_type: "image/gif",
            data: replacement,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["imagem_url"], STANDARD.encode(replacement));
    let reference = stored_reference(&pool, "categories", id).await.unwrap();
    assert!(reference.ends_with(".gif"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_missing_category_discards_uploaded_file(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool, uploads.path());
    let response = put_multipart(
        app,
        "/api/categories/999999",
        &[("nome", "Ghost")],
        Some(FilePart::png(PNG)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(stored_file_count(uploads.path(), "categories"), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_image_file_is_an_error(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_multipart(
        app,
        "/api/categories",
        &[("nome", "Toys")],
        Some(FilePart::png(PNG)),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let reference = stored_reference(&pool, "categories", id).await.unwrap();
    let stored = uploads.path().join(reference.trim_start_matches("/uploads/"));
    std::fs::remove_file(stored).unwrap();

    let app = common::build_test_app(pool, uploads.path());
    let response = get(app, &format!("/api/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_product_with_image_and_string_category(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool.clone(), uploads.path());
    let response = post_json(app, "/api/categories", json!({"nome": "Food"})).await;
    let food = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone(), uploads.path());
    let category_id = food.to_string();
    let response = post_multipart(
        app,
        "/api/products",
        &[("nome", "Kibble"), ("categoria_id", &category_id)],
        Some(FilePart {
            field: "imagem",
            file_name: "kibble.webp",
            content_type: "image/webp",
            data: b"RIFF----WEBP",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["categoria_id"], food);
    assert_eq!(json["data"]["imagem_url"], STANDARD.encode(b"RIFF----WEBP"));

    let id = json["data"]["id"].as_i64().unwrap();
    let reference = stored_reference(&pool, "products", id).await.unwrap();
    assert!(reference.starts_with("/uploads/products/imagem-"));
    assert_eq!(stored_file_count(uploads.path(), "products"), 1);

    // Listing, detail and category detail all inline the same payload.
    let app = common::build_test_app(pool.clone(), uploads.path());
    let json = body_json(get(app, "/api/products").await).await;
    assert_eq!(json["data"][0]["imagem_url"], STANDARD.encode(b"RIFF----WEBP"));

    let app = common::build_test_app(pool.clone(), uploads.path());
    let json = body_json(get(app, &format!("/api/products/{id}")).await).await;
    assert_eq!(json["data"]["imagem_url"], STANDARD.encode(b"RIFF----WEBP"));

    let app = common::build_test_app(pool, uploads.path());
    let json = body_json(get(app, &format!("/api/categories/{food}")).await).await;
    assert_eq!(
        json["data"]["produtos"][0]["imagem_url"],
        STANDARD.encode(b"RIFF----WEBP")
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_product_with_unknown_category_stores_no_file(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool, uploads.path());
    let response = post_multipart(
        app,
        "/api/products",
        &[("nome", "Orphan"), ("categoria_id", "999999")],
        Some(FilePart::png(PNG)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Category not found");
    assert_eq!(stored_file_count(uploads.path(), "products"), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_numeric_category_id_returns_400(pool: PgPool) {
    let uploads = common::upload_root().await;
    let app = common::build_test_app(pool, uploads.path());
    let response = post_multipart(
        app,
        "/api/products",
        &[("nome", "Odd"), ("categoria_id", "abc")],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
