mod helpers;

use helpers::{setup_test_app, upload_form};

#[tokio::test]
async fn test_upload_document_returns_created_with_metadata() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/api/documents")
        .multipart(upload_form(
            "My Résumé.PDF",
            "application/pdf",
            b"%PDF-1.4 fake".to_vec(),
            Some("panelist-materials"),
        ))
        .await;

    assert_eq!(response.status_code(), 201);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    let document = &body["document"];
    assert_eq!(document["originalName"], "my_r_sum_.pdf");
    assert_eq!(document["category"], "panelist-materials");
    assert_eq!(document["type"], "application/pdf");
    assert_eq!(document["size"], 13);
    let url = document["url"].as_str().unwrap();
    assert!(url.contains("/documents/panelist-materials/"));
    assert!(url.ends_with("-my_r_sum_.pdf"));

    let name = document["name"].as_str().unwrap();
    assert!(app.file_exists(&format!("documents/panelist-materials/{}", name)));
}

#[tokio::test]
async fn test_upload_document_without_category_uses_resources() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/documents")
        .multipart(upload_form(
            "notes.txt",
            "text/plain",
            b"hello".to_vec(),
            None,
        ))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["document"]["category"], "resources");
    assert!(body["document"]["url"]
        .as_str()
        .unwrap()
        .contains("/documents/resources/"));
}

#[tokio::test]
async fn test_upload_document_invalid_category_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/documents")
        .multipart(upload_form(
            "notes.txt",
            "text/plain",
            b"hello".to_vec(),
            Some("not-a-category"),
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_upload_document_unsupported_type_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/documents")
        .multipart(upload_form(
            "tool.exe",
            "application/x-msdownload",
            b"MZ".to_vec(),
            None,
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Unsupported file type"));
}

#[tokio::test]
async fn test_upload_document_missing_file_rejected() {
    let app = setup_test_app().await;

    let form = axum_test::multipart::MultipartForm::new().add_text("category", "resources");
    let response = app.client().post("/api/documents").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("No file"));
}

#[tokio::test]
async fn test_upload_document_at_size_ceiling_accepted() {
    let app = setup_test_app().await;

    // 25 MB exactly: the ceiling is inclusive.
    let response = app
        .client()
        .post("/api/documents")
        .multipart(upload_form(
            "big.pdf",
            "application/pdf",
            vec![0u8; 25 * 1024 * 1024],
            None,
        ))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["document"]["size"], 25 * 1024 * 1024);
}

#[tokio::test]
async fn test_upload_document_over_size_ceiling_rejected_as_too_large() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/documents")
        .multipart(upload_form(
            "huge.pdf",
            "application/pdf",
            vec![0u8; 26 * 1024 * 1024],
            None,
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    assert!(body["error"].as_str().unwrap().contains("too large"));

    // Nothing was stored.
    let response = app.client().get("/api/documents").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["documents"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_documents_reflects_uploads() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get("/api/documents").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["documents"].as_array().unwrap().len(), 0);

    client
        .post("/api/documents")
        .multipart(upload_form(
            "agenda.pdf",
            "application/pdf",
            b"%PDF".to_vec(),
            Some("summit-docs"),
        ))
        .await;

    let response = client.get("/api/documents").await;
    let body: serde_json::Value = response.json();
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["originalName"], "agenda.pdf");
    assert_eq!(documents[0]["type"], "application/pdf");
}

#[tokio::test]
async fn test_upload_refreshes_manifest_on_disk() {
    let app = setup_test_app().await;

    app.client()
        .post("/api/documents")
        .multipart(upload_form(
            "deck.pptx",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            b"pk".to_vec(),
            Some("presentations"),
        ))
        .await;

    assert!(app.file_exists("documents/resources.json"));
    let raw = std::fs::read(app.storage_root().join("documents/resources.json")).unwrap();
    let manifest: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(manifest.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_regenerate_manifest_counts_entries() {
    let app = setup_test_app().await;
    let client = app.client();

    client
        .post("/api/documents")
        .multipart(upload_form("a.pdf", "application/pdf", b"a".to_vec(), None))
        .await;
    client
        .post("/api/documents")
        .multipart(upload_form("b.csv", "text/csv", b"b".to_vec(), None))
        .await;

    let response = client.post("/api/documents/manifest").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_spec_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"]["/api/documents"].is_object());
    assert!(body["paths"]["/api/gallery"].is_object());
}
