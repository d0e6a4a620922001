use cms_http::{ApiClient, ApiError, CrudClient, CrudService, MediaService, UploadFile};
use cms_kernel::models::{
    CategoryPayload, ContentPayload, ContentStatus, MediaPayload, RolePayload, TagPayload,
    TagUpdate, UserPayload,
};
use cms_kernel::{
    CategoryResource, ContentResource, Identified, MediaResource, Pagination, Resource,
    RoleResource, TagResource, UserResource,
};
use cms_testkit::{FakeCmsApi, DUPLICATE_EMAIL_DETAIL};
use serde_json::json;

async fn setup() -> (FakeCmsApi, ApiClient) {
    let api = FakeCmsApi::spawn().await.unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), api.base_url());
    (api, client)
}

async fn create_list_delete<R: Resource>(client: &ApiClient, payload: R::Create) {
    let service = CrudClient::<R>::new(client.clone());

    let created = service.create(&payload).await.unwrap();
    let listed = service.list(None).await.unwrap();
    assert!(
        listed.iter().any(|item| item.id() == created.id()),
        "{} missing after create",
        R::NAME
    );

    service.delete(created.id()).await.unwrap();
    let listed = service.list(None).await.unwrap();
    assert!(
        listed.iter().all(|item| item.id() != created.id()),
        "{} still listed after delete",
        R::NAME
    );
}

#[tokio::test]
async fn every_kind_lists_created_items_and_drops_deleted_ones() {
    let (_api, client) = setup().await;

    create_list_delete::<UserResource>(
        &client,
        UserPayload {
            email: "a@b.com".into(),
            password: Some("secret".into()),
            ..Default::default()
        },
    )
    .await;
    create_list_delete::<RoleResource>(
        &client,
        RolePayload {
            name: "Editor".into(),
            description: None,
        },
    )
    .await;
    create_list_delete::<ContentResource>(
        &client,
        ContentPayload {
            title: "Hello".into(),
            slug: "hello".into(),
            author_id: 1,
            status: Some(ContentStatus::Published),
            ..Default::default()
        },
    )
    .await;
    create_list_delete::<CategoryResource>(
        &client,
        CategoryPayload {
            name: "News".into(),
            description: Some("Daily".into()),
        },
    )
    .await;
    create_list_delete::<TagResource>(&client, TagPayload { name: "rust".into() }).await;
    create_list_delete::<MediaResource>(
        &client,
        MediaPayload {
            filename: "a.png".into(),
            url: "/uploads/a.png".into(),
            ..Default::default()
        },
    )
    .await;
}

#[tokio::test]
async fn list_sends_pagination_window() {
    let (api, client) = setup().await;
    for name in ["a", "b", "c"] {
        api.seed("tags", json!({ "name": name }));
    }

    let tags = CrudClient::<TagResource>::new(client);
    let page = tags.list(Some(Pagination::new(1, 1))).await.unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "b");
    assert_eq!(
        api.last_request().unwrap().query.as_deref(),
        Some("skip=1&limit=1")
    );
}

#[tokio::test]
async fn missing_item_is_not_found() {
    let (_api, client) = setup().await;
    let err = CrudClient::<CategoryResource>::new(client)
        .get(99)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }), "{err:?}");
}

#[tokio::test]
async fn duplicate_email_is_a_bad_request_with_detail() {
    let (api, client) = setup().await;
    api.seed("users", json!({ "email": "taken@b.com" }));

    let err = CrudClient::<UserResource>::new(client)
        .create(&UserPayload {
            email: "taken@b.com".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(err.detail(), Some(DUPLICATE_EMAIL_DETAIL));
}

#[tokio::test]
async fn server_failures_surface_unmodified() {
    let (api, client) = setup().await;
    api.fail_next("roles", 503, json!({ "detail": [{ "msg": "down" }] }));

    let err = CrudClient::<RoleResource>::new(client)
        .list(None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 503, detail: None }));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let client = ApiClient::with_client(reqwest::Client::new(), "http://127.0.0.1:1");
    let err = CrudClient::<TagResource>::new(client)
        .list(None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn update_is_partial() {
    let (api, client) = setup().await;
    let id = api.seed("tags", json!({ "name": "old" }));

    let tags = CrudClient::<TagResource>::new(client);
    let updated = tags
        .update(
            id,
            &TagUpdate {
                name: Some("new".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "new");
    assert_eq!(tags.get(id).await.unwrap().name, "new");
}

#[tokio::test]
async fn requests_carry_bearer_token_and_request_id() {
    let (api, client) = setup().await;
    let roles = CrudClient::<RoleResource>::new(client.clone());

    roles.list(None).await.unwrap();
    let anonymous = api.last_request().unwrap();
    assert_eq!(anonymous.authorization, None);
    assert!(anonymous.request_id.is_some());

    client.set_token(Some("demo-token-a@b.com".into()));
    roles.list(None).await.unwrap();
    let authed = api.last_request().unwrap();
    assert_eq!(
        authed.authorization.as_deref(),
        Some("Bearer demo-token-a@b.com")
    );
    assert_ne!(authed.request_id, anonymous.request_id);
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let (api, client) = setup().await;
    let media = CrudClient::<MediaResource>::new(client);

    let uploaded = media
        .upload(UploadFile::new("logo.png", vec![0x89, 0x50, 0x4e, 0x47]))
        .await
        .unwrap();

    assert_eq!(uploaded.filename, "logo.png");
    assert_eq!(uploaded.url, "/uploads/logo.png");
    assert_eq!(uploaded.mime_type.as_deref(), Some("image/png"));
    assert_eq!(uploaded.size, Some(4));
    assert_eq!(api.records("media").len(), 1);
}
