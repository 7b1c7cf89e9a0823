mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_index_lists_factions() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    app.create_faction("Order").await?;
    app.create_faction("Chaos").await?;

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = helpers::body_string(response).await;
    let chaos = body.find("Chaos").unwrap();
    let order = body.find("Order").unwrap();

    assert!(chaos < order);

    Ok(())
}

#[tokio::test]
async fn test_faction_page_lists_its_heroes() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let order = app.create_faction("Order").await?;
    let chaos = app.create_faction("Chaos").await?;
    app.create_hero("Paladin", Some(order)).await?;
    app.create_hero("Demon", Some(chaos)).await?;

    let response = app.get(&format!("/faction/{order}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = helpers::body_string(response).await;
    assert!(body.contains("Paladin"));
    assert!(!body.contains("Demon"));
    assert!(body.contains("dark-twinkle"));

    Ok(())
}

#[tokio::test]
async fn test_hero_page_shows_faction() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let order = app.create_faction("Order").await?;
    let paladin = app.create_hero("Paladin", Some(order)).await?;

    let body = helpers::body_string(app.get(&format!("/hero/{paladin}"), None).await).await;
    assert!(body.contains("Paladin"));
    assert!(body.contains(&format!("/faction/{order}")));

    Ok(())
}

#[tokio::test]
async fn test_missing_pages() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;

    for uri in ["/faction/404", "/hero/404", "/unknown"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");

        let body = helpers::body_string(response).await;
        assert!(body.contains("Not found"));
    }

    Ok(())
}

#[tokio::test]
async fn test_health_and_ready() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;

    assert_eq!(app.get("/health", None).await.status(), StatusCode::OK);
    assert_eq!(app.get("/ready", None).await.status(), StatusCode::OK);

    Ok(())
}
