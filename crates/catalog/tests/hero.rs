mod helpers;

use codex_catalog::HeroInput;
use temp_dir::TempDir;

#[tokio::test]
async fn test_hero_with_unknown_faction_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = codex_catalog::Command(pool.clone());
    let query = codex_catalog::Query(pool);

    let err = helpers::create_hero(&cmd, "Ava", Some(99))
        .await
        .unwrap_err();

    let err = err.downcast::<codex_shared::Error>()?;
    assert!(err.is_not_found());
    assert!(query.list_heroes().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_blank_description_is_stored_as_null() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = codex_catalog::Command(pool.clone());
    let query = codex_catalog::Query(pool);

    let id = cmd
        .create_hero(
            HeroInput {
                name: "Ava".to_owned(),
                description: Some("   ".to_owned()),
                faction_id: None,
            },
            None,
        )
        .await?;

    let hero = query.find_hero(id).await?.unwrap();
    assert_eq!(hero.name, "Ava");
    assert_eq!(hero.description, None);
    assert_eq!(hero.faction_id, None);

    Ok(())
}

#[tokio::test]
async fn test_update_hero_clears_faction() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = codex_catalog::Command(pool.clone());
    let query = codex_catalog::Query(pool);

    let order = helpers::create_faction(&cmd, "Order").await?;
    let id = helpers::create_hero(&cmd, "Ava", Some(order)).await?;

    cmd.update_hero(
        id,
        HeroInput {
            name: "Ava the Bold".to_owned(),
            description: Some("Brave".to_owned()),
            faction_id: codex_catalog::parse_faction_id(Some("")),
        },
        Some("/static/uploads/heroes/ava.png".to_owned()),
    )
    .await?;

    let hero = query.find_hero(id).await?.unwrap();
    assert_eq!(hero.name, "Ava the Bold");
    assert_eq!(hero.description.as_deref(), Some("Brave"));
    assert_eq!(hero.faction_id, None);
    assert_eq!(hero.image.as_deref(), Some("/static/uploads/heroes/ava.png"));
    assert!(query.list_heroes_by_faction(order).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_delete_hero() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = codex_catalog::Command(pool.clone());
    let query = codex_catalog::Query(pool);

    let id = helpers::create_hero(&cmd, "Ava", None).await?;
    cmd.delete_hero(id).await?;

    assert!(query.find_hero(id).await?.is_none());
    assert!(cmd.delete_hero(id).await.unwrap_err().is_not_found());

    Ok(())
}

#[tokio::test]
async fn test_list_heroes_with_faction_order() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = codex_catalog::Command(pool.clone());
    let query = codex_catalog::Query(pool);

    let order = helpers::create_faction(&cmd, "Order").await?;
    let chaos = helpers::create_faction(&cmd, "Chaos").await?;
    helpers::create_hero(&cmd, "zed", None).await?;
    helpers::create_hero(&cmd, "paladin", Some(order)).await?;
    helpers::create_hero(&cmd, "Cleric", Some(order)).await?;
    helpers::create_hero(&cmd, "Demon", Some(chaos)).await?;

    let rows = query
        .list_heroes_with_faction()
        .await?
        .into_iter()
        .map(|v| (v.faction_name, v.hero.name))
        .collect::<Vec<_>>();

    assert_eq!(
        rows,
        vec![
            (Some("Chaos".to_owned()), "Demon".to_owned()),
            (Some("Order".to_owned()), "Cleric".to_owned()),
            (Some("Order".to_owned()), "paladin".to_owned()),
            (None, "zed".to_owned()),
        ]
    );

    Ok(())
}
