//! Table mutation tests
//!
//! Role checks, uniqueness, partial updates and floor-plan moves against a
//! migrated SQLite database.

mod common;

use anyhow::Result;
use bistro::app_context::{NewTable, Position, TableUpdate};
use bistro::auth::Role;
use bistro::database::entities::tables;
use bistro::errors::CoreErrorKind;
use common::{actor, admin, seed_area, seed_table, setup_app};
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn add_table_requires_authentication() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Terrace").await?;

    let err = app
        .add_table(None, NewTable::new(1, 2, area_id))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::Unauthenticated);
    assert_eq!(tables::Entity::find().count(app.db()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn add_table_rejects_roles_outside_policy() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Terrace").await?;

    for role in [Role::User, Role::Delivery, Role::Waiter, Role::Chef] {
        let err = app
            .add_table(Some(&actor(role)), NewTable::new(1, 2, area_id.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), CoreErrorKind::Forbidden, "role {}", role);
    }

    let manager_table = app
        .add_table(Some(&actor(Role::Manager)), NewTable::new(1, 2, area_id))
        .await?;
    assert_eq!(manager_table.table_number, 1);
    assert!(!manager_table.reserved);
    assert!(manager_table.special_requests.is_empty());
    assert!(manager_table.position.is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_table_number_is_a_conflict() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    seed_table(&app, 7, &area_id).await?;

    let err = app
        .add_table(Some(&admin()), NewTable::new(7, 2, area_id))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::Conflict);
    assert!(err.message().contains("duplicate tableNumber"));
    assert_eq!(tables::Entity::find().count(app.db()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn concurrent_add_table_with_same_number_has_one_winner() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    let admin = admin();

    let (first, second) = tokio::join!(
        app.add_table(Some(&admin), NewTable::new(12, 4, area_id.clone())),
        app.add_table(Some(&admin), NewTable::new(12, 2, area_id.clone())),
    );

    let results = [first, second];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.kind() == CoreErrorKind::Conflict))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(tables::Entity::find().count(app.db()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn add_table_with_unknown_area_is_not_found() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;

    let err = app
        .add_table(Some(&admin()), NewTable::new(3, 2, "missing-area"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::NotFound);
    let fields = err.fields().expect("not found fields");
    assert_eq!(fields.get("entity").map(String::as_str), Some("Area"));
    Ok(())
}

#[tokio::test]
async fn add_table_validates_counts() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;

    let err = app
        .add_table(Some(&admin()), NewTable::new(4, 0, area_id))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::Validation);
    Ok(())
}

#[tokio::test]
async fn edit_table_with_only_diners_keeps_other_fields() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;

    let mut input = NewTable::new(5, 2, area_id.clone());
    input.position = Some(Position::new(3.0, 4.0));
    input.reserved = true;
    input.special_requests = vec!["quiet".to_string(), "booth".to_string()];
    let before = app.add_table(Some(&admin()), input).await?;

    let update = TableUpdate {
        diners: Some(8),
        ..Default::default()
    };
    let after = app.edit_table(Some(&admin()), &before.id, update).await?;

    assert_eq!(after.diners, 8);
    assert_eq!(after.table_number, before.table_number);
    assert_eq!(after.position, before.position);
    assert_eq!(after.reserved, before.reserved);
    assert_eq!(after.special_requests, before.special_requests);
    assert_eq!(after.area_id, area_id);
    Ok(())
}

#[tokio::test]
async fn edit_table_can_clear_position() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;

    let mut input = NewTable::new(6, 2, area_id);
    input.position = Some(Position::new(1.0, 1.0));
    let table = app.add_table(Some(&admin()), input).await?;

    let update = TableUpdate {
        position: Some(None),
        ..Default::default()
    };
    let table = app.edit_table(Some(&admin()), &table.id, update).await?;

    assert!(table.position.is_none());
    assert_eq!(table.diners, 2);
    Ok(())
}

#[tokio::test]
async fn edit_missing_table_is_not_found_and_creates_nothing() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;

    let update = TableUpdate {
        diners: Some(3),
        ..Default::default()
    };
    let err = app
        .edit_table(Some(&admin()), "no-such-table", update)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::NotFound);
    assert_eq!(tables::Entity::find().count(app.db()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn edit_table_is_admin_only() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    let table = seed_table(&app, 1, &area_id).await?;

    let err = app
        .edit_table(Some(&actor(Role::Manager)), &table.id, TableUpdate::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::Forbidden);
    Ok(())
}

#[tokio::test]
async fn edit_table_number_onto_existing_is_conflict() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    seed_table(&app, 1, &area_id).await?;
    let second = seed_table(&app, 2, &area_id).await?;

    let update = TableUpdate {
        table_number: Some(1),
        ..Default::default()
    };
    let err = app
        .edit_table(Some(&admin()), &second.id, update)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::Conflict);
    Ok(())
}

#[tokio::test]
async fn delete_table_removes_record() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    let table = seed_table(&app, 9, &area_id).await?;

    app.delete_table(Some(&admin()), &table.id).await?;

    assert!(app.get_table(Some(&admin()), &table.id).await?.is_none());

    let err = app.delete_table(Some(&admin()), &table.id).await.unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::NotFound);
    Ok(())
}

#[tokio::test]
async fn delete_table_rejects_waiter() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    let table = seed_table(&app, 9, &area_id).await?;

    let err = app
        .delete_table(Some(&actor(Role::Waiter)), &table.id)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::Forbidden);
    assert!(app.get_table(Some(&admin()), &table.id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn reservation_round_trip_leaves_other_fields_unchanged() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    let original = seed_table(&app, 10, &area_id).await?;

    let reserved = app
        .toggle_table_reservation(Some(&admin()), &original.id, true)
        .await?;
    assert!(reserved.reserved);

    let released = app
        .toggle_table_reservation(Some(&admin()), &original.id, false)
        .await?;

    assert!(!released.reserved);
    assert_eq!(released.table_number, original.table_number);
    assert_eq!(released.diners, original.diners);
    assert_eq!(released.position, original.position);
    assert_eq!(released.area_id, original.area_id);
    assert_eq!(released.special_requests, original.special_requests);
    Ok(())
}

#[tokio::test]
async fn toggle_reservation_on_missing_table_is_not_found() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;

    let err = app
        .toggle_table_reservation(Some(&admin()), "ghost", true)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::NotFound);
    Ok(())
}

#[tokio::test]
async fn move_position_updates_only_position() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    let other = seed_table(&app, 6, &area_id).await?;
    let original = seed_table(&app, 7, &area_id).await?;

    let moved = app
        .move_position_table(Some(&admin()), 7, Position::new(10.0, 20.0))
        .await?;
    assert_eq!(moved.id, original.id);

    let reread = app
        .get_table(Some(&admin()), &original.id)
        .await?
        .expect("table exists");

    assert_eq!(reread.position, Some(Position::new(10.0, 20.0)));
    assert_eq!(reread.table_number, original.table_number);
    assert_eq!(reread.diners, original.diners);
    assert_eq!(reread.reserved, original.reserved);
    assert_eq!(reread.area_id, original.area_id);
    assert_eq!(reread.special_requests, original.special_requests);

    let untouched = app
        .get_table(Some(&admin()), &other.id)
        .await?
        .expect("table exists");
    assert!(untouched.position.is_none());
    Ok(())
}

#[tokio::test]
async fn move_position_of_unknown_number_is_not_found() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;

    let err = app
        .move_position_table(Some(&actor(Role::Manager)), 99, Position::new(0.0, 0.0))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::NotFound);
    Ok(())
}

#[tokio::test]
async fn move_position_rejects_chef() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    seed_table(&app, 7, &area_id).await?;

    let err = app
        .move_position_table(Some(&actor(Role::Chef)), 7, Position::new(1.0, 1.0))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoreErrorKind::Forbidden);
    Ok(())
}

#[tokio::test]
async fn list_tables_filters_by_area_and_orders_by_number() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let main = seed_area(app.db(), "Main").await?;
    let patio = seed_area(app.db(), "Patio").await?;
    seed_table(&app, 3, &main).await?;
    seed_table(&app, 1, &main).await?;
    seed_table(&app, 2, &patio).await?;

    let all = app.list_tables(Some(&actor(Role::User)), None).await?;
    let numbers: Vec<i32> = all.iter().map(|t| t.table_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let main_only = app.list_tables(Some(&actor(Role::Waiter)), Some(&main)).await?;
    let numbers: Vec<i32> = main_only.iter().map(|t| t.table_number).collect();
    assert_eq!(numbers, vec![1, 3]);

    let err = app.list_tables(None, None).await.unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Unauthenticated);
    Ok(())
}

#[tokio::test]
async fn every_mutation_checks_the_actor_before_writing() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    let table = seed_table(&app, 7, &area_id).await?;
    let order = bistro::app_context::NewOrder {
        table_id: table.id.clone(),
        order_number: "A-1".to_string(),
        cart: serde_json::json!([]),
        user_name: "Guest".to_string(),
        user_email: "guest@example.com".to_string(),
        service_fee: 0.0,
        total: 0.0,
        discount: None,
        note: None,
        payment_token: None,
    };
    let update = TableUpdate {
        diners: Some(9),
        ..Default::default()
    };

    // (anonymous, a role outside each operation's policy)
    let delivery = actor(Role::Delivery);
    let manager = actor(Role::Manager);
    let cases: [(Option<&bistro::auth::Actor>, CoreErrorKind); 2] = [
        (None, CoreErrorKind::Unauthenticated),
        (Some(&delivery), CoreErrorKind::Forbidden),
    ];

    for (caller, expected) in cases {
        let kinds = [
            app.add_table(caller, NewTable::new(8, 2, area_id.clone()))
                .await
                .map(|_| ())
                .unwrap_err()
                .kind(),
            app.edit_table(caller, &table.id, update.clone())
                .await
                .map(|_| ())
                .unwrap_err()
                .kind(),
            app.delete_table(caller, &table.id).await.unwrap_err().kind(),
            app.toggle_table_reservation(caller, &table.id, true)
                .await
                .map(|_| ())
                .unwrap_err()
                .kind(),
            app.add_order_to_table(caller, order.clone())
                .await
                .map(|_| ())
                .unwrap_err()
                .kind(),
            app.move_position_table(caller, 7, Position::new(1.0, 1.0))
                .await
                .map(|_| ())
                .unwrap_err()
                .kind(),
        ];
        assert!(kinds.iter().all(|kind| *kind == expected), "{:?}", kinds);
    }

    // Manager is outside the admin-only operations
    for kind in [
        app.edit_table(Some(&manager), &table.id, update.clone())
            .await
            .map(|_| ())
            .unwrap_err()
            .kind(),
        app.delete_table(Some(&manager), &table.id).await.unwrap_err().kind(),
        app.toggle_table_reservation(Some(&manager), &table.id, true)
            .await
            .map(|_| ())
            .unwrap_err()
            .kind(),
    ] {
        assert_eq!(kind, CoreErrorKind::Forbidden);
    }

    let unchanged = app
        .get_table(Some(&admin()), &table.id)
        .await?
        .expect("table exists");
    assert_eq!(unchanged, table);
    assert_eq!(tables::Entity::find().count(app.db()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn non_finite_positions_are_rejected_without_writing() -> Result<()> {
    let (app, _temp_file) = setup_app().await?;
    let area_id = seed_area(app.db(), "Main").await?;
    let table = seed_table(&app, 7, &area_id).await?;

    let err = app
        .move_position_table(Some(&admin()), 7, Position::new(f64::NAN, 20.0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Validation);

    let update = TableUpdate {
        position: Some(Some(Position::new(1.0, f64::INFINITY))),
        ..Default::default()
    };
    let err = app
        .edit_table(Some(&admin()), &table.id, update)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Validation);

    let mut input = NewTable::new(8, 2, area_id);
    input.position = Some(Position::new(f64::NEG_INFINITY, 0.0));
    let err = app.add_table(Some(&admin()), input).await.unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Validation);

    let unchanged = app
        .get_table(Some(&admin()), &table.id)
        .await?
        .expect("table exists");
    assert_eq!(unchanged, table);
    assert_eq!(tables::Entity::find().count(app.db()).await?, 1);
    Ok(())
}
