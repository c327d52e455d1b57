use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Engine, EngineError, HousePatch, ItemPatch, MealPatch, NewItem, NewMeal, NewMealIngredient,
    NewPerson, NewPurchase, NewPurchaseLine, PersonPatch, PurchasePatch,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn person(name: &str, email: &str, house_id: i32) -> NewPerson {
    NewPerson {
        name: name.to_string(),
        email: email.to_string(),
        house_id,
    }
}

fn item(name: &str, count: i64, cost: f64, house_id: i32) -> NewItem {
    NewItem {
        item_name: name.to_string(),
        count,
        cost_per_ct: cost,
        house_id,
    }
}

#[tokio::test]
async fn house_crud_round_trip() {
    let (engine, _db) = engine_with_db().await;

    let house = engine.new_house("  Main St ").await.unwrap();
    assert_eq!(house.name, "Main St");
    assert_eq!(engine.houses().await.unwrap(), vec![house.clone()]);

    let renamed = engine
        .update_house(
            house.id,
            &HousePatch {
                name: Some("Elm St".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Elm St");

    let err = engine
        .update_house(house.id, &HousePatch::default())
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NoFieldsToUpdate);

    let err = engine.new_house("   ").await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn item_patch_touches_only_present_fields() {
    let (engine, _db) = engine_with_db().await;
    let house = engine.new_house("Main St").await.unwrap();
    let milk = engine
        .new_item(item("Milk", 2, 3.5, house.id))
        .await
        .unwrap();

    let updated = engine
        .update_item(
            milk.item_id,
            house.id,
            &ItemPatch {
                count: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.count, 5);
    assert_eq!(updated.item_name, "Milk");
    assert_eq!(updated.cost_per_ct, 3.5);

    let err = engine
        .update_item(milk.item_id, house.id, &ItemPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NoFieldsToUpdate);
}

#[tokio::test]
async fn item_count_adjustment_never_goes_negative() {
    let (engine, _db) = engine_with_db().await;
    let house = engine.new_house("Main St").await.unwrap();
    let eggs = engine
        .new_item(item("Eggs", 3, 0.25, house.id))
        .await
        .unwrap();

    let after = engine
        .adjust_item_count(eggs.item_id, house.id, -2)
        .await
        .unwrap();
    assert_eq!(after.count, 1);

    let err = engine
        .adjust_item_count(eggs.item_id, house.id, -2)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NegativeCount(-1));
    assert_eq!(engine.item(eggs.item_id, house.id).await.unwrap().count, 1);

    let err = engine
        .new_item(item("Flour", -1, 1.0, house.id))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn rows_are_invisible_from_another_house() {
    let (engine, _db) = engine_with_db().await;
    let a = engine.new_house("A").await.unwrap();
    let b = engine.new_house("B").await.unwrap();
    let bob = engine
        .new_person(person("Bob", "bob@example.com", a.id))
        .await
        .unwrap();
    let milk = engine.new_item(item("Milk", 1, 2.0, a.id)).await.unwrap();

    let err = engine.person(bob.id, b.id).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Person".to_string()));
    let err = engine.item(milk.item_id, b.id).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Item".to_string()));

    let err = engine
        .delete_item(milk.item_id, b.id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Item".to_string()));
    assert!(engine.item(milk.item_id, a.id).await.is_ok());

    assert!(engine.items(Some(b.id)).await.unwrap().is_empty());
    assert_eq!(engine.items(None).await.unwrap().len(), 1);
    assert!(engine.people_in_house(b.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn email_is_unique_across_houses() {
    let (engine, _db) = engine_with_db().await;
    let a = engine.new_house("A").await.unwrap();
    let b = engine.new_house("B").await.unwrap();
    let ann = engine
        .new_person(person("Ann", "ann@example.com", a.id))
        .await
        .unwrap();

    let err = engine
        .new_person(person("Other Ann", "ann@example.com", b.id))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::ExistingKey("Email already exists".to_string())
    );

    let cy = engine
        .new_person(person("Cy", "cy@example.com", b.id))
        .await
        .unwrap();
    let err = engine
        .update_person(
            cy.id,
            b.id,
            &PersonPatch {
                email: Some("ann@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::ExistingKey("Email already exists".to_string())
    );

    // Re-submitting one's own email is not a conflict.
    let same = engine
        .update_person(
            ann.id,
            a.id,
            &PersonPatch {
                name: Some("Annie".to_string()),
                email: Some("ann@example.com".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(same.name, "Annie");
}

#[tokio::test]
async fn purchase_total_uses_line_costs() {
    let (engine, _db) = engine_with_db().await;
    let house = engine.new_house("Main St").await.unwrap();
    let bob = engine
        .new_person(person("Bob", "bob@example.com", house.id))
        .await
        .unwrap();
    let milk = engine
        .new_item(item("Milk", 0, 2.0, house.id))
        .await
        .unwrap();
    let bread = engine
        .new_item(item("Bread", 0, 1.0, house.id))
        .await
        .unwrap();

    let purchase = engine
        .new_purchase(NewPurchase {
            house_id: house.id,
            buyer_id: bob.id,
            purchase_at: Some(date(2025, 3, 1)),
        })
        .await
        .unwrap();

    let line = engine
        .add_purchase_line(
            purchase.p_id,
            NewPurchaseLine {
                house_id: house.id,
                item_id: milk.item_id,
                quantity: 2,
                cost_per_ct: 1.5,
            },
        )
        .await
        .unwrap();
    assert_eq!(line.item_name.as_deref(), Some("Milk"));
    engine
        .add_purchase_line(
            purchase.p_id,
            NewPurchaseLine {
                house_id: house.id,
                item_id: bread.item_id,
                quantity: 1,
                cost_per_ct: 2.0,
            },
        )
        .await
        .unwrap();

    // Repricing the item afterwards does not rewrite the purchase.
    engine
        .update_item(
            milk.item_id,
            house.id,
            &ItemPatch {
                cost_per_ct: Some(9.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let detail = engine
        .purchase_detail(purchase.p_id, house.id)
        .await
        .unwrap();
    assert_eq!(detail.purchase.buyer_name.as_deref(), Some("Bob"));
    assert_eq!(detail.purchase.purchase_at, date(2025, 3, 1));
    assert_eq!(detail.lines.len(), 2);
    assert!((detail.total - 5.0).abs() < 1e-9);

    let bought = engine.person_purchases(bob.id, house.id).await.unwrap();
    assert_eq!(bought.len(), 1);
}

#[tokio::test]
async fn purchase_requires_buyer_in_same_house() {
    let (engine, _db) = engine_with_db().await;
    let a = engine.new_house("A").await.unwrap();
    let b = engine.new_house("B").await.unwrap();
    let bob = engine
        .new_person(person("Bob", "bob@example.com", a.id))
        .await
        .unwrap();

    let err = engine
        .new_purchase(NewPurchase {
            house_id: b.id,
            buyer_id: bob.id,
            purchase_at: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Person".to_string()));
    assert!(engine.purchases(Some(b.id)).await.unwrap().is_empty());

    let purchase = engine
        .new_purchase(NewPurchase {
            house_id: a.id,
            buyer_id: bob.id,
            purchase_at: None,
        })
        .await
        .unwrap();
    let err = engine
        .update_purchase(purchase.p_id, a.id, &PurchasePatch::default())
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NoFieldsToUpdate);
}

#[tokio::test]
async fn deleting_purchase_removes_its_lines() {
    let (engine, db) = engine_with_db().await;
    let house = engine.new_house("Main St").await.unwrap();
    let bob = engine
        .new_person(person("Bob", "bob@example.com", house.id))
        .await
        .unwrap();
    let milk = engine
        .new_item(item("Milk", 0, 2.0, house.id))
        .await
        .unwrap();
    let purchase = engine
        .new_purchase(NewPurchase {
            house_id: house.id,
            buyer_id: bob.id,
            purchase_at: None,
        })
        .await
        .unwrap();
    let line = engine
        .add_purchase_line(
            purchase.p_id,
            NewPurchaseLine {
                house_id: house.id,
                item_id: milk.item_id,
                quantity: 1,
                cost_per_ct: 2.0,
            },
        )
        .await
        .unwrap();

    engine
        .delete_purchase_line(line.pl_id, purchase.p_id)
        .await
        .unwrap();
    let err = engine
        .delete_purchase_line(line.pl_id, purchase.p_id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Purchase line".to_string()));

    engine
        .add_purchase_line(
            purchase.p_id,
            NewPurchaseLine {
                house_id: house.id,
                item_id: milk.item_id,
                quantity: 3,
                cost_per_ct: 2.0,
            },
        )
        .await
        .unwrap();
    engine.delete_purchase(purchase.p_id, house.id).await.unwrap();

    let rows = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT COUNT(*) AS n FROM purchase_line".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();
    let remaining: i64 = rows.try_get("", "n").unwrap();
    assert_eq!(remaining, 0);

    let err = engine
        .delete_purchase(purchase.p_id, house.id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Purchase".to_string()));
}

#[tokio::test]
async fn meal_cost_is_split_between_attendees() {
    let (engine, _db) = engine_with_db().await;
    let house = engine.new_house("Main St").await.unwrap();
    let ann = engine
        .new_person(person("Ann", "ann@example.com", house.id))
        .await
        .unwrap();
    let bob = engine
        .new_person(person("Bob", "bob@example.com", house.id))
        .await
        .unwrap();
    let pasta = engine
        .new_item(item("Pasta", 4, 1.0, house.id))
        .await
        .unwrap();
    let sauce = engine
        .new_item(item("Sauce", 2, 3.0, house.id))
        .await
        .unwrap();

    let meal = engine
        .new_meal(NewMeal {
            house_id: house.id,
            meal_name: "Pasta night".to_string(),
            made_on: Some(date(2025, 3, 2)),
        })
        .await
        .unwrap();

    let empty = engine.meal_detail(meal.meal_id, house.id).await.unwrap();
    assert_eq!(empty.cost.total_cost, 0.0);
    assert_eq!(empty.cost.cost_per_person, 0.0);

    for user in [&ann, &bob] {
        engine
            .add_meal_attendee(meal.meal_id, house.id, user.id)
            .await
            .unwrap();
    }
    engine
        .add_meal_ingredient(
            meal.meal_id,
            NewMealIngredient {
                house_id: house.id,
                item_id: pasta.item_id,
                quant_used: 2.0,
                cost_per_ct: 1.0,
            },
        )
        .await
        .unwrap();
    let ingredient = engine
        .add_meal_ingredient(
            meal.meal_id,
            NewMealIngredient {
                house_id: house.id,
                item_id: sauce.item_id,
                quant_used: 1.0,
                cost_per_ct: 3.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(ingredient.item_name.as_deref(), Some("Sauce"));

    let detail = engine.meal_detail(meal.meal_id, house.id).await.unwrap();
    assert_eq!(detail.attendees.len(), 2);
    assert_eq!(detail.ingredients.len(), 2);
    assert!((detail.cost.total_cost - 5.0).abs() < 1e-9);
    assert!((detail.cost.cost_per_person - 2.5).abs() < 1e-9);

    let meals = engine.person_meals(ann.id, house.id).await.unwrap();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].meal_name, "Pasta night");
}

#[tokio::test]
async fn meal_rejects_duplicate_attendee_and_ingredient() {
    let (engine, _db) = engine_with_db().await;
    let house = engine.new_house("Main St").await.unwrap();
    let ann = engine
        .new_person(person("Ann", "ann@example.com", house.id))
        .await
        .unwrap();
    let rice = engine
        .new_item(item("Rice", 1, 1.0, house.id))
        .await
        .unwrap();
    let meal = engine
        .new_meal(NewMeal {
            house_id: house.id,
            meal_name: "Curry".to_string(),
            made_on: None,
        })
        .await
        .unwrap();

    engine
        .add_meal_attendee(meal.meal_id, house.id, ann.id)
        .await
        .unwrap();
    let err = engine
        .add_meal_attendee(meal.meal_id, house.id, ann.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::ExistingKey("User already attending this meal".to_string())
    );

    let ingredient = NewMealIngredient {
        house_id: house.id,
        item_id: rice.item_id,
        quant_used: 0.5,
        cost_per_ct: 1.0,
    };
    engine
        .add_meal_ingredient(meal.meal_id, ingredient.clone())
        .await
        .unwrap();
    let err = engine
        .add_meal_ingredient(meal.meal_id, ingredient)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::ExistingKey("Item already used in this meal".to_string())
    );

    engine
        .remove_meal_attendee(meal.meal_id, house.id, ann.id)
        .await
        .unwrap();
    let err = engine
        .remove_meal_attendee(meal.meal_id, house.id, ann.id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Attendee".to_string()));

    engine
        .remove_meal_ingredient(meal.meal_id, house.id, rice.item_id)
        .await
        .unwrap();
    let err = engine
        .remove_meal_ingredient(meal.meal_id, house.id, rice.item_id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Ingredient".to_string()));
}

#[tokio::test]
async fn meal_update_and_cascade_delete() {
    let (engine, _db) = engine_with_db().await;
    let house = engine.new_house("Main St").await.unwrap();
    let ann = engine
        .new_person(person("Ann", "ann@example.com", house.id))
        .await
        .unwrap();
    let meal = engine
        .new_meal(NewMeal {
            house_id: house.id,
            meal_name: "Soup".to_string(),
            made_on: Some(date(2025, 1, 1)),
        })
        .await
        .unwrap();
    engine
        .add_meal_attendee(meal.meal_id, house.id, ann.id)
        .await
        .unwrap();

    let updated = engine
        .update_meal(
            meal.meal_id,
            house.id,
            &MealPatch {
                made_on: Some(date(2025, 1, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.meal_name, "Soup");
    assert_eq!(updated.made_on, date(2025, 1, 2));

    engine.delete_meal(meal.meal_id, house.id).await.unwrap();
    assert!(engine.person_meals(ann.id, house.id).await.unwrap().is_empty());
    let err = engine.delete_meal(meal.meal_id, house.id).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Meal".to_string()));
}

#[tokio::test]
async fn deleting_house_removes_scoped_rows() {
    let (engine, _db) = engine_with_db().await;
    let a = engine.new_house("A").await.unwrap();
    let b = engine.new_house("B").await.unwrap();
    engine
        .new_person(person("Ann", "ann@example.com", a.id))
        .await
        .unwrap();
    engine.new_item(item("Milk", 1, 1.0, a.id)).await.unwrap();
    engine.new_item(item("Tea", 1, 1.0, b.id)).await.unwrap();

    engine.delete_house(a.id).await.unwrap();

    assert_eq!(engine.houses().await.unwrap(), vec![b.clone()]);
    assert!(engine.people().await.unwrap().is_empty());
    assert_eq!(engine.items(None).await.unwrap().len(), 1);
    let err = engine.delete_house(a.id).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("House".to_string()));

    // The email is free again once its owner is gone.
    engine
        .new_person(person("Ann", "ann@example.com", b.id))
        .await
        .unwrap();
}

#[tokio::test]
async fn creating_in_missing_house_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .new_person(person("Ann", "ann@example.com", 42))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("House".to_string()));

    let err = engine
        .new_item(item("Milk", 1, 1.0, 42))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("House".to_string()));
}
