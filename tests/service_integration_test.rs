//! End-to-end scenario over the public API: seed the canonical data set,
//! exercise CRUD, the denormalized join and the live event feed the way an
//! external request-handling layer would.

use std::sync::Arc;

use chrono::Local;
use futures::StreamExt;
use futures::TryStreamExt;
use r_engine::init_department_store;
use r_engine::init_record_db;
use r_engine::init_user_store;
use r_engine::AsyncStore;
use r_engine::CappedFeed;
use r_engine::CappedUser;
use r_engine::Department;
use r_engine::Error;
use r_engine::Salary;
use r_engine::SledStore;
use r_engine::User;
use r_engine::UserService;

struct TestEngine {
    service: UserService<SledStore<User>, SledStore<Department>>,
    user_store: Arc<SledStore<User>>,
    department_store: Arc<SledStore<Department>>,
    feed: Arc<CappedFeed>,
    _temp_dir: tempfile::TempDir,
}

fn start_engine(feed_capacity: usize) -> TestEngine {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db = init_record_db(temp_dir.path(), 10 * 1024 * 1024, 3).expect("should open db");

    let user_store = Arc::new(init_user_store(&db).expect("should open tree"));
    let department_store = Arc::new(init_department_store(&db).expect("should open tree"));
    let feed = Arc::new(CappedFeed::open(&db, feed_capacity).expect("should open feed"));

    TestEngine {
        service: UserService::new(user_store.clone(), department_store.clone(), feed.clone()),
        user_store,
        department_store,
        feed,
        _temp_dir: temp_dir,
    }
}

fn seed_users() -> Vec<User> {
    let today = Local::now().date_naive();
    [
        ("Suman Das", 30, "10000.00", "suman.das@abc.com"),
        ("Arjun Das", 55, "20000.00", "Arjun.Das@abc.com"),
        ("Saurabh Ganguly", 40, "25000.00", "Saurabh.Ganguly@abc.com"),
    ]
    .into_iter()
    .map(|(name, age, salary, email)| User {
        id: None,
        name: name.to_string(),
        age,
        salary: salary.parse().expect("should parse seed salary"),
        email: email.to_string(),
        insert_date: today,
        department_id: None,
    })
    .collect()
}

fn seed_departments() -> Vec<Department> {
    vec![
        Department::new("Mechanical", 1, "Mumbai"),
        Department::new("Computer", 2, "Bangalore"),
    ]
}

fn valid_draft() -> User {
    User {
        id: None,
        name: "Rahul-Dravid".to_string(),
        age: 45,
        salary: Salary::from_cents(555_555_500),
        email: "rahul.dravid@abc.com".to_string(),
        insert_date: Local::now().date_naive(),
        department_id: None,
    }
}

/// Seeded walk-through: three users, counted listings, the age filter,
/// and an absent id resolving empty.
#[tokio::test]
async fn test_seeded_listing_scenario() {
    let engine = start_engine(20);
    engine
        .service
        .seed(seed_users(), seed_departments())
        .await
        .expect("should seed");

    let all: Vec<User> = engine
        .service
        .list_users()
        .try_collect()
        .await
        .expect("should scan");
    assert_eq!(3, all.len());
    assert!(all.iter().all(|u| u.id.is_some()));

    let thirty: Vec<User> = engine
        .service
        .list_users_by_age(30)
        .try_collect()
        .await
        .expect("should scan");
    assert_eq!(1, thirty.len());
    assert_eq!("Suman Das", thirty[0].name);

    let missing = engine.service.get_user("no-such-id").await.expect("should not fail");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_crud_round_trip() {
    let engine = start_engine(20);

    let created = engine
        .service
        .create_user(valid_draft())
        .await
        .expect("should create");
    let id = created.id.clone().expect("identity should be assigned");

    let fetched = engine.service.get_user(&id).await.expect("should read");
    assert_eq!(Some(created), fetched);

    let mut replacement = valid_draft();
    replacement.age = 46;
    let updated = engine
        .service
        .update_user(&id, replacement)
        .await
        .expect("should update")
        .expect("id exists");
    assert_eq!(Some(id.clone()), updated.id);
    assert_eq!(46, updated.age);

    // update of an unknown id resolves empty, mapping to a client error
    let absent = engine
        .service
        .update_user("no-such-id", valid_draft())
        .await
        .expect("should not fail");
    assert!(absent.is_none());

    // delete resolves present once, then keeps resolving empty
    assert!(engine.service.delete_user(&id).await.expect("should delete").is_some());
    assert!(engine.service.delete_user(&id).await.expect("should not fail").is_none());
}

#[tokio::test]
async fn test_validation_rejected_at_the_boundary() {
    let engine = start_engine(20);

    let mut bad = valid_draft();
    bad.name = "Rahul Dravid".to_string(); // spaces are not allowed
    let err = engine.service.create_user(bad).await.expect_err("should reject");
    assert!(matches!(err, Error::Validation(_)));

    let all: Vec<User> = engine
        .service
        .list_users()
        .try_collect()
        .await
        .expect("should scan");
    assert!(all.is_empty(), "rejected drafts must never reach the store");
}

#[tokio::test]
async fn test_department_join_views() {
    let engine = start_engine(20);
    engine
        .service
        .seed(seed_users(), seed_departments())
        .await
        .expect("should seed");

    let users: Vec<User> = engine
        .service
        .list_users()
        .try_collect()
        .await
        .expect("should scan");
    let departments: Vec<Department> = engine
        .department_store
        .find_all()
        .try_collect()
        .await
        .expect("should scan");

    // link one user to a real department, one to a dangling reference
    let linked_id = users[0].id.clone().expect("should have id");
    let mut linked = users[0].clone();
    linked.department_id = departments[0].id.clone();
    engine
        .user_store
        .update(&linked_id, linked)
        .await
        .expect("should update");

    let dangling_id = users[1].id.clone().expect("should have id");
    let mut dangling = users[1].clone();
    dangling.department_id = Some("gone".to_string());
    engine
        .user_store
        .update(&dangling_id, dangling)
        .await
        .expect("should update");

    let view = engine
        .service
        .get_user_department_view(&linked_id)
        .await
        .expect("should join")
        .expect("view should be produced");
    assert_eq!(departments[0].id, view.department_id);
    assert_eq!(Some(departments[0].name.clone()), view.department_name);
    assert_eq!(Some(departments[0].location.clone()), view.location);

    let sentinel_view = engine
        .service
        .get_user_department_view(&dangling_id)
        .await
        .expect("should join")
        .expect("view should be produced");
    assert!(sentinel_view.department_id.is_none());
    assert!(sentinel_view.department_name.is_none());
    assert!(sentinel_view.location.is_none());

    let absent = engine
        .service
        .get_user_department_view("no-such-id")
        .await
        .expect("should not fail");
    assert!(absent.is_none());
}

/// Mirrors the original streaming demo: subscribe, publish five events,
/// observe exactly those five in order.
#[tokio::test]
async fn test_event_feed_stream() {
    let engine = start_engine(20);

    // history inserted before the subscription must never replay
    engine
        .service
        .publish_user_event(CappedUser::new("Backlog-User", 20, Salary::from_cents(100_000)))
        .await
        .expect("should publish");

    let tail = engine.service.subscribe_user_events();

    for i in 0..5 {
        engine
            .service
            .publish_user_event(CappedUser::new(
                format!("Stream-User-{}", i),
                20,
                Salary::from_cents(100_000),
            ))
            .await
            .expect("should publish");
    }

    let received: Vec<CappedUser> = tail
        .take(5)
        .map(|item| item.expect("should be a record"))
        .collect()
        .await;
    let names: Vec<&str> = received.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        vec![
            "Stream-User-0",
            "Stream-User-1",
            "Stream-User-2",
            "Stream-User-3",
            "Stream-User-4"
        ],
        names
    );
}

/// Feed capacity bound observed end-to-end over the engine handle.
#[tokio::test]
async fn test_event_feed_eviction_bound() {
    let engine = start_engine(3);

    for i in 0..10 {
        engine
            .service
            .publish_user_event(CappedUser::new(
                format!("Stream-User-{}", i),
                20,
                Salary::from_cents(100_000),
            ))
            .await
            .expect("should publish");
    }

    let retained = engine.feed.scan().expect("should scan");
    assert_eq!(3, retained.len());
    let names: Vec<&str> = retained.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(vec!["Stream-User-7", "Stream-User-8", "Stream-User-9"], names);
}
