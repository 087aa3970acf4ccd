use std::sync::Arc;

use chrono::Local;
use chrono::NaiveDate;
use futures::StreamExt;
use r_engine::init_department_store;
use r_engine::init_record_db;
use r_engine::init_user_store;
use r_engine::CappedFeed;
use r_engine::Department;
use r_engine::Error;
use r_engine::Result;
use r_engine::Salary;
use r_engine::Settings;
use r_engine::User;
use r_engine::UserService;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    let settings = Settings::load(None)?;

    // Initializing Logs
    init_observability();

    // Open the embedded store
    let db = init_record_db(
        &settings.storage.db_root_dir,
        settings.storage.cache_capacity_bytes,
        settings.storage.flush_every_ms,
    )?;
    let user_store = Arc::new(init_user_store(&db)?);
    let department_store = Arc::new(init_department_store(&db)?);
    let feed = Arc::new(CappedFeed::open(&db, settings.feed.capacity)?);

    let service = UserService::new(user_store.clone(), department_store.clone(), feed);

    // Initial data setup
    service.seed(get_data(), get_departments()).await?;
    demo_join(&service, &user_store, &department_store).await?;

    // Tail the live event feed until shutdown
    let mut tail = service.subscribe_user_events();
    info!("Engine started. Waiting for CTRL+C signal...");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("CTRL+C detected.");
                break;
            },
            item = tail.next() => match item {
                Some(Ok(event)) => info!("User event: {:?}", event),
                Some(Err(e)) => {
                    error!("event feed ended: {:?}", e);
                    break;
                },
                None => break,
            },
        }
    }

    println!("Exiting program.");
    Ok(())
}

/// Points the first seeded user at the first seeded department and logs
/// the resulting denormalized view.
async fn demo_join<US, DS>(
    service: &UserService<US, DS>,
    user_store: &Arc<US>,
    department_store: &Arc<DS>,
) -> Result<()>
where
    US: r_engine::AsyncStore<User>,
    DS: r_engine::AsyncStore<Department>,
{
    let mut users = service.list_users();
    let first_user = match users.next().await {
        Some(user) => user?,
        None => return Ok(()),
    };
    let user_id = first_user
        .id
        .clone()
        .ok_or_else(|| Error::Fatal("seeded user lost its identity".to_string()))?;

    let mut departments = department_store.find_all();
    let first_department = match departments.next().await {
        Some(department) => department?,
        None => return Ok(()),
    };

    // seeded records bypass the boundary the same way the seed itself does
    let mut linked = first_user;
    linked.department_id = first_department.id;
    user_store.update(&user_id, linked).await?;

    if let Some(view) = service.get_user_department_view(&user_id).await? {
        info!("User department view: {:?}", view);
    }
    Ok(())
}

fn get_data() -> Vec<User> {
    vec![
        user("Suman Das", 30, "10000.00", "suman.das@abc.com", Local::now().date_naive()),
        user("Arjun Das", 55, "20000.00", "Arjun.Das@abc.com", future_date()),
        user(
            "Saurabh Ganguly",
            40,
            "25000.00",
            "Saurabh.Ganguly@abc.com",
            future_date(),
        ),
    ]
}

fn get_departments() -> Vec<Department> {
    vec![
        Department::new("Mechanical", 1, "Mumbai"),
        Department::new("Computer", 2, "Bangalore"),
    ]
}

fn user(
    name: &str,
    age: u32,
    salary: &str,
    email: &str,
    insert_date: NaiveDate,
) -> User {
    User {
        id: None,
        name: name.to_string(),
        age,
        salary: salary.parse().unwrap_or(Salary::from_cents(100_000)),
        email: email.to_string(),
        insert_date,
        department_id: None,
    }
}

fn future_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2029, 10, 29).unwrap_or_else(|| Local::now().date_naive())
}

fn init_observability() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
