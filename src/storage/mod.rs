mod async_store;
mod sled_adapter;


use std::path::Path;

#[doc(hidden)]
pub use async_store::*;
#[doc(hidden)]
pub use sled_adapter::*;
use tracing::debug;
use tracing::warn;

use crate::constants::DEPARTMENT_TREE;
use crate::constants::USER_TREE;
use crate::Department;
use crate::Result;
use crate::User;

/// Opens the embedded record database at `db_root_path`.
///
/// All record trees (users, departments, user events) live inside this one
/// database; the individual stores open their own tree namespace.
pub fn init_record_db(
    db_root_path: impl AsRef<Path> + std::fmt::Debug,
    cache_capacity_bytes: u64,
    flush_every_ms: u64,
) -> std::result::Result<sled::Db, std::io::Error> {
    debug!("init_record_db from path: {:?}", &db_root_path);

    let db_path = db_root_path.as_ref().join("records");

    sled::Config::default()
        .path(&db_path)
        .cache_capacity(cache_capacity_bytes)
        .flush_every_ms(Some(flush_every_ms))
        .use_compression(true)
        .compression_factor(1)
        .open()
        .map_err(|e| {
            warn!(
                "Try to open DB at this location: {:?} and failed: {:?}",
                db_path, e
            );
            std::io::Error::other(e)
        })
}

/// user records storage
pub fn init_user_store(db: &sled::Db) -> Result<SledStore<User>> {
    SledStore::new(db, USER_TREE)
}

/// department records storage
pub fn init_department_store(db: &sled::Db) -> Result<SledStore<Department>> {
    SledStore::new(db, DEPARTMENT_TREE)
}
