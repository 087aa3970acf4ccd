// -
// Database namespaces

/// Sled database tree namespaces
pub(crate) const USER_TREE: &str = "_users_tree";
pub(crate) const DEPARTMENT_TREE: &str = "_departments_tree";
pub(crate) const USER_EVENTS_TREE: &str = "_user_events_tree";

/// Default maximum number of records held by the capped user event feed
pub(crate) const DEFAULT_FEED_CAPACITY: usize = 20;

/// Default on-disk location of the embedded database
pub(crate) const DEFAULT_DB_ROOT_DIR: &str = "./data";
