//! Domain model (ids, task record, notices, errors).

pub mod errors;
pub mod ids;
pub mod notice;
pub mod task;

pub use self::errors::{LoadError, SaveError, ValidationError};
pub use self::ids::TaskId;
pub use self::notice::Notice;
pub use self::task::Task;
