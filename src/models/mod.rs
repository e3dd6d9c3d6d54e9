pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, Task, TaskId, TaskList, UpdateTaskRequest};
pub use user::{User, UserProfile};
