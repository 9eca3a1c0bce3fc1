//! UI Components
//!
//! Leptos components of the to-do page.

mod error_banner;
mod task_form;
mod task_list;
mod task_row;
mod toast_stack;

pub use error_banner::ErrorBanner;
pub use task_form::TaskForm;
pub use task_list::TaskList;
pub use task_row::TaskRow;
pub use toast_stack::ToastStack;
