pub mod cache;
pub mod filter;
pub mod form;
pub mod model_select;
pub mod pagination;
pub mod query;
pub mod traits;
pub mod types;

pub use cache::ResponseCache;
pub use filter::{reduce, Choice, FilterAction, FilterState};
pub use form::SearchForm;
pub use model_select::{MakeChange, ModelSelector};
pub use pagination::Pagination;
pub use query::{get_as_string, QueryParams, QueryValue};
pub use traits::ModelSource;
