//! Универсальный конвейер списков: поиск, фильтры, диапазон, сортировка,
//! пагинация и изменение коллекции.
//!
//! Конвейер - набор явных функций, которые страница вызывает заново после
//! каждого изменения состояния (см. `refresh_view` на страницах списков).

pub mod entity;
pub mod entity_config;
pub mod error;
mod mutation;
pub mod pipeline;
pub mod query;

pub use entity::{new_token_id, next_numeric_id, ListEntity};
pub use entity_config::{compare_text, EntityConfig, Facet, RangeField, RequiredField, SearchField, SortSpec};
pub use error::ListError;
pub use pipeline::{paginate, FacetCount, ListPage, ListPipeline};
pub use query::{NumericRange, QueryState, DEFAULT_PAGE_SIZE};
