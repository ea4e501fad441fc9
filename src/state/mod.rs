//! Application state: history, persistence and the session container.

mod history;
mod session;
mod store;

pub use history::{DEFAULT_HISTORY_LIMIT, History, HistoryEntry};
pub use session::{AnalyzeError, AnalyzeRequest, INVALID_EXPRESSION_MESSAGE, Session, Verdict};
pub use store::{PersistedState, StateStore, StoreError};
