pub mod app;
pub mod clock;
pub mod commit;
pub mod countdown;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod presenter;
pub mod state;
pub mod storage;
pub mod ticker;
pub mod ui;

pub use app::router;
pub use clock::SystemClock;
pub use state::AppState;
pub use storage::{KvStore, resolve_data_path};
