mod mode;
mod question;
mod table;

pub use mode::{Mode, ResponseKind};
pub use question::{OptionLabel, Question, QuizOption};
pub use table::TableModel;

/// Which screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Compose,
    Response,
    History,
}
