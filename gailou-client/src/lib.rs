mod error;
pub use error::Error;

mod service;
pub use service::DataService;

mod session;
pub use session::{ArticleSession, HistoryOutcome, HistoryTicket, LoadOutcome, LoadTicket, Status};

mod tree;
pub use tree::{CommentRow, CommentTree, Row, Toggle};

pub mod api {
    pub use gailou_api::*;
}
