pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::SheetsClient;
pub use error::{ClientError, FetchError, FetchErrorKind, SubmissionError};
pub use normalize::{coerce_price, is_truthy_flag, normalize_row};
pub use types::{SheetRow, ValueRange};
