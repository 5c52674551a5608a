//! Mail records and the normalization rules applied on every write.

mod model;
mod validation;

pub use model::{MailKind, MailRecord, MailStatus, NewRecord, RecordId, RecordPatch};
pub use validation::{ValidationError, normalize, parse_date, require_field, require_storable};
