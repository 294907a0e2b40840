mod message_query;
mod message_record;

pub use message_query::{MessageQuery, SearchQuery};
pub use message_record::MessageRecord;
