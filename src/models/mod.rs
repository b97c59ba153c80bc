pub mod question;

pub use question::{OptionLabel, QuestionRecord};
