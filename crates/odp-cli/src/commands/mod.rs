pub mod collect;
pub mod dispatch;
pub mod run;
pub mod schema;
pub mod summarize;
