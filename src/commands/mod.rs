pub mod dedup;
pub mod nodes;
pub mod report;
pub mod run;
