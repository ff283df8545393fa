pub mod load;
pub mod preview;
pub mod queries;
pub mod report;
pub mod run;
