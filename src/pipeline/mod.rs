pub mod baseline;
pub mod history;
pub mod predict;
