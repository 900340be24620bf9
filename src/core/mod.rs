pub mod admin;
pub mod calculator;
pub mod lifecycle;
pub mod logview;
pub mod reconciler;
