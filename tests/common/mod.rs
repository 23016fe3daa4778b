mod helpers;

pub use helpers::*;
pub use test_app::{Recorded, TestApp, TestAppBuilder};
