pub mod fakes;
pub mod fixtures;
pub mod postgres;

pub use fakes::{FakeGeocoder, FakeMusicService, Reply};
pub use fixtures::*;
