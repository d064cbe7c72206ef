//! Common test utilities for checkout-gateway

pub mod fixtures;

pub use fake_runner::{FakeFactory, FakeRunner, FakeScript};
pub use fixtures::RequestFactory;

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
