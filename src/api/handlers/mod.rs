pub mod health;
pub use self::health::health;

pub mod root;
pub use self::root::root;

pub mod signup;
pub use self::signup::signup;

pub mod signin;
pub use self::signin::signin;

pub(crate) mod error;
pub mod types;

#[cfg(test)]
mod tests;
