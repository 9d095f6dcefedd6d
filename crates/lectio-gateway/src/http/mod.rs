pub mod catechism;
pub mod error;
pub mod health;
pub mod progress;
pub mod readings;

#[cfg(test)]
mod tests;
