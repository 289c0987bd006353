//! Client for Github's v4 GraphQL API
//! https://developer.github.com/v4/

pub mod client;

pub use client::{Client, RateLimit};
