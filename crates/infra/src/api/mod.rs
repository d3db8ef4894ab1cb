//! Remote time-tracking API adapter

mod client;
mod dto;

pub use client::{RemoteClient, RemoteClientConfig};
