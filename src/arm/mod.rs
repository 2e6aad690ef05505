//! ARM request pipeline
//!
//! This module provides authentication, the HTTP client and the shared
//! request, paging and polling machinery every generated client uses.

pub mod auth;
pub mod client;
pub mod http;
pub mod pager;
pub mod poller;
pub mod registration;
pub mod request;

pub use client::{ArmClient, ClientOptions};
pub use pager::{list_complete, CompleteResult, Page};
pub use poller::Poller;
pub use request::{Operation, RawResponse, RequestOptions, Response};
