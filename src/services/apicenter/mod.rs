//! Microsoft.ApiCenter

pub mod v2024_03_01;
