//! Microsoft.Resources and Microsoft.Authorization

pub mod v2020_05_01;
pub mod v2022_09_01;
