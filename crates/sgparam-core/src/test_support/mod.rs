mod logs;
mod models;

pub(crate) use logs::capture_logs;
pub(crate) use models::{GaussianKernel, Machine, Node, factory};
