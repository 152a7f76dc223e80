mod controller;
mod view;

pub use controller::{DashboardSession, ViewId};
pub use view::{DashboardView, FilterToken, RefreshContext};
