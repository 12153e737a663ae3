pub mod locker_viewmodel;
pub mod route_viewmodel;

pub use locker_viewmodel::{LockerViewModel, ScanAllReport};
pub use route_viewmodel::{RouteAction, RouteViewModel};
