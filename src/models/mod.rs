pub mod location;
pub mod package;
pub mod route;

pub use location::{Postmat, Warehouse};
pub use package::{is_package_completed, CargoItem, PackageInfo, PackageRef, ScanAction};
pub use route::{Route, RouteStatus, RouteStop, RouteType};
