pub mod use_courier_route;

pub use use_courier_route::{use_courier_route, CourierRouteState, UseCourierRouteHandle};
