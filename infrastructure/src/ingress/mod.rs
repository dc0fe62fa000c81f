//! Ingress worker pool between the transport and the dispatcher.

mod pool;

pub use pool::{Delivery, IngressError, IngressHandle, IngressOptions, IngressPool};
