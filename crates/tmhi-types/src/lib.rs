pub mod reading;
pub mod signal;

pub use reading::Reading;
pub use signal::{FiveGSignal, GatewayResponse, GenericSignal, SignalInfo};
