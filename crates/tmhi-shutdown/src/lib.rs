pub mod coordinator;
pub mod signal;

pub use coordinator::{DrainOutcome, ShutdownCoordinator, ShutdownCoordinatorBuilder, DEFAULT_GRACE_PERIOD};
pub use signal::{ShutdownListener, ShutdownSignal, SignalHandler};
