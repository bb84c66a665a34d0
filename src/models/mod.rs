pub mod device;
pub mod message;
pub mod suggestion;
pub mod workout;

pub use device::{AppConnection, ConnectionStatus, Device, DeviceKind};
pub use message::Message;
pub use suggestion::{UnknownCategory, WorkoutCategory, WorkoutSuggestion};
pub use workout::{Exercise, Intensity, WorkoutDay, WorkoutSnapshot};
