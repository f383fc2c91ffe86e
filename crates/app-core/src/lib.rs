pub mod constants;
pub mod hold;
pub mod motion;
pub mod pick;
pub mod scene;
pub mod session;

pub use constants::*;
pub use hold::{HoldHandle, HoldSlot};
pub use pick::find_nearest;
pub use scene::{figure_local_position, Entity, EntityId, SceneEntities};
pub use session::{InteractionSession, Mode, NullStatus, PoseSource, StatusSink};
