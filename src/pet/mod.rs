//! Virtual pet core: item catalog, pet entity, timed activities and
//! notification delivery. The console shell and any other front end only talk
//! to the types re-exported here.

pub mod activity;
pub mod art;
pub mod catalog;
pub mod entity;
pub mod errors;
pub mod notify;
pub mod types;

pub use activity::{
    ActivityOutcome, BlockingSuspender, CancelHandle, InstantSuspender, Suspend, TimedOperation,
    TokioSuspender,
};
pub use art::art_for;
pub use catalog::{all_items, find_item, items_for, ItemFilter};
pub use entity::{FreeRoamPlan, Pet};
pub use errors::{ActivityError, PetError};
pub use notify::{ChannelSink, Notification, NotificationSink, Notifier, RecordingSink};
pub use types::*;
