//! Planning domain models.
//!
//! Data types for duration estimation and capacity-aware slot
//! planning. Category-agnostic within production planning: the
//! built-in stage tables cover the original medium-voltage cell
//! deployment, but any category string with its own [`StageTable`]
//! works.
//!
//! # Domain Mappings
//!
//! | leadtime | Switchgear plant | Generic manufacturing |
//! |----------|-----------------|----------------------|
//! | Category | Cell type (RM 36 CB, RMU) | Product family |
//! | TrainingRecord | Completed order | Historical job |
//! | ScheduleEntry | Order on the production calendar | Booked job |
//! | Stage | Design/assembly/test phase | Routing step |

mod history;
mod request;
mod schedule;
mod stages;

pub use history::{HistoryError, TrainingRecord};
pub use request::PredictionRequest;
pub use schedule::{
    DateSpan, IntervalError, ScheduleConflict, ScheduleEntry, ScheduleSuggestion, StageInterval,
};
pub use stages::{Stage, StageCatalog, StageTable};
