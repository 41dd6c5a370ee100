// Squad construction: global allocation and the slot-major preview.

pub mod allocator;
pub mod simulation;

pub use allocator::{
    assign, assign_with_exclusions, AssignedPlayer, AssignmentPolicy, SlotAssignment, SlotRequest,
};
pub use simulation::simulate;
