// Core Layer
pub mod actions;
pub mod drag_drop;

pub use drag_drop::{
    BatchUpdate, DragPayload, DropIntent, DualListDragController, ListId,
};
