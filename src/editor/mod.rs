//! Interactive editors
//!
//! [`BBoxDrawer`] is immediate-mode: it produces a fresh display list per
//! frame. The other editors keep retained shapes on a shared [`Surface`].
//!
//! [`Surface`]: crate::render::Surface

pub mod arrow;
pub mod bbox_drawer;
pub mod circle_object;
pub mod drag;
pub mod fixed_box;
pub mod label;
pub mod zorder;

pub use arrow::Arrow;
pub use bbox_drawer::BBoxDrawer;
pub use circle_object::CircleObject;
pub use drag::{DragManager, classify_hit};
pub use fixed_box::FixedBox;
pub use label::{LabelBox, LabelPlacement};
pub use zorder::ZOrderRegistry;
