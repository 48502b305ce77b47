#![deny(missing_docs)]
//! Collaborators around the assigner: simulated tables, rendering, exports.

mod export;
mod render;
mod simulate;

pub use export::{from_json_slice, to_canonical_json_bytes, to_csv_bytes, write_bytes};
pub use render::{render_html, render_text, ColorMap};
pub use simulate::{
    n_different_users, random_users, same_user_n_times, AssignmentRow, AssignmentTable,
    LabelCount, Summary, FIXED_USER, RANDOM_ID_SPACE,
};
