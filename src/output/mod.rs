pub mod formatter;

pub use formatter::{
    bar_cells, format_contact_gate, format_cta, format_disc_report, format_estimate, format_json,
    format_questions, format_wan, should_use_colors, text_bar,
};
