pub mod assembler;
pub mod gap_fill;
pub mod row_mapper;

pub use assembler::{
    assemble_response,
    DailyStatsAssembler,
};
pub use gap_fill::{
    fill_gaps,
    DailySequence,
};
pub use row_mapper::{
    map_row,
    parse_day,
};
