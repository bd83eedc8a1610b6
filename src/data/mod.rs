//! Passenger data: lenient CSV loading, row repair and stratified splitting

pub mod load;
pub mod repair;
pub mod row;
pub mod split;

pub use load::{missing_pct, parse_csv, parse_field, read_csv, RawTable};
pub use repair::{looks_shifted, repair, repair_all};
pub use row::{col, normalize_row, Row, Value};
pub use split::{stratified_split, val_count, SplitResult};
