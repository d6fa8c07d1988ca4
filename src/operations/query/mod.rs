mod break_points;
mod is_valid;

pub use break_points::{LocateBreakPoints, LocateTipBreakPoints, SEP_AFT, SEP_FWD};
pub use is_valid::IsValid;
