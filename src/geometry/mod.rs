pub mod airfoil;
pub mod planform;
pub mod station;

pub use airfoil::Airfoil;
pub use planform::Planform;
pub use station::{BreakPoints, Station, BREAKS};
