mod make_box;
mod make_sphere;
mod make_tip;
mod make_wake;
mod make_wing;

pub use make_box::MakeBox;
pub use make_sphere::MakeSphere;
pub use make_tip::MakeTip;
pub use make_wake::MakeWake;
pub use make_wing::MakeWing;
