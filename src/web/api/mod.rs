pub mod error;
pub mod partners;
pub mod positions;
pub mod satellites;
