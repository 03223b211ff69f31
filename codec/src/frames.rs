mod delta;
mod full;

pub use self::{delta::*, full::*};
