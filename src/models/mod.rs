pub mod states;
pub mod dock;
pub mod booking;
pub mod filter;
pub mod clock_time;

pub use states::*;
pub use dock::*;
pub use booking::*;
pub use filter::*;
pub use clock_time::*;

use chrono::{Local, NaiveDateTime};

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
