mod controller;
mod guard;
mod view;

pub use controller::{SearchController, SearchOptions};
pub use guard::RaceGuard;
pub use view::{FilterView, SearchPhase, SearchView};
