//! Console module - interactive menu session

mod app;
mod io;
mod menu;

pub use app::{
    Session, SessionError, COUNTRY_NOT_FOUND, INVALID_CHART_OPTION, INVALID_OPTION,
    LOAD_DATA_FIRST, NOTHING_TO_SAVE,
};
pub use io::Console;
pub use menu::{chart_from_choice, chart_menu, MenuAction, MAIN_MENU};
