//! Main menu and chart menu choices.

use crate::charts::ChartKind;

pub const MAIN_MENU: &str = "
==============================================
      Climate Observatory (2015 to 2025)
==============================================
1. Load data
2. View data sample
3. Search information by country
4. General statistics
5. View charts
6. Save analysed results
7. Exit program
";

/// Top-level actions, selected by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    LoadData,
    ViewSample,
    SearchCountry,
    Statistics,
    Charts,
    SaveReport,
    Exit,
}

impl MenuAction {
    /// Parse a main-menu answer; surrounding blanks are ignored.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(MenuAction::LoadData),
            "2" => Some(MenuAction::ViewSample),
            "3" => Some(MenuAction::SearchCountry),
            "4" => Some(MenuAction::Statistics),
            "5" => Some(MenuAction::Charts),
            "6" => Some(MenuAction::SaveReport),
            "7" => Some(MenuAction::Exit),
            _ => None,
        }
    }

    /// Actions that only make sense once a dataset is loaded.
    pub fn needs_dataset(&self) -> bool {
        !matches!(self, MenuAction::LoadData | MenuAction::Exit)
    }
}

/// Chart submenu text, numbered in [`ChartKind::ALL`] order.
pub fn chart_menu() -> String {
    let mut text = String::from("\n   ---- Which chart would you like to view? ----\n");
    for (i, kind) in ChartKind::ALL.iter().enumerate() {
        text.push_str(&format!("   {}. {}\n", i + 1, kind.label()));
    }
    text
}

/// Parse a chart-menu answer.
pub fn chart_from_choice(choice: &str) -> Option<ChartKind> {
    let index: usize = choice.trim().parse().ok()?;
    ChartKind::ALL.get(index.checked_sub(1)?).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_menu_choices() {
        assert_eq!(MenuAction::from_choice("1"), Some(MenuAction::LoadData));
        assert_eq!(MenuAction::from_choice(" 7 "), Some(MenuAction::Exit));
        assert_eq!(MenuAction::from_choice("8"), None);
        assert_eq!(MenuAction::from_choice("abc"), None);
        assert!(!MenuAction::LoadData.needs_dataset());
        assert!(MenuAction::SaveReport.needs_dataset());
    }

    #[test]
    fn chart_choices_follow_menu_order() {
        assert_eq!(chart_from_choice("1"), Some(ChartKind::TemperatureTrend));
        assert_eq!(chart_from_choice("2"), Some(ChartKind::AirQualityTrend));
        assert_eq!(chart_from_choice("7"), Some(ChartKind::FoodSecurity));
        assert_eq!(chart_from_choice("0"), None);
        assert_eq!(chart_from_choice("8"), None);
        assert_eq!(chart_from_choice(""), None);
        assert!(chart_menu().contains("4. Temperature heatmap by region and year"));
    }
}
