// ── Interactive menu actions ──
//
// The numbered actions of the interactive harness. Each key selects
// exactly one action.

use strum::{Display, EnumIter, IntoEnumIterator};

/// One entry of the numbered harness menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MenuAction {
    #[strum(to_string = "Add CMTS 1")]
    AddCmts1,
    #[strum(to_string = "Add CMTS 2")]
    AddCmts2,
    #[strum(to_string = "Add Flow 1 CMTS 1")]
    AddFlow1,
    #[strum(to_string = "Add Flow 2 CMTS 2")]
    AddFlow2,
    #[strum(to_string = "Remove Flow 1 CMTS 1")]
    RemoveFlow1,
    #[strum(to_string = "Remove Flow 2 CMTS 2")]
    RemoveFlow2,
    #[strum(to_string = "Remove All Flows")]
    RemoveAllFlows,
    #[strum(to_string = "List Flow Stats")]
    ListFlowStats,
    #[strum(to_string = "List Topology")]
    ListTopology,
    #[strum(to_string = "List Flows")]
    ListFlows,
    #[strum(to_string = "Remove CMTS 2")]
    RemoveCmts2,
    #[strum(to_string = "Remove CMTS 1")]
    RemoveCmts1,
    #[strum(to_string = "Print JSON")]
    PrintJson,
    #[strum(to_string = "Quit")]
    Quit,
}

impl MenuAction {
    /// The key typed to select this action.
    pub fn key(self) -> &'static str {
        match self {
            Self::AddCmts1 => "1",
            Self::AddCmts2 => "2",
            Self::AddFlow1 => "3",
            Self::AddFlow2 => "4",
            Self::RemoveFlow1 => "5",
            Self::RemoveFlow2 => "6",
            Self::RemoveAllFlows => "7",
            Self::ListFlowStats => "8",
            Self::ListTopology => "9",
            Self::ListFlows => "10",
            Self::RemoveCmts2 => "11",
            Self::RemoveCmts1 => "12",
            Self::PrintJson => "13",
            Self::Quit => "q",
        }
    }

    /// Look up the action for a line of input. `quit` is accepted as well
    /// as `q`.
    pub fn from_key(input: &str) -> Option<Self> {
        let input = input.trim();
        if input == "quit" {
            return Some(Self::Quit);
        }
        Self::iter().find(|a| a.key() == input)
    }

    /// Whether the action issues requests to the controller.
    pub fn needs_controller(self) -> bool {
        !matches!(self, Self::PrintJson | Self::Quit)
    }
}

/// The menu as `(key, label)` pairs, in display order.
pub fn entries() -> impl Iterator<Item = (&'static str, MenuAction)> {
    MenuAction::iter().map(|a| (a.key(), a))
}
