//! Action enum - All possible application actions
//!
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Regular tick for time-based updates (toast expiry)
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit the application
    Quit,

    // Home list navigation
    /// Move to the next person in the list
    NextPerson,
    /// Move to the previous person in the list
    PrevPerson,
    /// Jump to the first person
    FirstPerson,
    /// Jump to the last person
    LastPerson,

    // Page navigation
    /// Navigate to the home page
    NavigateHome,
    /// Navigate to the details page for a person id
    NavigateDetails(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::Quit => write!(f, "Quit"),
            Action::NextPerson => write!(f, "NextPerson"),
            Action::PrevPerson => write!(f, "PrevPerson"),
            Action::FirstPerson => write!(f, "FirstPerson"),
            Action::LastPerson => write!(f, "LastPerson"),
            Action::NavigateHome => write!(f, "NavigateHome"),
            Action::NavigateDetails(id) => write!(f, "NavigateDetails({})", id),
        }
    }
}
