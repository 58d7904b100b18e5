//! View state machine.
//!
//! The interface shows exactly one view at a time; this module owns the
//! closed set of views and the transition table between them. The server
//! derives its routes and links from here instead of hand-wiring paths,
//! so an unlisted transition simply cannot be rendered.

/// The single active screen of the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Landing view with the three calls to action.
    Home,
    /// Early-waitlist form.
    Waitlist,
    /// Investor/partner form.
    Investor,
    /// Static contact card.
    Contact,
    /// Post-submission view for the waitlist flow.
    WaitlistSuccess,
    /// Post-submission view for the investor flow.
    InvestorSuccess,
}

/// A user action that may drive a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// "Join early waitlist" on the home view.
    ChooseWaitlist,
    /// "Investor or partner" on the home view.
    ChooseInvestor,
    /// "Contact" on the home view.
    ChooseContact,
    /// The back arrow on a non-home view.
    Back,
    /// Submission passed validation and the store write succeeded.
    SubmitSucceeded,
    /// Submission failed validation or the store write failed.
    SubmitFailed,
}

impl ViewState {
    /// The initial view on page load.
    pub const INITIAL: Self = Self::Home;

    /// Apply an action to the current view.
    ///
    /// Implements the transition table exactly; any pairing not listed
    /// leaves the view unchanged. There are no automatic transitions and
    /// no timeouts.
    #[must_use]
    pub fn apply(self, action: NavAction) -> Self {
        match (self, action) {
            (Self::Home, NavAction::ChooseWaitlist) => Self::Waitlist,
            (Self::Home, NavAction::ChooseInvestor) => Self::Investor,
            (Self::Home, NavAction::ChooseContact) => Self::Contact,
            (Self::Waitlist | Self::Investor | Self::Contact, NavAction::Back) => Self::Home,
            (Self::Waitlist, NavAction::SubmitSucceeded) => Self::WaitlistSuccess,
            (Self::Investor, NavAction::SubmitSucceeded) => Self::InvestorSuccess,
            _ => self,
        }
    }

    /// Stable URL path for this view.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Waitlist => "/waitlist",
            Self::Investor => "/investor",
            Self::Contact => "/contact",
            Self::WaitlistSuccess => "/waitlist/success",
            Self::InvestorSuccess => "/investor/success",
        }
    }

    /// Whether this view renders a back control to home.
    ///
    /// Success views offer only forward links — reaching a form again
    /// requires restarting the flow.
    #[must_use]
    pub fn has_back_control(self) -> bool {
        matches!(self, Self::Waitlist | Self::Investor | Self::Contact)
    }

    /// The id of the control that should receive focus after this view
    /// renders, if any.
    #[must_use]
    pub fn focus_target(self) -> Option<&'static str> {
        match self {
            Self::Waitlist => Some("first-name"),
            Self::Investor => Some("full-name"),
            _ => None,
        }
    }
}
