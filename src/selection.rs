//! Which date a keyboard shortcut acts on, and how shortcuts mutate the
//! store.

use crate::models::{DateKey, Status};
use crate::store::StatusStore;
use serde::Serialize;

/// Status dialog lifecycle. The date stays sticky until the exit
/// transition has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "date", rename_all = "snake_case")]
pub enum Dialog {
    #[default]
    Closed,
    Open(DateKey),
    Closing(DateKey),
}

impl Dialog {
    pub fn sticky_date(self) -> Option<DateKey> {
        match self {
            Dialog::Closed => None,
            Dialog::Open(date) | Dialog::Closing(date) => Some(date),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionContext {
    dialog: Dialog,
    hover: Option<DateKey>,
    help_open: bool,
}

impl SelectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn open_dialog(&mut self, date: DateKey) {
        self.dialog = Dialog::Open(date);
    }

    /// Starts the exit transition. Closing an already closing or closed
    /// dialog changes nothing.
    pub fn close_dialog(&mut self) {
        if let Dialog::Open(date) = self.dialog {
            self.dialog = Dialog::Closing(date);
        }
    }

    /// The exit transition finished.
    pub fn settle(&mut self) {
        if let Dialog::Closing(_) = self.dialog {
            self.dialog = Dialog::Closed;
        }
    }

    pub fn hover(&mut self, date: Option<DateKey>) {
        self.hover = date;
    }

    pub fn open_help(&mut self) {
        self.help_open = true;
    }

    pub fn close_help(&mut self) {
        self.help_open = false;
    }

    /// Escape: dismiss every transient dialog.
    pub fn dismiss(&mut self) {
        self.close_dialog();
        self.close_help();
    }

    /// The dialog's sticky date wins over hover no matter which was set last.
    pub fn resolve_target_date(&self) -> Option<DateKey> {
        self.dialog.sticky_date().or(self.hover)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Assign(Option<Status>),
    Dismiss,
}

impl Shortcut {
    /// Case-insensitive key table: o, w, h, a, p set a status, c clears,
    /// escape dismisses dialogs.
    pub fn from_key(key: &str) -> Option<Shortcut> {
        let key = key.to_lowercase();
        let shortcut = match key.as_str() {
            "o" => Shortcut::Assign(Some(Status::Office)),
            "w" => Shortcut::Assign(Some(Status::Wfh)),
            "h" => Shortcut::Assign(Some(Status::Holiday)),
            "a" => Shortcut::Assign(Some(Status::Absent)),
            "p" => Shortcut::Assign(Some(Status::PublicHoliday)),
            "c" => Shortcut::Assign(None),
            "escape" => Shortcut::Dismiss,
            _ => return None,
        };
        Some(shortcut)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutOutcome {
    Ignored,
    NoTarget,
    Dismissed,
    Assigned {
        date: DateKey,
        status: Option<Status>,
        store: StatusStore,
    },
}

/// Resolves a keypress against the selection. An assignment returns the
/// updated store without touching `store`; the caller persists it and then
/// calls [`SelectionContext::close_dialog`].
pub fn apply_shortcut(
    key: &str,
    selection: &mut SelectionContext,
    store: &StatusStore,
) -> ShortcutOutcome {
    match Shortcut::from_key(key) {
        None => ShortcutOutcome::Ignored,
        Some(Shortcut::Dismiss) => {
            selection.dismiss();
            ShortcutOutcome::Dismissed
        }
        Some(Shortcut::Assign(status)) => match selection.resolve_target_date() {
            None => ShortcutOutcome::NoTarget,
            Some(date) => ShortcutOutcome::Assigned {
                date,
                status,
                store: store.with_status(date, status),
            },
        },
    }
}
