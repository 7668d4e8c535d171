// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A table as read from the source, before any interpretation of the columns.
///
/// All the cells are kept as strings. Rows are in source order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// Column names, after normalization.
pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const PHONE_NUMBER: &str = "Phone Number";
pub const PHONE_TYPE: &str = "Phone Number Type";
pub const PREFERRED_EMAIL: &str = "Preferred Email Address";
pub const CONTACT_PREFERENCE: &str = "Contact Preference";
pub const TARGET_COMMITTEES: &str = "Target Committees";

/// The verbose headers produced by the sign-up form and their short names.
pub const COLUMN_RENAMES: [(&str, &str); 2] = [
    ("Phone Number (in xxx-xxx-xxxx format)", PHONE_NUMBER),
    ("Target Committees (select at least one)", TARGET_COMMITTEES),
];

/// The business columns of a report, in rendering order.
pub const REPORT_COLUMNS: [&str; 7] = [
    FIRST_NAME,
    LAST_NAME,
    PHONE_NUMBER,
    PHONE_TYPE,
    PREFERRED_EMAIL,
    CONTACT_PREFERENCE,
    TARGET_COMMITTEES,
];

/// One sign-up, with the business fields pulled out of the raw row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MemberRecord {
    /// 0-based position of the row in the source, header excluded.
    pub source_index: usize,
    pub timestamp: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub phone_type: String,
    /// The identity of a member. May be blank.
    pub preferred_email: String,
    pub contact_preference: String,
    /// None when the member did not select anything.
    pub target_committees: Option<String>,
    /// The values of the columns that are not known to this crate, in source order.
    pub extra: Vec<String>,
}

impl MemberRecord {
    /// The cells of the report window for this member, in rendering order.
    ///
    /// `passthrough` is the number of extra columns that are part of the window (0 or 1).
    pub fn window_values(&self, passthrough: usize) -> Vec<&str> {
        let mut values = vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.phone_number.as_str(),
            self.phone_type.as_str(),
            self.preferred_email.as_str(),
            self.contact_preference.as_str(),
            self.target_committees.as_deref().unwrap_or(""),
        ];
        for idx in 0..passthrough {
            values.push(self.extra.get(idx).map(|s| s.as_str()).unwrap_or(""));
        }
        values
    }
}

/// The members of a run, along with the headers of the passthrough columns.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Roster {
    pub extra_headers: Vec<String>,
    pub members: Vec<MemberRecord>,
}

impl Roster {
    /// Number of passthrough columns rendered in the reports.
    ///
    /// The report window is eight columns wide: the seven business columns and the first
    /// passthrough column, if the source has one.
    pub fn passthrough_width(&self) -> usize {
        self.extra_headers.len().min(1)
    }

    pub fn window_headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = REPORT_COLUMNS.iter().map(|s| s.to_string()).collect();
        headers.extend(
            self.extra_headers
                .iter()
                .take(self.passthrough_width())
                .cloned(),
        );
        headers
    }
}

// ********* Committees **********

/// A committee that members can sign up for.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Committee {
    /// The label, exactly as the sign-up form writes it in the target committees field.
    pub display_label: &'static str,
}

impl Committee {
    /// The base name of the report files of this committee.
    pub fn file_slug(&self) -> String {
        slugify(self.display_label)
    }

    /// True if the free-text selection of a member names this committee.
    pub fn is_selected_in(&self, target_committees: &str) -> bool {
        target_committees.contains(self.display_label)
    }
}

/// The committees, in publishing order.
pub const COMMITTEES: [Committee; 6] = [
    Committee {
        display_label: "Target 1: HBCU for Life: A Call to Action",
    },
    Committee {
        display_label: "Target 2: Women's Healthcare and Wellness",
    },
    Committee {
        display_label: "Target 3: Building Your Economic Legacy",
    },
    Committee {
        display_label: "Target 4: The Arts!",
    },
    Committee {
        display_label: "Target 5: Global Impact",
    },
    Committee {
        display_label: "Signature Program: #CAP (College Admissions Process)",
    },
];

/// Base name of the reports that cover all the members.
pub const FULL_ROSTER_NAME: &str = "members";

/// Removes every character that is not alphanumeric. Case is preserved.
pub fn slugify(label: &str) -> String {
    label.chars().filter(|c| c.is_alphanumeric()).collect()
}

// ******** Output data structures *********

/// A subset of the roster that gets its own pair of reports.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RosterView<'a> {
    /// The committee for this view, None for the full roster.
    pub committee: Option<Committee>,
    /// The base name of the report files.
    pub base_name: String,
    pub headers: Vec<String>,
    pub passthrough: usize,
    /// In deduplicated source order.
    pub members: Vec<&'a MemberRecord>,
}

impl<'a> RosterView<'a> {
    pub fn label(&self) -> &str {
        match &self.committee {
            Some(c) => c.display_label,
            None => FULL_ROSTER_NAME,
        }
    }

    /// The members of the view, as they should appear in a report.
    pub fn sorted_members(&self) -> Vec<&'a MemberRecord> {
        let mut members = self.members.clone();
        crate::sort_by_last_name(&mut members);
        members
    }
}

/// Errors that prevent the roster from being built.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RosterErrors {
    /// A column needed by the reports is not in the header row.
    MissingColumn { name: String },
    /// The header row is empty.
    EmptyHeader,
}

impl Error for RosterErrors {}

impl Display for RosterErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterErrors::MissingColumn { name } => {
                write!(f, "column {:?} is missing from the roster", name)
            }
            RosterErrors::EmptyHeader => write!(f, "the roster has no header row"),
        }
    }
}
