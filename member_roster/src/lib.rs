mod config;
pub mod manual;

use log::{debug, info, warn};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;

/// A cell is considered missing when it is empty or only made of whitespace.
pub fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// Renames the verbose headers of the sign-up form to their short names.
///
/// Headers that are not part of the renames are left untouched. A rename whose source
/// header is absent does nothing, but is reported since the later stages will most
/// likely not find the column they need.
///
/// Returns the number of headers that were renamed.
pub fn normalize_headers(table: &mut RawTable) -> usize {
    let mut renamed = 0;
    for (old_name, new_name) in COLUMN_RENAMES.iter() {
        let mut found = false;
        for header in table.headers.iter_mut() {
            if header.as_str() == *old_name {
                debug!("normalize_headers: {:?} -> {:?}", old_name, new_name);
                *header = new_name.to_string();
                found = true;
                renamed += 1;
            }
        }
        if !found {
            warn!(
                "normalize_headers: header {:?} not found in the source, not renaming it to {:?}",
                old_name, new_name
            );
        }
    }
    renamed
}

/// Pulls the business fields out of the rows of a normalized table.
///
/// The leading column is the submission timestamp. The business columns are found by
/// name, so their order in the source does not matter. All the other columns are kept
/// as passthrough values, in source order.
pub fn extract_members(table: &RawTable) -> Result<Roster, RosterErrors> {
    if table.headers.is_empty() {
        return Err(RosterErrors::EmptyHeader);
    }
    let col_names: HashMap<&str, usize> = table
        .headers
        .iter()
        .enumerate()
        .rev()
        .map(|(idx, h)| (h.as_str(), idx))
        .collect();

    let mut named: Vec<usize> = Vec::new();
    for cname in REPORT_COLUMNS.iter() {
        let idx = col_names
            .get(cname)
            .ok_or_else(|| RosterErrors::MissingColumn {
                name: cname.to_string(),
            })?;
        named.push(*idx);
    }
    debug!("extract_members: business columns at {:?}", named);

    let extra_idxs: Vec<usize> = (1..table.headers.len())
        .filter(|idx| !named.contains(idx))
        .collect();
    let extra_headers: Vec<String> = extra_idxs
        .iter()
        .map(|idx| table.headers[*idx].clone())
        .collect();
    debug!("extract_members: passthrough columns {:?}", extra_headers);

    let members: Vec<MemberRecord> = table
        .rows
        .iter()
        .enumerate()
        .map(|(source_index, row)| {
            let target_committees = Some(cell(row, named[6])).filter(|s| !is_blank(s));
            MemberRecord {
                source_index,
                timestamp: cell(row, 0),
                first_name: cell(row, named[0]),
                last_name: cell(row, named[1]),
                phone_number: cell(row, named[2]),
                phone_type: cell(row, named[3]),
                preferred_email: cell(row, named[4]),
                contact_preference: cell(row, named[5]),
                target_committees,
                extra: extra_idxs.iter().map(|idx| cell(row, *idx)).collect(),
            }
        })
        .collect();

    Ok(Roster {
        extra_headers,
        members,
    })
}

fn cell(row: &[String], idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

/// Keeps the first record, in source order, for each preferred email address.
///
/// The comparison is exact and case-sensitive. Records without an email address cannot
/// be told apart, so they are all kept.
pub fn deduplicate_by_email(members: &[MemberRecord]) -> Vec<MemberRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut res: Vec<MemberRecord> = Vec::new();
    let mut num_blanks = 0;
    for m in members.iter() {
        if is_blank(&m.preferred_email) {
            num_blanks += 1;
            res.push(m.clone());
        } else if seen.insert(m.preferred_email.as_str()) {
            res.push(m.clone());
        } else {
            debug!(
                "deduplicate_by_email: dropping row {} ({:?})",
                m.source_index, m.preferred_email
            );
        }
    }
    if num_blanks > 0 {
        warn!(
            "deduplicate_by_email: {} records without an email address were kept as is",
            num_blanks
        );
    }
    res
}

/// Sorts by ascending last name. Members with the same last name keep their relative
/// order. Members without a last name go last.
pub fn sort_by_last_name(members: &mut [&MemberRecord]) {
    members.sort_by(|a, b| {
        let ka = (is_blank(&a.last_name), a.last_name.as_str());
        let kb = (is_blank(&b.last_name), b.last_name.as_str());
        ka.cmp(&kb)
    });
}

/// Splits the roster into the views that get published.
///
/// The first view is always the full roster, followed by one view per committee, in
/// the order of `committees`. A member appears in every committee named in its
/// selection, so the committee views may overlap.
pub fn partition_committees<'a>(roster: &'a Roster, committees: &[Committee]) -> Vec<RosterView<'a>> {
    let headers = roster.window_headers();
    let passthrough = roster.passthrough_width();
    let mut views: Vec<RosterView<'a>> = vec![RosterView {
        committee: None,
        base_name: FULL_ROSTER_NAME.to_string(),
        headers: headers.clone(),
        passthrough,
        members: roster.members.iter().collect(),
    }];

    for committee in committees.iter() {
        let members: Vec<&MemberRecord> = roster
            .members
            .iter()
            .filter(|m| match &m.target_committees {
                Some(tc) => committee.is_selected_in(tc),
                None => false,
            })
            .collect();
        debug!(
            "partition_committees: {:?}: {} members",
            committee.display_label,
            members.len()
        );
        views.push(RosterView {
            committee: Some(*committee),
            base_name: committee.file_slug(),
            headers: headers.clone(),
            passthrough,
            members,
        });
    }
    views
}

/// Runs the normalization, the extraction and the deduplication of a raw table.
pub fn prepare_roster(mut table: RawTable) -> Result<Roster, RosterErrors> {
    info!(
        "Preparing roster: {} rows, {} columns",
        table.rows.len(),
        table.headers.len()
    );
    normalize_headers(&mut table);
    let roster = extract_members(&table)?;
    let members = deduplicate_by_email(&roster.members);
    info!(
        "Roster: {} members after removing {} duplicates",
        members.len(),
        roster.members.len() - members.len()
    );
    Ok(Roster {
        extra_headers: roster.extra_headers,
        members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: &str) -> String {
        x.to_string()
    }

    fn form_headers() -> Vec<String> {
        vec![
            s("Timestamp"),
            s("First Name"),
            s("Last Name"),
            s("Phone Number (in xxx-xxx-xxxx format)"),
            s("Phone Number Type"),
            s("Preferred Email Address"),
            s("Contact Preference"),
            s("Target Committees (select at least one)"),
        ]
    }

    fn row(idx: usize, last: &str, email: &str, committees: &str) -> Vec<String> {
        vec![
            format!("2022-01-0{} 10:00:00", idx),
            format!("First{}", idx),
            s(last),
            s("555-555-5555"),
            s("Mobile"),
            s(email),
            s("Email"),
            s(committees),
        ]
    }

    fn member(idx: usize, last: &str, email: &str, committees: Option<&str>) -> MemberRecord {
        MemberRecord {
            source_index: idx,
            timestamp: s(""),
            first_name: format!("First{}", idx),
            last_name: s(last),
            phone_number: s(""),
            phone_type: s(""),
            preferred_email: s(email),
            contact_preference: s(""),
            target_committees: committees.map(s),
            extra: vec![],
        }
    }

    #[test]
    fn slug_removes_non_alphanumeric() {
        assert_eq!(
            slugify("Target 1: HBCU for Life: A Call to Action"),
            "Target1HBCUforLifeACalltoAction"
        );
        assert_eq!(
            COMMITTEES[1].file_slug(),
            "Target2WomensHealthcareandWellness"
        );
        assert_eq!(
            COMMITTEES[5].file_slug(),
            "SignatureProgramCAPCollegeAdmissionsProcess"
        );
    }

    #[test]
    fn normalize_renames_verbose_headers() {
        let mut table = RawTable {
            headers: form_headers(),
            rows: vec![],
        };
        assert_eq!(normalize_headers(&mut table), 2);
        assert_eq!(table.headers[3], PHONE_NUMBER);
        assert_eq!(table.headers[7], TARGET_COMMITTEES);
        assert_eq!(table.headers[1], FIRST_NAME);
    }

    #[test]
    fn normalize_absent_header_is_noop() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut table = RawTable {
            headers: vec![s("Timestamp"), s("Target Committees (select at least one)")],
            rows: vec![],
        };
        assert_eq!(normalize_headers(&mut table), 1);
        assert_eq!(table.headers, vec![s("Timestamp"), s(TARGET_COMMITTEES)]);
    }

    #[test]
    fn extract_reports_missing_column() {
        let mut headers = form_headers();
        headers.remove(2);
        let mut table = RawTable {
            headers,
            rows: vec![],
        };
        normalize_headers(&mut table);
        assert_eq!(
            extract_members(&table),
            Err(RosterErrors::MissingColumn { name: s(LAST_NAME) })
        );
    }

    #[test]
    fn extract_finds_columns_by_name() {
        let mut headers = form_headers();
        headers.swap(1, 2);
        headers.push(s("Notes"));
        let mut r = row(1, "Smith", "a@x.org", "");
        r.swap(1, 2);
        r.push(s("late"));
        let mut table = RawTable {
            headers,
            rows: vec![r],
        };
        normalize_headers(&mut table);
        let roster = extract_members(&table).unwrap();
        let m = &roster.members[0];
        assert_eq!(m.first_name, "First1");
        assert_eq!(m.last_name, "Smith");
        assert_eq!(m.target_committees, None);
        assert_eq!(m.extra, vec![s("late")]);
        assert_eq!(roster.extra_headers, vec![s("Notes")]);
        assert_eq!(roster.window_headers().len(), 8);
        assert_eq!(roster.window_headers()[7], "Notes");
        assert!(!roster.window_headers().contains(&s("Timestamp")));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let members = vec![
            member(0, "A", "a@x.org", None),
            member(1, "B", "b@x.org", None),
            member(2, "C", "a@x.org", None),
            member(3, "D", "A@x.org", None),
        ];
        let res = deduplicate_by_email(&members);
        let idxs: Vec<usize> = res.iter().map(|m| m.source_index).collect();
        assert_eq!(idxs, vec![0, 1, 3]);
    }

    #[test]
    fn dedup_is_idempotent() {
        let members = vec![
            member(0, "A", "a@x.org", None),
            member(1, "B", "a@x.org", None),
            member(2, "C", "", None),
            member(3, "D", "", None),
        ];
        let once = deduplicate_by_email(&members);
        let twice = deduplicate_by_email(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn dedup_keeps_blank_emails() {
        let members = vec![
            member(0, "A", "", None),
            member(1, "B", "  ", None),
            member(2, "C", "", None),
        ];
        assert_eq!(deduplicate_by_email(&members).len(), 3);
    }

    #[test]
    fn sort_is_stable_with_blanks_last() {
        let members = vec![
            member(0, "Smith", "1", None),
            member(1, "", "2", None),
            member(2, "Adams", "3", None),
            member(3, "Smith", "4", None),
            member(4, "Jones", "5", None),
        ];
        let mut refs: Vec<&MemberRecord> = members.iter().collect();
        sort_by_last_name(&mut refs);
        let idxs: Vec<usize> = refs.iter().map(|m| m.source_index).collect();
        assert_eq!(idxs, vec![2, 4, 0, 3, 1]);
    }

    #[test]
    fn partition_views_overlap() {
        let both = format!("{}, {}", COMMITTEES[0].display_label, COMMITTEES[3].display_label);
        let roster = Roster {
            extra_headers: vec![],
            members: vec![
                member(0, "A", "a", Some(both.as_str())),
                member(1, "B", "b", Some(COMMITTEES[3].display_label)),
                member(2, "C", "c", None),
                member(3, "D", "d", Some("target 1: hbcu for life: a call to action")),
            ],
        };
        let views = partition_committees(&roster, &COMMITTEES);
        assert_eq!(views.len(), 7);
        assert_eq!(views[0].base_name, FULL_ROSTER_NAME);
        assert_eq!(views[0].members.len(), 4);
        assert_eq!(views[1].members.len(), 1);
        assert_eq!(views[1].members[0].source_index, 0);
        assert_eq!(views[4].members.len(), 2);
        assert!(views[2].members.is_empty());
        for v in views.iter().skip(1) {
            for m in v.members.iter() {
                assert!(views[0].members.contains(m));
            }
            assert_eq!(v.headers, views[0].headers);
        }
    }

    #[test]
    fn prepare_roster_end_to_end() {
        let table = RawTable {
            headers: form_headers(),
            rows: vec![
                row(1, "Zeta", "z@x.org", COMMITTEES[0].display_label),
                row(2, "Alpha", "a@x.org", "Something else"),
                row(3, "Beta", "z@x.org", COMMITTEES[1].display_label),
            ],
        };
        let roster = prepare_roster(table).unwrap();
        assert_eq!(roster.members.len(), 2);
        assert_eq!(roster.passthrough_width(), 0);
        let views = partition_committees(&roster, &COMMITTEES);
        let sorted: Vec<&str> = views[0]
            .sorted_members()
            .iter()
            .map(|m| m.last_name.as_str())
            .collect();
        assert_eq!(sorted, vec!["Alpha", "Zeta"]);
        assert_eq!(views[1].members.len(), 1);
        for v in views.iter().skip(2) {
            assert!(v.members.is_empty(), "{}", v.label());
        }
    }
}
