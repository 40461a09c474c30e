//! Plain-text views of an [`AppSnapshot`].

use crate::models::{AuditLogEntry, Candidate, CandidateStatus, Notification, Position, User};
use crate::state::{AppSnapshot, HistoryView};
use crate::utils::time::display_timestamp;
use crate::workflow::CandidateAction;

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.iter().map(|h| h.to_string()).collect())];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.extend(rows.into_iter().map(line));
    out.join("\n")
}

pub fn banner(snapshot: &AppSnapshot) -> Option<String> {
    match (&snapshot.error, &snapshot.notice) {
        (Some(error), _) => Some(format!("! {}", error)),
        (None, Some(notice)) => Some(notice.clone()),
        (None, None) => None,
    }
}

pub fn whoami(snapshot: &AppSnapshot) -> String {
    match snapshot.current_user() {
        Some(user) => format!(
            "{} ({}) - {} @ {}",
            user.display_name(),
            user.username,
            user.role,
            user.tenant_name
        ),
        None => "Not signed in".to_string(),
    }
}

pub fn dashboard(snapshot: &AppSnapshot) -> String {
    let stats = &snapshot.stats;
    let mut counters = vec![format!("Total: {}", stats.total)];
    counters.extend(CandidateStatus::ALL.iter().map(|status| {
        let name = status.as_str();
        let mut label = name[..1].to_uppercase();
        label.push_str(&name[1..]);
        format!("{}: {}", label, stats.count_for(*status))
    }));

    let mut out = vec![
        "Dashboard Overview".to_string(),
        counters.join("  "),
        format!("Unread notifications: {}", snapshot.unread_notifications()),
        String::new(),
        "Recent Applications".to_string(),
    ];
    if snapshot.recent_candidates().is_empty() {
        out.push("No candidates yet".to_string());
    } else {
        out.push(candidates(snapshot.recent_candidates()));
    }
    out.join("\n")
}

pub fn candidates(list: &[Candidate]) -> String {
    if list.is_empty() {
        return "No candidates found".to_string();
    }
    table(
        &["ID", "Name", "Email", "Phone", "Position", "Status", "Applied"],
        list.iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.name.clone(),
                    c.email.clone(),
                    c.phone.clone(),
                    c.position.clone(),
                    c.status.to_string(),
                    display_timestamp(&c.applied_date),
                ]
            })
            .collect(),
    )
}

pub fn actions(candidate: &Candidate, actions: &[CandidateAction]) -> String {
    let labels: Vec<String> = actions.iter().map(ToString::to_string).collect();
    format!(
        "{} [{}]: {}",
        candidate.name,
        candidate.status,
        labels.join(", ")
    )
}

pub fn history(view: &HistoryView) -> String {
    let title = match &view.candidate_name {
        Some(name) => format!("Status History - {}", name),
        None => format!("Status History - candidate {}", view.candidate_id),
    };
    if view.entries.is_empty() {
        return format!("{}\nNo history available", title);
    }
    let mut out = vec![title];
    for entry in &view.entries {
        out.push(format!(
            "{}  Status: {}  By: {}",
            display_timestamp(&entry.created_at),
            entry.status,
            entry.changed_by()
        ));
        if let Some(notes) = entry.notes.as_deref().filter(|n| !n.is_empty()) {
            out.push(format!("    {}", notes));
        }
    }
    out.join("\n")
}

pub fn notifications(list: &[Notification]) -> String {
    if list.is_empty() {
        return "No notifications".to_string();
    }
    table(
        &["ID", "", "Message", "Time"],
        list.iter()
            .map(|n| {
                vec![
                    n.id.to_string(),
                    if n.is_read { " " } else { "*" }.to_string(),
                    n.message.clone(),
                    n.time.as_deref().map(display_timestamp).unwrap_or_default(),
                ]
            })
            .collect(),
    )
}

pub fn positions(list: &[Position]) -> String {
    if list.is_empty() {
        return "No positions".to_string();
    }
    table(
        &["ID", "Title"],
        list.iter()
            .map(|p| vec![p.id.to_string(), p.title.clone()])
            .collect(),
    )
}

pub fn users(list: &[User]) -> String {
    table(
        &["ID", "Username", "Email", "Role", "Status", "Last Login"],
        list.iter()
            .map(|u| {
                vec![
                    u.id.to_string(),
                    u.username.clone(),
                    u.email.clone(),
                    u.role.to_string(),
                    if u.is_active { "Active" } else { "Inactive" }.to_string(),
                    u.last_login
                        .as_deref()
                        .map(display_timestamp)
                        .unwrap_or_else(|| "Never".to_string()),
                ]
            })
            .collect(),
    )
}

pub fn audit_logs(list: &[AuditLogEntry]) -> String {
    table(
        &["Time", "User", "Action", "Entity", "IP"],
        list.iter()
            .map(|log| {
                vec![
                    display_timestamp(&log.created_at),
                    log.username.clone().unwrap_or_default(),
                    log.action.clone(),
                    log.target(),
                    log.ip_address.clone().unwrap_or_default(),
                ]
            })
            .collect(),
    )
}
