use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tabled::{Table, Tabled};
use tenkft_api::types::{
    Assignment, BillRate, LeaveType, Phase, PlaceholderResource, Project, Role, User,
};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct ProjectRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Client")]
    #[serde(rename = "Client")]
    client: String,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Starts")]
    #[serde(rename = "Starts")]
    starts_at: String,
    #[tabled(rename = "Ends")]
    #[serde(rename = "Ends")]
    ends_at: String,
}

#[derive(Tabled, Serialize)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    #[serde(rename = "Role")]
    role: String,
    #[tabled(rename = "Discipline")]
    #[serde(rename = "Discipline")]
    discipline: String,
    #[tabled(rename = "Location")]
    #[serde(rename = "Location")]
    location: String,
}

#[derive(Tabled, Serialize)]
pub struct AssignmentRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "User")]
    #[serde(rename = "User")]
    user_id: i64,
    #[tabled(rename = "Assignable")]
    #[serde(rename = "Assignable")]
    assignable_id: String,
    #[tabled(rename = "Starts")]
    #[serde(rename = "Starts")]
    starts_at: String,
    #[tabled(rename = "Ends")]
    #[serde(rename = "Ends")]
    ends_at: String,
    #[tabled(rename = "Allocation")]
    #[serde(rename = "Allocation")]
    allocation: String,
}

#[derive(Tabled, Serialize)]
pub struct PhaseRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Phase")]
    #[serde(rename = "Phase")]
    phase_name: String,
    #[tabled(rename = "Starts")]
    #[serde(rename = "Starts")]
    starts_at: String,
    #[tabled(rename = "Ends")]
    #[serde(rename = "Ends")]
    ends_at: String,
}

#[derive(Tabled, Serialize)]
pub struct BillRateRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Rate")]
    #[serde(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Role")]
    #[serde(rename = "Role")]
    role_id: String,
    #[tabled(rename = "User")]
    #[serde(rename = "User")]
    user_id: String,
    #[tabled(rename = "From")]
    #[serde(rename = "From")]
    startdate: String,
}

#[derive(Tabled, Serialize)]
pub struct LeaveTypeRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
}

#[derive(Tabled, Serialize)]
pub struct RoleRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Role")]
    #[serde(rename = "Role")]
    value: String,
}

#[derive(Tabled, Serialize)]
pub struct PlaceholderRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Role")]
    #[serde(rename = "Role")]
    role: String,
    #[tabled(rename = "Discipline")]
    #[serde(rename = "Discipline")]
    discipline: String,
    #[tabled(rename = "Rate")]
    #[serde(rename = "Rate")]
    billrate: String,
}

// -- Row builders --

pub fn build_project_rows(projects: &[Project]) -> Vec<ProjectRow> {
    projects
        .iter()
        .map(|p| ProjectRow {
            id: p.id,
            name: p.name.clone().unwrap_or_default(),
            client: p.client.clone().unwrap_or_default(),
            state: p.project_state.clone().unwrap_or_default(),
            starts_at: format_date(p.starts_at),
            ends_at: format_date(p.ends_at),
        })
        .collect()
}

pub fn build_user_rows(users: &[User]) -> Vec<UserRow> {
    users
        .iter()
        .map(|u| UserRow {
            id: u.id,
            name: u.display_name.clone().unwrap_or_else(|| {
                format!(
                    "{} {}",
                    u.first_name.as_deref().unwrap_or_default(),
                    u.last_name.as_deref().unwrap_or_default()
                )
                .trim()
                .to_string()
            }),
            email: u.email.clone().unwrap_or_default(),
            role: u.role.clone().unwrap_or_default(),
            discipline: u.discipline.clone().unwrap_or_default(),
            location: u.location.clone().unwrap_or_default(),
        })
        .collect()
}

pub fn build_assignment_rows(assignments: &[Assignment]) -> Vec<AssignmentRow> {
    assignments
        .iter()
        .map(|a| AssignmentRow {
            id: a.id,
            user_id: a.user_id,
            assignable_id: a.assignable_id.map(|id| id.to_string()).unwrap_or_default(),
            starts_at: format_date(a.starts_at),
            ends_at: format_date(a.ends_at),
            allocation: format_allocation(a),
        })
        .collect()
}

pub fn build_phase_rows(phases: &[Phase]) -> Vec<PhaseRow> {
    phases
        .iter()
        .map(|p| PhaseRow {
            id: p.id,
            phase_name: p.phase_name.clone().unwrap_or_default(),
            starts_at: format_date(p.starts_at),
            ends_at: format_date(p.ends_at),
        })
        .collect()
}

pub fn build_bill_rate_rows(bill_rates: &[BillRate]) -> Vec<BillRateRow> {
    bill_rates
        .iter()
        .map(|b| BillRateRow {
            id: b.id,
            rate: format!("${:.2}", b.rate),
            role_id: b.role_id.map(|id| id.to_string()).unwrap_or_default(),
            user_id: b.user_id.map(|id| id.to_string()).unwrap_or_default(),
            startdate: format_date(b.startdate.or(b.starts_at)),
        })
        .collect()
}

pub fn build_leave_type_rows(leave_types: &[LeaveType]) -> Vec<LeaveTypeRow> {
    leave_types
        .iter()
        .map(|lt| LeaveTypeRow {
            id: lt.id,
            name: lt.name.clone(),
            description: lt.description.clone().unwrap_or_default(),
        })
        .collect()
}

pub fn build_role_rows(roles: &[Role]) -> Vec<RoleRow> {
    roles
        .iter()
        .map(|r| RoleRow {
            id: r.id,
            value: r.value.clone(),
        })
        .collect()
}

pub fn build_placeholder_rows(placeholders: &[PlaceholderResource]) -> Vec<PlaceholderRow> {
    placeholders
        .iter()
        .map(|p| PlaceholderRow {
            id: p.id,
            title: p.title.clone().unwrap_or_default(),
            role: p.role.clone().unwrap_or_default(),
            discipline: p.discipline.clone().unwrap_or_default(),
            billrate: p.billrate.map(|r| format!("${:.2}", r)).unwrap_or_default(),
        })
        .collect()
}

// -- Rendering --

/// Prints `data` as JSON, or its rows as a table or CSV.
pub fn render<T, R>(data: &[T], rows: Vec<R>, format: &OutputFormat) -> Result<()>
where
    T: Serialize,
    R: Tabled + Serialize,
{
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Json => print_json(&data),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize JSON: {}", e),
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

fn format_allocation(assignment: &Assignment) -> String {
    if let Some(percent) = assignment.percent {
        format!("{:.0}%", percent * 100.0)
    } else if let Some(hours) = assignment.hours_per_day {
        format!("{:.1}h/day", hours)
    } else if let Some(hours) = assignment.fixed_hours {
        format!("{:.1}h total", hours)
    } else {
        String::new()
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
